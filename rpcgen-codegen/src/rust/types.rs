//! Rust struct and `Default` impl generation.

use super::{RustMapping, member_ident, type_ident, type_tokens};
use crate::defaults::{InitialValue, record_defaults};
use crate::docs::{field_doc, type_doc};
use crate::error::CodegenError;
use crate::mapping::map_type;
use crate::shape::{Record, records};
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use rpcgen_schema::{DefaultValue, FieldDef, FieldType, Schema};

/// Generator for serde structs, one per record.
pub struct TypeGenerator<'a> {
    schema: &'a Schema,
}

impl<'a> TypeGenerator<'a> {
    /// Creates a new type generator.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Generates a struct and its `Default` impl for every record.
    ///
    /// # Errors
    /// Returns `CodegenError` if a field type cannot be mapped, a default
    /// cannot be synthesized, or a name has no identifier form.
    pub fn generate(&self) -> Result<Vec<TokenStream>, CodegenError> {
        let mut items = Vec::new();
        for record in records(self.schema) {
            items.push(self.generate_struct(&record)?);
            items.push(self.generate_default(&record)?);
        }
        Ok(items)
    }

    fn generate_struct(&self, record: &Record<'_>) -> Result<TokenStream, CodegenError> {
        let name = type_ident(&record.name())?;
        let description = if record.is_payload() {
            "params."
        } else {
            record.description
        };
        let doc = format!(" {}", type_doc(&name.to_string(), description));

        let mut fields = Vec::with_capacity(record.fields.len());
        for field in record.fields {
            let ident = member_ident(&field.name)?;
            let location = record.locate(field);
            let mapped = map_type(&RustMapping, self.schema, &field.field_type, location)?;
            let ty = type_tokens(&mapped)?;
            let field_doc = format!(" {}", field_doc(&field.name, field));

            let wire = field.name.as_str();
            let rename = if ident.to_string().trim_start_matches("r#") == wire {
                quote! {}
            } else {
                quote! { #[serde(rename = #wire)] }
            };

            fields.push(quote! {
                #[doc = #field_doc]
                #rename
                pub #ident: #ty
            });
        }

        Ok(quote! {
            #[doc = #doc]
            #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
            #[serde(default)]
            pub struct #name {
                #(#fields),*
            }
        })
    }

    fn generate_default(&self, record: &Record<'_>) -> Result<TokenStream, CodegenError> {
        let name = type_ident(&record.name())?;
        let mut inits = Vec::with_capacity(record.fields.len());
        for (field, value) in record_defaults(self.schema, record)? {
            let ident = member_ident(&field.name)?;
            let expr = initial_tokens(field, &value)?;
            inits.push(quote! { #ident: #expr });
        }

        Ok(quote! {
            impl Default for #name {
                fn default() -> Self {
                    Self {
                        #(#inits),*
                    }
                }
            }
        })
    }
}

/// Renders an initial value as a Rust expression.
fn initial_tokens(
    field: &FieldDef,
    value: &InitialValue<'_>,
) -> Result<TokenStream, CodegenError> {
    let tokens = match value {
        InitialValue::Explicit(DefaultValue::String(s)) => {
            if matches!(field.field_type, FieldType::Timestamp) {
                quote! { #s.parse().unwrap_or_default() }
            } else {
                quote! { #s.to_string() }
            }
        }
        InitialValue::Explicit(DefaultValue::Int(i)) => {
            let lit = Literal::i64_unsuffixed(*i);
            quote! { #lit }
        }
        InitialValue::Explicit(DefaultValue::Bool(b)) => quote! { #b },
        InitialValue::Explicit(DefaultValue::Float(f)) => {
            let lit = Literal::f64_unsuffixed(*f);
            quote! { #lit }
        }
        InitialValue::String => quote! { String::new() },
        InitialValue::Int => quote! { 0 },
        InitialValue::Bool => quote! { false },
        InitialValue::Float => quote! { 0.0 },
        InitialValue::Timestamp => quote! { chrono::DateTime::<chrono::Utc>::default() },
        InitialValue::Sequence => quote! { Vec::new() },
        InitialValue::Record { type_def, .. } => {
            let name = type_ident(&type_def.name)?;
            quote! { #name::default() }
        }
    };
    Ok(tokens)
}
