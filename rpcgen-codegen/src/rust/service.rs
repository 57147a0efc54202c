//! Rust service trait generation.

use super::{member_ident, type_ident};
use crate::error::CodegenError;
use crate::shape::Call;
use proc_macro2::TokenStream;
use quote::quote;
use rpcgen_schema::{MethodDef, Schema};

/// Generator for an async trait with one function per method.
///
/// Implementations decide the transport; the trait only fixes the call
/// signatures.
pub struct ServiceGenerator<'a> {
    schema: &'a Schema,
    name: &'a str,
}

impl<'a> ServiceGenerator<'a> {
    /// Creates a new service generator for a trait named `name`.
    #[must_use]
    pub fn new(schema: &'a Schema, name: &'a str) -> Self {
        Self { schema, name }
    }

    /// Generates the service trait.
    ///
    /// # Errors
    /// Returns `CodegenError::Generation` if a name has no identifier form.
    pub fn generate(&self) -> Result<TokenStream, CodegenError> {
        let name = type_ident(self.name)?;
        let doc = format!(" {name} is the API service.");

        let mut functions = Vec::with_capacity(self.schema.methods().len());
        for method in self.schema.methods() {
            functions.push(self.generate_function(method)?);
        }

        Ok(quote! {
            #[doc = #doc]
            pub trait #name {
                /// Error returned by every call.
                type Error;

                #(#functions)*
            }
        })
    }

    fn generate_function(&self, method: &MethodDef) -> Result<TokenStream, CodegenError> {
        let function = member_ident(&method.name)?;
        let doc = if method.description.is_empty() {
            format!(" {function} calls {}.", method.name)
        } else {
            format!(" {function} {}", method.description)
        };

        let call = Call::of(method);
        let argument = match &call.input {
            Some(input) => {
                let input = type_ident(input)?;
                quote! { , input: #input }
            }
            None => quote! {},
        };
        let returns = match &call.output {
            Some(output) => {
                let output = type_ident(output)?;
                quote! { #output }
            }
            None => quote! { () },
        };

        Ok(quote! {
            #[doc = #doc]
            async fn #function(&self #argument) -> Result<#returns, Self::Error>;
        })
    }
}
