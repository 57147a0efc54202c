//! Rust code generation modules.
//!
//! Items are built as token streams with `quote`, so the output is
//! syntactically valid Rust by construction.

pub mod service;
pub mod types;

pub use service::ServiceGenerator;
pub use types::TypeGenerator;

use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use crate::mapping::TypeMapping;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use rpcgen_schema::casing::is_identifier;
use rpcgen_schema::{Case, Schema, TypeDef, convert};

/// Strict and reserved keywords usable as raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "super", "Self"];

/// Generator for Rust serde types and a service trait.
pub struct RustGenerator;

impl Generator for RustGenerator {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn language(&self) -> &'static str {
        "rust"
    }

    fn extension(&self) -> &'static str {
        "rs"
    }

    fn render(&self, schema: &Schema, options: &GenerateOptions) -> Result<String, CodegenError> {
        let header = quote! {
            use serde::{Deserialize, Serialize};
        };

        let mut output = String::new();
        output.push_str("// Code generated by rpcgen. DO NOT EDIT.\n\n");
        output.push_str(&header.to_string());
        output.push_str("\n\n");
        for item in TypeGenerator::new(schema).generate()? {
            output.push_str(&item.to_string());
            output.push_str("\n\n");
        }
        let service = ServiceGenerator::new(schema, &options.client_name).generate()?;
        output.push_str(&service.to_string());
        output.push('\n');
        Ok(output)
    }
}

/// Rust type mapping.
pub struct RustMapping;

impl TypeMapping for RustMapping {
    fn backend(&self) -> &'static str {
        "rust"
    }

    fn string(&self) -> Option<String> {
        Some("String".to_string())
    }

    fn int(&self) -> Option<String> {
        Some("i64".to_string())
    }

    fn bool(&self) -> Option<String> {
        Some("bool".to_string())
    }

    fn float(&self) -> Option<String> {
        Some("f64".to_string())
    }

    fn timestamp(&self) -> Option<String> {
        Some("chrono::DateTime<chrono::Utc>".to_string())
    }

    fn object(&self, items: String) -> Option<String> {
        Some(items)
    }

    fn array(&self, items: String) -> Option<String> {
        Some(format!("Vec<{items}>"))
    }

    fn reference(&self, target: &TypeDef) -> Option<String> {
        Some(convert(&target.name, Case::Pascal))
    }
}

/// Type identifier for a schema name.
///
/// # Errors
/// Returns `CodegenError::Generation` if the name has no identifier form.
pub fn type_ident(name: &str) -> Result<Ident, CodegenError> {
    ident(&convert(name, Case::Pascal))
}

/// Field or method identifier for a schema name, raw if it is a keyword.
///
/// # Errors
/// Returns `CodegenError::Generation` if the name has no identifier form.
pub fn member_ident(name: &str) -> Result<Ident, CodegenError> {
    let snake = convert(name, Case::Snake);
    if RESERVED.contains(&snake.as_str()) {
        ident(&format!("{snake}_"))
    } else if KEYWORDS.contains(&snake.as_str()) {
        Ok(Ident::new_raw(&snake, Span::call_site()))
    } else {
        ident(&snake)
    }
}

fn ident(name: &str) -> Result<Ident, CodegenError> {
    if is_identifier(name) && !RESERVED.contains(&name) {
        Ok(Ident::new(name, Span::call_site()))
    } else {
        Err(CodegenError::generation(format!(
            "'{name}' is not a valid Rust identifier"
        )))
    }
}

/// Parses a mapped type into tokens.
pub(crate) fn type_tokens(mapped: &str) -> Result<TokenStream, CodegenError> {
    mapped
        .parse()
        .map_err(|e| CodegenError::generation(format!("invalid Rust type `{mapped}`: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::todo_schema;

    #[test]
    fn test_member_ident() {
        assert_eq!(member_ident("createdAt").expect("ident").to_string(), "created_at");
        assert_eq!(member_ident("type").expect("ident").to_string(), "r#type");
        assert_eq!(member_ident("self").expect("ident").to_string(), "self_");
    }

    #[test]
    fn test_type_ident() {
        assert_eq!(type_ident("list_todos_output").expect("ident").to_string(), "ListTodosOutput");
        assert!(type_ident("").is_err());
    }

    #[test]
    fn test_generated_file_parses() {
        let output = RustGenerator
            .generate_string(&todo_schema(), &GenerateOptions::default())
            .expect("generate");
        assert!(output.starts_with("// Code generated by rpcgen. DO NOT EDIT.\n"));
        let file = syn::parse_file(&output).expect("generated Rust parses");

        let names: Vec<String> = file
            .items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Struct(s) => Some(s.ident.to_string()),
                syn::Item::Trait(t) => Some(t.ident.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(
            names,
            vec![
                "Todo",
                "Page",
                "CreateTodoInput",
                "CreateTodoOutput",
                "AddItemInput",
                "ListTodosOutput",
                "Client"
            ]
        );
    }
}
