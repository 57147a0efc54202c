//! TypeScript code generation.

pub mod client;
pub mod types;

pub use client::TypeScriptClientGenerator;
pub use types::TypeScriptTypesGenerator;

use crate::defaults::{InitialValue, ZERO_TIMESTAMP, string_literal};
use crate::mapping::TypeMapping;
use rpcgen_schema::casing::is_identifier;
use rpcgen_schema::{Case, DefaultValue, TypeDef, convert, format_float};

/// TypeScript type mapping.
pub struct TypeScriptMapping;

impl TypeMapping for TypeScriptMapping {
    fn backend(&self) -> &'static str {
        "typescript-types"
    }

    fn string(&self) -> Option<String> {
        Some("string".to_string())
    }

    fn int(&self) -> Option<String> {
        Some("number".to_string())
    }

    fn bool(&self) -> Option<String> {
        Some("boolean".to_string())
    }

    fn float(&self) -> Option<String> {
        Some("number".to_string())
    }

    fn timestamp(&self) -> Option<String> {
        Some("string".to_string())
    }

    fn object(&self, items: String) -> Option<String> {
        Some(items)
    }

    fn array(&self, items: String) -> Option<String> {
        Some(format!("{items}[]"))
    }

    fn reference(&self, target: &TypeDef) -> Option<String> {
        Some(type_name(&target.name))
    }
}

/// TypeScript type name for a schema name.
#[must_use]
pub fn type_name(name: &str) -> String {
    convert(name, Case::Pascal)
}

/// Name of the default factory of a type.
#[must_use]
pub fn factory_name(type_name: &str) -> String {
    format!("default{type_name}")
}

/// Property key for a wire name, quoted when it is not an identifier.
#[must_use]
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Renders an initial value as a TypeScript expression.
#[must_use]
pub fn initial_expr(value: &InitialValue<'_>) -> String {
    match value {
        InitialValue::Explicit(DefaultValue::String(s)) => string_literal(s),
        InitialValue::Explicit(DefaultValue::Int(i)) => i.to_string(),
        InitialValue::Explicit(DefaultValue::Bool(b)) => b.to_string(),
        InitialValue::Explicit(DefaultValue::Float(f)) => format_float(*f),
        InitialValue::String => "\"\"".to_string(),
        InitialValue::Int => "0".to_string(),
        InitialValue::Bool => "false".to_string(),
        InitialValue::Float => "0.0".to_string(),
        InitialValue::Timestamp => string_literal(ZERO_TIMESTAMP),
        InitialValue::Sequence => "[]".to_string(),
        InitialValue::Record { type_def, .. } => {
            format!("{}()", factory_name(&type_name(&type_def.name)))
        }
    }
}
