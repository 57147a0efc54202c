//! Swift code generation.

pub mod client;
pub mod types;

pub use client::SwiftClientGenerator;
pub use types::SwiftTypesGenerator;

use crate::defaults::{InitialValue, string_literal};
use crate::mapping::TypeMapping;
use rpcgen_schema::{Case, DefaultValue, TypeDef, convert, format_float};

/// Swift keywords that need backticks as identifiers.
const KEYWORDS: &[&str] = &[
    "as", "break", "case", "catch", "class", "continue", "default", "defer", "do", "else",
    "enum", "extension", "false", "for", "func", "guard", "if", "import", "in", "init", "is",
    "let", "nil", "operator", "private", "protocol", "public", "repeat", "return", "self",
    "static", "struct", "subscript", "super", "switch", "throw", "throws", "true", "try",
    "var", "where", "while",
];

/// Swift type mapping.
pub struct SwiftMapping;

impl TypeMapping for SwiftMapping {
    fn backend(&self) -> &'static str {
        "swift-types"
    }

    fn string(&self) -> Option<String> {
        Some("String".to_string())
    }

    fn int(&self) -> Option<String> {
        Some("Int".to_string())
    }

    fn bool(&self) -> Option<String> {
        Some("Bool".to_string())
    }

    fn float(&self) -> Option<String> {
        Some("Double".to_string())
    }

    fn timestamp(&self) -> Option<String> {
        Some("Date".to_string())
    }

    fn object(&self, items: String) -> Option<String> {
        Some(items)
    }

    fn array(&self, items: String) -> Option<String> {
        Some(format!("[{items}]"))
    }

    fn reference(&self, target: &TypeDef) -> Option<String> {
        Some(type_name(&target.name))
    }
}

/// Swift type name for a schema name.
#[must_use]
pub fn type_name(name: &str) -> String {
    convert(name, Case::Pascal)
}

/// Swift member name for a schema name, escaped if it is a keyword.
#[must_use]
pub fn member_name(name: &str) -> String {
    let camel = convert(name, Case::Camel);
    if KEYWORDS.contains(&camel.as_str()) {
        format!("`{camel}`")
    } else {
        camel
    }
}

/// Renders an initial value as a Swift expression.
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
        InitialValue::Timestamp => "Date(timeIntervalSince1970: 0)".to_string(),
        InitialValue::Sequence => "[]".to_string(),
        InitialValue::Record { type_def, .. } => format!("{}()", type_name(&type_def.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_name() {
        assert_eq!(member_name("created_at"), "createdAt");
        assert_eq!(member_name("default"), "`default`");
    }

    #[test]
    fn test_initial_expr() {
        assert_eq!(initial_expr(&InitialValue::Int), "0");
        assert_eq!(initial_expr(&InitialValue::Float), "0.0");
        assert_eq!(
            initial_expr(&InitialValue::Timestamp),
            "Date(timeIntervalSince1970: 0)"
        );
        assert_eq!(
            initial_expr(&InitialValue::Explicit(&DefaultValue::Float(2.0))),
            "2.0"
        );
    }
}
