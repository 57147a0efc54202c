//! Kotlin code generation.

pub mod client;
pub mod types;

pub use client::KotlinClientGenerator;
pub use types::KotlinTypesGenerator;

use crate::defaults::{InitialValue, ZERO_TIMESTAMP, string_literal};
use crate::mapping::TypeMapping;
use rpcgen_schema::{Case, DefaultValue, TypeDef, convert, format_float};

/// Kotlin hard keywords, which need backticks as identifiers.
const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Kotlin type mapping.
pub struct KotlinMapping;

impl TypeMapping for KotlinMapping {
    fn backend(&self) -> &'static str {
        "kotlin-types"
    }

    fn string(&self) -> Option<String> {
        Some("String".to_string())
    }

    fn int(&self) -> Option<String> {
        Some("Long".to_string())
    }

    fn bool(&self) -> Option<String> {
        Some("Boolean".to_string())
    }

    fn float(&self) -> Option<String> {
        Some("Double".to_string())
    }

    fn timestamp(&self) -> Option<String> {
        Some("String".to_string())
    }

    fn object(&self, items: String) -> Option<String> {
        Some(items)
    }

    fn array(&self, items: String) -> Option<String> {
        Some(format!("List<{items}>"))
    }

    fn reference(&self, target: &TypeDef) -> Option<String> {
        Some(class_name(&target.name))
    }
}

/// Kotlin class name for a schema name.
#[must_use]
pub fn class_name(name: &str) -> String {
    convert(name, Case::Pascal)
}

/// Kotlin member name for a schema name, escaped if it is a keyword.
#[must_use]
pub fn member_name(name: &str) -> String {
    let camel = convert(name, Case::Camel);
    if KEYWORDS.contains(&camel.as_str()) {
        format!("`{camel}`")
    } else {
        camel
    }
}

/// Renders a Kotlin string literal; `$` is escaped to avoid templates.
fn kotlin_string(value: &str) -> String {
    string_literal(value).replace('$', "\\$")
}

/// Renders an initial value as a Kotlin expression.
#[must_use]
pub fn initial_expr(value: &InitialValue<'_>) -> String {
    match value {
        InitialValue::Explicit(DefaultValue::String(s)) => kotlin_string(s),
        InitialValue::Explicit(DefaultValue::Int(i)) => format!("{i}L"),
        InitialValue::Explicit(DefaultValue::Bool(b)) => b.to_string(),
        InitialValue::Explicit(DefaultValue::Float(f)) => format_float(*f),
        InitialValue::String => "\"\"".to_string(),
        InitialValue::Timestamp => kotlin_string(ZERO_TIMESTAMP),
        InitialValue::Int => "0L".to_string(),
        InitialValue::Bool => "false".to_string(),
        InitialValue::Float => "0.0".to_string(),
        InitialValue::Sequence => "emptyList()".to_string(),
        InitialValue::Record { type_def, .. } => format!("{}()", class_name(&type_def.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_name_escapes_keywords() {
        assert_eq!(member_name("created_at"), "createdAt");
        assert_eq!(member_name("in"), "`in`");
    }

    #[test]
    fn test_initial_expr() {
        assert_eq!(initial_expr(&InitialValue::Int), "0L");
        assert_eq!(initial_expr(&InitialValue::Float), "0.0");
        assert_eq!(initial_expr(&InitialValue::Sequence), "emptyList()");
        assert_eq!(initial_expr(&InitialValue::String), "\"\"");
        assert_eq!(
            initial_expr(&InitialValue::Timestamp),
            "\"1970-01-01T00:00:00Z\""
        );
        assert_eq!(
            initial_expr(&InitialValue::Explicit(&DefaultValue::String("$5".into()))),
            "\"\\$5\""
        );
    }
}
