//! Validation rules derived from field metadata.
//!
//! Backends that emit validation helpers turn each rule into a check in
//! their own syntax. Rules only apply to the kinds they make sense for:
//! `required` and `enum` to strings, bounds to numbers.

use rpcgen_schema::{FieldDef, FieldType};

/// A check on a single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule<'a> {
    /// The string must not be empty.
    Required,
    /// The string must be one of these values.
    OneOf(&'a [String]),
    /// The number must be at least this value.
    Minimum(f64),
    /// The number must be at most this value.
    Maximum(f64),
}

/// Returns the rules of a field in a fixed order.
#[must_use]
pub fn field_rules(field: &FieldDef) -> Vec<Rule<'_>> {
    let mut rules = Vec::new();
    match field.field_type {
        FieldType::String => {
            if field.meta.required {
                rules.push(Rule::Required);
            }
            if !field.meta.enumeration.is_empty() {
                rules.push(Rule::OneOf(&field.meta.enumeration));
            }
        }
        FieldType::Int | FieldType::Float => {
            if let Some(min) = field.meta.minimum {
                rules.push(Rule::Minimum(min));
            }
            if let Some(max) = field.meta.maximum {
                rules.push(Rule::Maximum(max));
            }
        }
        _ => {}
    }
    rules
}

/// Returns true if any field of the slice carries a rule.
#[must_use]
pub fn has_rules(fields: &[FieldDef]) -> bool {
    fields.iter().any(|f| !field_rules(f).is_empty())
}
