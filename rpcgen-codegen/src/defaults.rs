//! Default value synthesis.
//!
//! Backends that materialize initial values ask for an [`InitialValue`] and
//! render it in their own syntax. Explicit field defaults take precedence
//! over synthesized zero values; references expand into the referenced
//! type's fields, guarded by an [`Expansion`] so a by-value cycle fails
//! instead of recursing forever.

use crate::error::CodegenError;
use crate::shape::Record;
use rpcgen_schema::{
    DefaultValue, Expansion, FieldDef, FieldLocation, FieldType, Schema, TypeDef, resolve_at,
};

/// Zero instant of string-encoded timestamps, the Unix epoch in RFC 3339.
pub const ZERO_TIMESTAMP: &str = "1970-01-01T00:00:00Z";

/// Initial value of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialValue<'a> {
    /// Explicit default declared on the field.
    Explicit(&'a DefaultValue),
    /// Empty string.
    String,
    /// Zero.
    Int,
    /// `false`.
    Bool,
    /// Zero as a float.
    Float,
    /// The backend's zero instant.
    Timestamp,
    /// Empty sequence.
    Sequence,
    /// Default of a schema type, field by field.
    Record {
        /// The referenced type.
        type_def: &'a TypeDef,
        /// Initial values of its fields in declaration order.
        fields: Vec<(&'a FieldDef, InitialValue<'a>)>,
    },
}

/// Synthesizes the zero value of a field type.
///
/// # Errors
/// Returns `CodegenError::Schema` if a reference is unresolved or types
/// contain each other by value.
pub fn zero_value<'a>(
    schema: &'a Schema,
    field_type: &'a FieldType,
    location: FieldLocation<'_>,
) -> Result<InitialValue<'a>, CodegenError> {
    zero_with(schema, field_type, location, &mut Expansion::new())
}

/// Returns the initial value of a field: its explicit default, or the zero
/// value of its type.
///
/// # Errors
/// Returns `CodegenError::Schema` if a reference is unresolved or types
/// contain each other by value.
pub fn initial_value<'a>(
    schema: &'a Schema,
    field: &'a FieldDef,
    location: FieldLocation<'_>,
) -> Result<InitialValue<'a>, CodegenError> {
    initial_with(schema, field, location, &mut Expansion::new())
}

/// Returns the initial values of all fields of a record.
///
/// # Errors
/// Returns `CodegenError::Schema` if a reference is unresolved or types
/// contain each other by value.
pub fn record_defaults<'a>(
    schema: &'a Schema,
    record: &Record<'a>,
) -> Result<Vec<(&'a FieldDef, InitialValue<'a>)>, CodegenError> {
    let mut expansion = Expansion::new();
    if !record.is_payload() {
        expansion.enter(record.owner)?;
    }
    let mut values = Vec::with_capacity(record.fields.len());
    for field in record.fields {
        let value = initial_with(schema, field, record.locate(field), &mut expansion)?;
        values.push((field, value));
    }
    Ok(values)
}

fn initial_with<'a>(
    schema: &'a Schema,
    field: &'a FieldDef,
    location: FieldLocation<'_>,
    expansion: &mut Expansion<'a>,
) -> Result<InitialValue<'a>, CodegenError> {
    match &field.default {
        Some(value) => Ok(InitialValue::Explicit(value)),
        None => zero_with(schema, &field.field_type, location, expansion),
    }
}

fn zero_with<'a>(
    schema: &'a Schema,
    field_type: &'a FieldType,
    location: FieldLocation<'_>,
    expansion: &mut Expansion<'a>,
) -> Result<InitialValue<'a>, CodegenError> {
    let value = match field_type {
        FieldType::String => InitialValue::String,
        FieldType::Int => InitialValue::Int,
        FieldType::Bool => InitialValue::Bool,
        FieldType::Float => InitialValue::Float,
        FieldType::Timestamp => InitialValue::Timestamp,
        FieldType::Object(items) => zero_with(schema, items, location, expansion)?,
        FieldType::Array(_) => InitialValue::Sequence,
        FieldType::Reference(name) => {
            let type_def = resolve_at(schema, name, location)?;
            expansion.enter(&type_def.name)?;
            let mut fields = Vec::with_capacity(type_def.properties.len());
            for field in &type_def.properties {
                let location = FieldLocation::Type {
                    owner: &type_def.name,
                    field: &field.name,
                };
                fields.push((field, initial_with(schema, field, location, expansion)?));
            }
            expansion.leave();
            InitialValue::Record { type_def, fields }
        }
    };
    Ok(value)
}

/// Renders a double-quoted string literal with C-style escapes.
///
/// The escapes are understood by every target language.
#[must_use]
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
