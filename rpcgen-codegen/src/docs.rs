//! Documentation text shared by all backends.

use rpcgen_schema::FieldDef;

/// Renders the metadata notes of a field.
///
/// Each note is a sentence preceded by a space, so the result can be
/// appended directly to a description.
#[must_use]
pub fn field_notes(field: &FieldDef) -> String {
    let mut notes = String::new();
    if field.read_only {
        notes.push_str(" This field is read-only.");
    }
    if field.meta.required {
        notes.push_str(" This field is required.");
    }
    if !field.meta.enumeration.is_empty() {
        let values: Vec<String> = field
            .meta
            .enumeration
            .iter()
            .map(|v| format!("{v:?}"))
            .collect();
        notes.push_str(&format!(" Must be one of: {}.", values.join(", ")));
    }
    if let Some(min) = field.meta.minimum {
        notes.push_str(&format!(" Must be at least {min}."));
    }
    if let Some(max) = field.meta.maximum {
        notes.push_str(&format!(" Must be at most {max}."));
    }
    notes
}

/// Renders the documentation sentence of a field under its target name.
///
/// `title is the title.` for a described field, or just the notes after the
/// name when there is no description.
#[must_use]
pub fn field_doc(name: &str, field: &FieldDef) -> String {
    let mut doc = if field.description.is_empty() {
        name.to_string()
    } else {
        format!("{name} is {}", field.description)
    };
    doc.push_str(&field_notes(field));
    doc
}

/// Renders the documentation sentence of a type under its target name.
#[must_use]
pub fn type_doc(name: &str, description: &str) -> String {
    if description.is_empty() {
        name.to_string()
    } else {
        format!("{name} {description}")
    }
}
