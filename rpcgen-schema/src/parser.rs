//! Schema document loader.
//!
//! This module parses JSON schema documents into the internal schema
//! representation, keeping the source order of type and property maps and
//! applying default target configuration.

use crate::error::ParseError;
use crate::methods::MethodDef;
use crate::types::{
    DefaultValue, FieldDef, FieldKind, FieldLocation, FieldMeta, FieldType, Schema, TypeDef,
};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

/// Prefix of `$ref` values pointing into the schema's `types` map.
pub const REF_PREFIX: &str = "#/types/";

/// Parses a schema document from a JSON string.
///
/// # Arguments
/// * `json` - Schema document content
///
/// # Returns
/// Parsed schema or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or describes an invalid schema
/// (unknown field type, missing attribute, duplicate or invalid name, default
/// value of the wrong kind).
pub fn load_schema(json: &str) -> Result<Schema, ParseError> {
    let document: SchemaDocument = serde_json::from_str(json)?;
    let schema = build_schema(document)?;
    tracing::debug!(
        name = %schema.name,
        types = schema.types().len(),
        methods = schema.methods().len(),
        "loaded schema"
    );
    Ok(schema)
}

/// Parses a schema document from a file.
///
/// # Errors
/// Returns `ParseError` if the file cannot be read or parsed.
pub fn load_schema_file(path: &Path) -> Result<Schema, ParseError> {
    let json = std::fs::read_to_string(path)?;
    load_schema(&json)
}

#[derive(Debug, Deserialize)]
struct SchemaDocument {
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    go: GoDocument,
    #[serde(default)]
    types: Entries<TypeDocument>,
    #[serde(default)]
    methods: Vec<MethodDocument>,
}

#[derive(Debug, Default, Deserialize)]
struct GoDocument {
    tags: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct TypeDocument {
    #[serde(default)]
    description: String,
    #[serde(default)]
    properties: Entries<FieldDocument>,
}

#[derive(Debug, Deserialize)]
struct MethodDocument {
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    inputs: Vec<FieldDocument>,
    #[serde(default)]
    outputs: Vec<FieldDocument>,
}

#[derive(Debug, Deserialize)]
struct FieldDocument {
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(rename = "type")]
    type_name: Option<String>,
    #[serde(rename = "$ref")]
    reference: Option<String>,
    items: Option<Box<FieldDocument>>,
    #[serde(default, alias = "readOnly")]
    readonly: bool,
    #[serde(default)]
    required: bool,
    default: Option<Value>,
    #[serde(default, rename = "enum")]
    enumeration: Vec<String>,
    minimum: Option<f64>,
    maximum: Option<f64>,
}

/// JSON object kept as a list of entries in document order.
#[derive(Debug)]
struct Entries<T>(Vec<(String, T)>);

impl<T> Default for Entries<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Entries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for EntriesVisitor<T> {
            type Value = Entries<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of named definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, T>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

fn build_schema(document: SchemaDocument) -> Result<Schema, ParseError> {
    let mut schema = Schema::new(document.name);
    schema.description = document.description;
    if let Some(tags) = document.go.tags {
        schema.go.tags = tags;
    }

    for (name, type_doc) in document.types.0 {
        check_name("type", &name)?;
        let mut type_def = TypeDef::new(name.as_str()).with_description(type_doc.description);
        for (field_name, field_doc) in type_doc.properties.0 {
            let location = FieldLocation::Type {
                owner: &name,
                field: &field_name,
            };
            type_def.add_field(build_field(&field_name, field_doc, location)?)?;
        }
        schema.add_type(type_def)?;
    }

    for method_doc in document.methods {
        let name = method_doc
            .name
            .ok_or_else(|| ParseError::missing_attr("method", "name"))?;
        check_name("method", &name)?;
        let mut method = MethodDef::new(name.as_str()).with_description(method_doc.description);

        for mut field_doc in method_doc.inputs {
            let field_name = field_doc
                .name
                .take()
                .ok_or_else(|| ParseError::missing_attr(format!("method `{name}` input"), "name"))?;
            let location = FieldLocation::Input {
                owner: &name,
                field: &field_name,
            };
            method.add_input(build_field(&field_name, field_doc, location)?)?;
        }

        for mut field_doc in method_doc.outputs {
            let field_name = field_doc.name.take().ok_or_else(|| {
                ParseError::missing_attr(format!("method `{name}` output"), "name")
            })?;
            let location = FieldLocation::Output {
                owner: &name,
                field: &field_name,
            };
            method.add_output(build_field(&field_name, field_doc, location)?)?;
        }

        schema.add_method(method)?;
    }

    Ok(schema)
}

fn build_field(
    name: &str,
    doc: FieldDocument,
    location: FieldLocation<'_>,
) -> Result<FieldDef, ParseError> {
    check_name("field", name)?;
    let field_type = build_field_type(&doc, location)?;
    let default = doc
        .default
        .as_ref()
        .map(|value| build_default(value, &field_type, location))
        .transpose()?;

    Ok(FieldDef {
        name: name.to_string(),
        description: doc.description,
        field_type,
        read_only: doc.readonly,
        default,
        meta: FieldMeta {
            required: doc.required,
            enumeration: doc.enumeration,
            minimum: doc.minimum,
            maximum: doc.maximum,
        },
    })
}

fn build_field_type(
    doc: &FieldDocument,
    location: FieldLocation<'_>,
) -> Result<FieldType, ParseError> {
    // `$ref` takes precedence over `type`
    if let Some(reference) = &doc.reference {
        let name = reference.strip_prefix(REF_PREFIX).unwrap_or(reference);
        if name.is_empty() {
            return Err(ParseError::structure(format!("empty reference in {location}")));
        }
        return Ok(FieldType::Reference(name.to_string()));
    }

    let type_name = doc
        .type_name
        .as_deref()
        .ok_or_else(|| ParseError::missing_attr(location.to_string(), "type"))?;
    let kind =
        FieldKind::parse(type_name).ok_or_else(|| ParseError::unknown_type(type_name, location))?;

    let items = || -> Result<Box<FieldType>, ParseError> {
        let items = doc
            .items
            .as_deref()
            .ok_or_else(|| ParseError::missing_attr(location.to_string(), "items"))?;
        Ok(Box::new(build_field_type(items, location)?))
    };

    Ok(match kind {
        FieldKind::String => FieldType::String,
        FieldKind::Int => FieldType::Int,
        FieldKind::Bool => FieldType::Bool,
        FieldKind::Float => FieldType::Float,
        FieldKind::Timestamp => FieldType::Timestamp,
        FieldKind::Object => FieldType::Object(items()?),
        FieldKind::Array => FieldType::Array(items()?),
        FieldKind::Reference => return Err(ParseError::unknown_type(type_name, location)),
    })
}

fn build_default(
    value: &Value,
    field_type: &FieldType,
    location: FieldLocation<'_>,
) -> Result<DefaultValue, ParseError> {
    let invalid = || ParseError::InvalidDefault {
        kind: field_type.kind().to_string(),
        value: value.to_string(),
        location: location.to_string(),
    };

    match (field_type, value) {
        (FieldType::String | FieldType::Timestamp, Value::String(s)) => {
            Ok(DefaultValue::String(s.clone()))
        }
        (FieldType::Int, Value::Number(n)) => n.as_i64().map(DefaultValue::Int).ok_or_else(invalid),
        (FieldType::Float, Value::Number(n)) => {
            n.as_f64().map(DefaultValue::Float).ok_or_else(invalid)
        }
        (FieldType::Bool, Value::Bool(b)) => Ok(DefaultValue::Bool(*b)),
        _ => Err(invalid()),
    }
}

/// Names start with an ASCII letter and continue with letters, digits, `_` or `-`.
fn check_name(kind: &str, name: &str) -> Result<(), ParseError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ParseError::invalid_name(kind, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::methods::MethodShape;
    use std::io::Write;

    const TODO_SCHEMA: &str = r##"{
  "name": "todo",
  "description": "Todo list API.",
  "types": {
    "item": {
      "description": "is a to-do item.",
      "properties": {
        "text": { "type": "string", "description": "is the to-do item text.", "required": true },
        "id": { "type": "int", "description": "is the id of the item.", "readonly": true },
        "created_at": { "type": "timestamp", "description": "is the time the to-do item was created." }
      }
    }
  },
  "methods": [
    {
      "name": "add_item",
      "description": "adds an item to the list.",
      "inputs": [ { "name": "item", "type": "string", "required": true } ]
    },
    {
      "name": "get_items",
      "description": "returns all items in the list.",
      "outputs": [ { "name": "items", "type": "array", "items": { "$ref": "#/types/item" } } ]
    },
    {
      "name": "remove_item",
      "inputs": [ { "name": "id", "type": "int" } ],
      "outputs": [ { "name": "item", "$ref": "#/types/item" } ]
    },
    { "name": "ping" }
  ]
}"##;

    #[test]
    fn test_load_todo_schema() {
        let schema = load_schema(TODO_SCHEMA).expect("Failed to parse schema");

        assert_eq!(schema.name, "todo");
        assert_eq!(schema.description, "Todo list API.");
        assert_eq!(schema.types().len(), 1);
        assert_eq!(schema.methods().len(), 4);
    }

    #[test]
    fn test_property_order_is_document_order() {
        let schema = load_schema(TODO_SCHEMA).expect("Failed to parse schema");
        let item = schema.get_type("item").expect("item");
        let names: Vec<_> = item.properties.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["text", "id", "created_at"]);
    }

    #[test]
    fn test_field_attributes() {
        let schema = load_schema(TODO_SCHEMA).expect("Failed to parse schema");
        let item = schema.get_type("item").expect("item");

        let id = item.field("id").expect("id");
        assert_eq!(id.field_type, FieldType::Int);
        assert!(id.read_only);

        let text = item.field("text").expect("text");
        assert!(text.meta.required);
        assert_eq!(text.description, "is the to-do item text.");
    }

    #[test]
    fn test_references_are_stripped() {
        let schema = load_schema(TODO_SCHEMA).expect("Failed to parse schema");
        let get_items = schema.get_method("get_items").expect("get_items");
        assert_eq!(
            get_items.outputs[0].field_type,
            FieldType::array(FieldType::reference("item"))
        );
    }

    #[test]
    fn test_method_shapes() {
        let schema = load_schema(TODO_SCHEMA).expect("Failed to parse schema");
        let shapes: Vec<_> = schema.methods().iter().map(MethodDef::shape).collect();
        assert_eq!(
            shapes,
            [
                MethodShape::InputOnly,
                MethodShape::OutputOnly,
                MethodShape::Bidirectional,
                MethodShape::Empty,
            ]
        );
    }

    #[test]
    fn test_default_go_tags_applied() {
        let schema = load_schema(TODO_SCHEMA).expect("Failed to parse schema");
        assert_eq!(schema.go.tags, ["json"]);

        let schema = load_schema(r#"{ "go": { "tags": ["json", "db"] } }"#).expect("parse");
        assert_eq!(schema.go.tags, ["json", "db"]);
    }

    #[test]
    fn test_empty_document() {
        let schema = load_schema("{}").expect("parse");
        assert!(schema.types().is_empty());
        assert!(schema.methods().is_empty());
    }

    #[test]
    fn test_unknown_field_type() {
        let json = r#"{ "types": { "t": { "properties": { "f": { "type": "uuid" } } } } }"#;
        let err = load_schema(json).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnknownFieldType { ref type_name, .. } if type_name == "uuid"
        ));
        assert!(err.to_string().contains("type `t` field `f`"));
    }

    #[test]
    fn test_wrong_discriminator_kind() {
        let json = r#"{ "types": { "t": { "properties": { "f": { "type": 5 } } } } }"#;
        assert!(matches!(load_schema(json), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_array_without_items() {
        let json = r#"{ "types": { "t": { "properties": { "f": { "type": "array" } } } } }"#;
        let err = load_schema(json).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingAttribute { ref attribute, .. } if attribute == "items"
        ));
    }

    #[test]
    fn test_field_without_type() {
        let json = r#"{ "types": { "t": { "properties": { "f": { "description": "x" } } } } }"#;
        assert!(matches!(
            load_schema(json),
            Err(ParseError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_duplicate_type_names() {
        let json = r#"{ "types": { "t": {}, "t": {} } }"#;
        let err = load_schema(json).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateDefinition { ref kind, .. } if kind == "type"));
    }

    #[test]
    fn test_duplicate_method_names() {
        let json = r#"{ "methods": [ { "name": "a" }, { "name": "a" } ] }"#;
        let err = load_schema(json).unwrap_err();
        assert!(matches!(
            err,
            ParseError::DuplicateDefinition { ref kind, .. } if kind == "method"
        ));
    }

    #[test]
    fn test_duplicate_property_names() {
        let json = r#"{ "types": { "t": { "properties": {
            "f": { "type": "int" }, "f": { "type": "string" } } } } }"#;
        assert!(matches!(
            load_schema(json),
            Err(ParseError::DuplicateDefinition { .. })
        ));
    }

    #[test]
    fn test_method_without_name() {
        let json = r#"{ "methods": [ { "description": "nameless" } ] }"#;
        assert!(matches!(
            load_schema(json),
            Err(ParseError::MissingAttribute { .. })
        ));
    }

    #[test]
    fn test_empty_reference() {
        let json = r##"{ "types": { "t": { "properties": { "f": { "$ref": "#/types/" } } } } }"##;
        let err = load_schema(json).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid schema structure: empty reference in type `t` field `f`"
        );
    }

    #[test]
    fn test_invalid_name() {
        let json = r#"{ "types": { "9lives": {} } }"#;
        assert!(matches!(
            load_schema(json),
            Err(ParseError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_defaults_and_metadata() {
        let json = r#"{ "types": { "t": { "properties": {
            "count": { "type": "int", "default": 5, "minimum": 1, "maximum": 10 },
            "ratio": { "type": "float", "default": 1 },
            "kind": { "type": "string", "default": "a", "enum": ["a", "b"] }
        } } } }"#;
        let schema = load_schema(json).expect("parse");
        let t = schema.get_type("t").expect("t");

        let count = t.field("count").expect("count");
        assert_eq!(count.default, Some(DefaultValue::Int(5)));
        assert_eq!(count.meta.minimum, Some(1.0));
        assert_eq!(count.meta.maximum, Some(10.0));

        assert_eq!(
            t.field("ratio").and_then(|f| f.default.clone()),
            Some(DefaultValue::Float(1.0))
        );

        let kind = t.field("kind").expect("kind");
        assert_eq!(kind.meta.enumeration, ["a", "b"]);
    }

    #[test]
    fn test_default_of_wrong_kind() {
        let json = r#"{ "types": { "t": { "properties": {
            "count": { "type": "int", "default": "five" } } } } }"#;
        assert!(matches!(
            load_schema(json),
            Err(ParseError::InvalidDefault { .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(load_schema("{ not json"), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_load_schema_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(TODO_SCHEMA.as_bytes()).expect("write");
        let schema = load_schema_file(file.path()).expect("load");
        assert!(schema.has_type("item"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_schema_file(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
