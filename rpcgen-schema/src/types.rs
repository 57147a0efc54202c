//! Schema type definitions.
//!
//! This module contains the data structures of the schema IR: the root
//! [`Schema`], record types, fields and their field types.

use crate::error::ParseError;
use crate::methods::MethodDef;
use std::collections::HashMap;
use std::fmt;

/// Serialization tags emitted on Go struct fields when the document names none.
pub const DEFAULT_GO_TAGS: &[&str] = &["json"];

/// Complete schema definition.
///
/// Types and methods are kept in declaration order; the name maps only serve
/// lookups, so iteration never depends on hash order.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Schema name.
    pub name: String,
    /// Schema description.
    pub description: String,
    /// Go-specific configuration.
    pub go: GoConfig,
    types: Vec<TypeDef>,
    methods: Vec<MethodDef>,
    type_map: HashMap<String, usize>,
    method_map: HashMap<String, usize>,
}

impl Schema {
    /// Creates a new empty schema with default target configuration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            go: GoConfig::default(),
            types: Vec::new(),
            methods: Vec::new(),
            type_map: HashMap::new(),
            method_map: HashMap::new(),
        }
    }

    /// Adds a type definition to the schema.
    ///
    /// # Errors
    /// Returns `ParseError::DuplicateDefinition` if the name is taken.
    pub fn add_type(&mut self, type_def: TypeDef) -> Result<(), ParseError> {
        if self.type_map.contains_key(&type_def.name) {
            return Err(ParseError::duplicate("type", &type_def.name));
        }
        self.type_map.insert(type_def.name.clone(), self.types.len());
        self.types.push(type_def);
        Ok(())
    }

    /// Adds a method definition to the schema.
    ///
    /// # Errors
    /// Returns `ParseError::DuplicateDefinition` if the name is taken.
    pub fn add_method(&mut self, method: MethodDef) -> Result<(), ParseError> {
        if self.method_map.contains_key(&method.name) {
            return Err(ParseError::duplicate("method", &method.name));
        }
        self.method_map.insert(method.name.clone(), self.methods.len());
        self.methods.push(method);
        Ok(())
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.type_map.get(name).map(|&idx| &self.types[idx])
    }

    /// Returns true if a type with the given name exists.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.type_map.contains_key(name)
    }

    /// Looks up a method by name.
    #[must_use]
    pub fn get_method(&self, name: &str) -> Option<&MethodDef> {
        self.method_map.get(name).map(|&idx| &self.methods[idx])
    }

    /// Types in declaration order.
    #[must_use]
    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    /// Methods in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodDef] {
        &self.methods
    }

    /// Every field in the schema with its location, types first, then method
    /// inputs and outputs, all in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldLocation<'_>, &FieldDef)> {
        let type_fields = self.types.iter().flat_map(|t| {
            t.properties
                .iter()
                .map(move |f| (FieldLocation::Type { owner: &t.name, field: &f.name }, f))
        });
        let method_fields = self.methods.iter().flat_map(|m| {
            let inputs = m
                .inputs
                .iter()
                .map(move |f| (FieldLocation::Input { owner: &m.name, field: &f.name }, f));
            let outputs = m
                .outputs
                .iter()
                .map(move |f| (FieldLocation::Output { owner: &m.name, field: &f.name }, f));
            inputs.chain(outputs)
        });
        type_fields.chain(method_fields)
    }
}

/// Go-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoConfig {
    /// Struct tag names, e.g. `json`, `db`.
    pub tags: Vec<String>,
}

impl Default for GoConfig {
    fn default() -> Self {
        Self {
            tags: DEFAULT_GO_TAGS.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

/// A named record type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDef {
    /// Type name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Fields in declaration order.
    pub properties: Vec<FieldDef>,
}

impl TypeDef {
    /// Creates a new type with no fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            properties: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a field.
    ///
    /// # Errors
    /// Returns `ParseError::DuplicateDefinition` if the type already has a
    /// field with that name.
    pub fn add_field(&mut self, field: FieldDef) -> Result<(), ParseError> {
        push_unique(&mut self.properties, field)
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.properties.iter().find(|f| f.name == name)
    }
}

/// Appends `field` unless a field with the same name is already present.
pub(crate) fn push_unique(fields: &mut Vec<FieldDef>, field: FieldDef) -> Result<(), ParseError> {
    if fields.iter().any(|f| f.name == field.name) {
        return Err(ParseError::duplicate("field", field.name));
    }
    fields.push(field);
    Ok(())
}

/// Field definition within a type or method.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Field type.
    pub field_type: FieldType,
    /// Whether clients may not set the field.
    pub read_only: bool,
    /// Explicit default value.
    pub default: Option<DefaultValue>,
    /// Documentation metadata.
    pub meta: FieldMeta,
}

impl FieldDef {
    /// Creates a new field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            field_type,
            read_only: false,
            default: None,
            meta: FieldMeta::default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the field read-only.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Marks the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.meta.required = true;
        self
    }

    /// Sets the explicit default value.
    #[must_use]
    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }
}

/// Field type.
///
/// `Object` and `Array` nest another field type; `Reference` names a type in
/// the schema and is resolved on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 string.
    String,
    /// Integer.
    Int,
    /// Boolean.
    Bool,
    /// Floating point number.
    Float,
    /// Point in time.
    Timestamp,
    /// Object shaped like its items type.
    Object(Box<FieldType>),
    /// Sequence of items.
    Array(Box<FieldType>),
    /// Named reference to a schema type.
    Reference(String),
}

impl FieldType {
    /// Creates an array of `items`.
    #[must_use]
    pub fn array(items: FieldType) -> Self {
        Self::Array(Box::new(items))
    }

    /// Creates an object shaped like `items`.
    #[must_use]
    pub fn object(items: FieldType) -> Self {
        Self::Object(Box::new(items))
    }

    /// Creates a reference to the named type.
    #[must_use]
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Returns the variant discriminant.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::String => FieldKind::String,
            Self::Int => FieldKind::Int,
            Self::Bool => FieldKind::Bool,
            Self::Float => FieldKind::Float,
            Self::Timestamp => FieldKind::Timestamp,
            Self::Object(_) => FieldKind::Object,
            Self::Array(_) => FieldKind::Array,
            Self::Reference(_) => FieldKind::Reference,
        }
    }

    /// Returns true for variants without nested types or references.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.kind().is_scalar()
    }

    /// Returns every type name referenced by this field type, outermost first.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        match self {
            Self::Object(items) | Self::Array(items) => items.references(),
            Self::Reference(name) => vec![name.as_str()],
            _ => Vec::new(),
        }
    }
}

/// Field type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// String.
    String,
    /// Int.
    Int,
    /// Bool.
    Bool,
    /// Float.
    Float,
    /// Timestamp.
    Timestamp,
    /// Object.
    Object,
    /// Array.
    Array,
    /// Reference.
    Reference,
}

impl FieldKind {
    /// All kinds, in declaration order.
    pub const ALL: [FieldKind; 8] = [
        Self::String,
        Self::Int,
        Self::Bool,
        Self::Float,
        Self::Timestamp,
        Self::Object,
        Self::Array,
        Self::Reference,
    ];

    /// Returns the document discriminator for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Timestamp => "timestamp",
            Self::Object => "object",
            Self::Array => "array",
            Self::Reference => "$ref",
        }
    }

    /// Parses a document discriminator. `$ref` is not a `type` value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "int" | "integer" => Some(Self::Int),
            "bool" | "boolean" => Some(Self::Bool),
            "float" | "number" => Some(Self::Float),
            "timestamp" => Some(Self::Timestamp),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            _ => None,
        }
    }

    /// Returns true for kinds without nested types or references.
    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::String | Self::Int | Self::Bool | Self::Float | Self::Timestamp
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Documentation metadata attached to a field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMeta {
    /// Whether the field must be provided.
    pub required: bool,
    /// Allowed values.
    pub enumeration: Vec<String>,
    /// Inclusive lower bound.
    pub minimum: Option<f64>,
    /// Inclusive upper bound.
    pub maximum: Option<f64>,
}

impl FieldMeta {
    /// Returns true if no metadata is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.required
            && self.enumeration.is_empty()
            && self.minimum.is_none()
            && self.maximum.is_none()
    }
}

/// Explicit default value of a scalar field.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// String (also used for timestamps).
    String(String),
    /// Integer.
    Int(i64),
    /// Boolean.
    Bool(bool),
    /// Floating point number.
    Float(f64),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Float(x) => write!(f, "{}", format_float(*x)),
        }
    }
}

/// Formats a float so it always reads as a float literal (`0.0`, not `0`).
#[must_use]
pub fn format_float(value: f64) -> String {
    let s = value.to_string();
    if s.contains(['.', 'e', 'E']) || !value.is_finite() {
        s
    } else {
        format!("{s}.0")
    }
}

/// Location of a field, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation<'a> {
    /// Property of a type.
    Type {
        /// Type name.
        owner: &'a str,
        /// Field name.
        field: &'a str,
    },
    /// Input of a method.
    Input {
        /// Method name.
        owner: &'a str,
        /// Field name.
        field: &'a str,
    },
    /// Output of a method.
    Output {
        /// Method name.
        owner: &'a str,
        /// Field name.
        field: &'a str,
    },
}

impl fmt::Display for FieldLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type { owner, field } => write!(f, "type `{owner}` field `{field}`"),
            Self::Input { owner, field } => write!(f, "method `{owner}` input `{field}`"),
            Self::Output { owner, field } => write!(f, "method `{owner}` output `{field}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo_type() -> TypeDef {
        let mut t = TypeDef::new("todo").with_description("is a to-do item.");
        t.add_field(FieldDef::new("id", FieldType::String).read_only())
            .expect("id");
        t.add_field(FieldDef::new("title", FieldType::String))
            .expect("title");
        t.add_field(FieldDef::new("done", FieldType::Bool))
            .expect("done");
        t
    }

    #[test]
    fn test_schema_preserves_type_order() {
        let mut schema = Schema::new("test");
        for name in ["zeta", "alpha", "mid"] {
            schema.add_type(TypeDef::new(name)).expect("add");
        }
        let names: Vec<_> = schema.types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_schema_rejects_duplicate_type() {
        let mut schema = Schema::new("test");
        schema.add_type(todo_type()).expect("first");
        let err = schema.add_type(TypeDef::new("todo")).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateDefinition { .. }));
    }

    #[test]
    fn test_schema_rejects_duplicate_method() {
        let mut schema = Schema::new("test");
        schema.add_method(MethodDef::new("ping")).expect("first");
        let err = schema.add_method(MethodDef::new("ping")).unwrap_err();
        assert_eq!(err.to_string(), "duplicate method definition: 'ping'");
        assert_eq!(schema.methods().len(), 1);
    }

    #[test]
    fn test_type_rejects_duplicate_field() {
        let mut t = todo_type();
        let err = t
            .add_field(FieldDef::new("title", FieldType::Int))
            .unwrap_err();
        assert!(err.to_string().contains("'title'"));
    }

    #[test]
    fn test_get_type() {
        let mut schema = Schema::new("test");
        schema.add_type(todo_type()).expect("add");
        assert!(schema.has_type("todo"));
        assert_eq!(schema.get_type("todo").map(|t| t.properties.len()), Some(3));
        assert!(schema.get_type("missing").is_none());
    }

    #[test]
    fn test_default_go_tags() {
        assert_eq!(Schema::new("x").go.tags, vec!["json".to_string()]);
    }

    #[test]
    fn test_field_kind_parse() {
        for kind in FieldKind::ALL {
            if kind != FieldKind::Reference {
                assert_eq!(FieldKind::parse(kind.as_str()), Some(kind));
            }
        }
        assert_eq!(FieldKind::parse("uuid"), None);
    }

    #[test]
    fn test_references_nested() {
        let ty = FieldType::array(FieldType::object(FieldType::reference("user")));
        assert_eq!(ty.references(), vec!["user"]);
        assert!(FieldType::Timestamp.references().is_empty());
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(DefaultValue::Float(3.0).to_string(), "3.0");
        assert_eq!(DefaultValue::String("a".into()).to_string(), "\"a\"");
    }

    #[test]
    fn test_fields_iterates_in_order() {
        let mut schema = Schema::new("test");
        schema.add_type(todo_type()).expect("add");
        let mut method = MethodDef::new("create_todo");
        method
            .add_input(FieldDef::new("title", FieldType::String))
            .expect("input");
        schema.add_method(method).expect("method");

        let locations: Vec<_> = schema.fields().map(|(loc, _)| loc.to_string()).collect();
        assert_eq!(
            locations,
            [
                "type `todo` field `id`",
                "type `todo` field `title`",
                "type `todo` field `done`",
                "method `create_todo` input `title`",
            ]
        );
    }
}
