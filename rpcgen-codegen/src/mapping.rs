//! Field type mapping.
//!
//! Each backend implements [`TypeMapping`] with one method per field type
//! variant, so adding a variant is a compile error in every backend until it
//! is handled. A method returns `None` when the backend cannot represent that
//! variant; [`map_type`] turns this into a typed error naming the field.

use crate::error::CodegenError;
use rpcgen_schema::{FieldLocation, FieldType, Schema, TypeDef, resolve_at};

/// Total mapping from field types to a backend's type syntax.
pub trait TypeMapping {
    /// Backend name used in errors.
    fn backend(&self) -> &'static str;

    /// Maps a string.
    fn string(&self) -> Option<String>;

    /// Maps an integer.
    fn int(&self) -> Option<String>;

    /// Maps a boolean.
    fn bool(&self) -> Option<String>;

    /// Maps a float.
    fn float(&self) -> Option<String>;

    /// Maps a timestamp.
    fn timestamp(&self) -> Option<String>;

    /// Maps an object whose items map to `items`.
    fn object(&self, items: String) -> Option<String>;

    /// Maps an array whose items map to `items`.
    fn array(&self, items: String) -> Option<String>;

    /// Maps a reference to the resolved type `target`.
    fn reference(&self, target: &TypeDef) -> Option<String>;
}

/// Maps a field type through `mapping`, resolving references.
///
/// # Arguments
/// * `mapping` - Backend type mapping
/// * `schema` - Schema used to resolve references
/// * `field_type` - Type to map
/// * `location` - Field location, for errors
///
/// # Errors
/// Returns `CodegenError::Schema` for an unresolved reference and
/// `CodegenError::UnsupportedTypeMapping` when the backend has no
/// representation for the type.
pub fn map_type<M: TypeMapping + ?Sized>(
    mapping: &M,
    schema: &Schema,
    field_type: &FieldType,
    location: FieldLocation<'_>,
) -> Result<String, CodegenError> {
    let mapped = match field_type {
        FieldType::String => mapping.string(),
        FieldType::Int => mapping.int(),
        FieldType::Bool => mapping.bool(),
        FieldType::Float => mapping.float(),
        FieldType::Timestamp => mapping.timestamp(),
        FieldType::Object(items) => {
            let items = map_type(mapping, schema, items, location)?;
            mapping.object(items)
        }
        FieldType::Array(items) => {
            let items = map_type(mapping, schema, items, location)?;
            mapping.array(items)
        }
        FieldType::Reference(name) => {
            let target = resolve_at(schema, name, location)?;
            mapping.reference(target)
        }
    };
    mapped.ok_or_else(|| CodegenError::unsupported(mapping.backend(), field_type.kind(), location))
}
