//! Relational schema and query generation.
//!
//! Each schema type becomes a table keyed by `id`. Scalars map to native
//! column types of the selected [`Dialect`]; nested values (objects, arrays
//! and references) are stored as JSON columns.

pub mod dialect;
pub mod queries;
pub mod schema;

pub use dialect::{Dialect, Postgres, Sqlite, dialect_for};
pub use queries::SqlQueriesGenerator;
pub use schema::SqlSchemaGenerator;

use crate::docs::{field_doc, field_notes};
use crate::error::CodegenError;
use crate::mapping::{TypeMapping, map_type};
use rpcgen_schema::{DefaultValue, FieldDef, FieldLocation, Schema, TypeDef, format_float};

/// Name of the primary key column.
pub const PRIMARY_KEY: &str = "id";

/// Column type mapping for a dialect.
pub struct SqlMapping<'d> {
    dialect: &'d dyn Dialect,
    backend: &'static str,
}

impl<'d> SqlMapping<'d> {
    /// Creates the mapping for the named backend.
    #[must_use]
    pub fn new(dialect: &'d dyn Dialect, backend: &'static str) -> Self {
        Self { dialect, backend }
    }
}

impl TypeMapping for SqlMapping<'_> {
    fn backend(&self) -> &'static str {
        self.backend
    }

    fn string(&self) -> Option<String> {
        Some(self.dialect.text().to_string())
    }

    fn int(&self) -> Option<String> {
        Some(self.dialect.integer().to_string())
    }

    fn bool(&self) -> Option<String> {
        Some(self.dialect.boolean().to_string())
    }

    fn float(&self) -> Option<String> {
        Some(self.dialect.real().to_string())
    }

    fn timestamp(&self) -> Option<String> {
        Some(self.dialect.timestamp().to_string())
    }

    fn object(&self, _items: String) -> Option<String> {
        Some(self.dialect.json().to_string())
    }

    fn array(&self, _items: String) -> Option<String> {
        Some(self.dialect.json().to_string())
    }

    fn reference(&self, _target: &TypeDef) -> Option<String> {
        Some(self.dialect.json().to_string())
    }
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name (the field's wire name).
    pub name: String,
    /// Column type.
    pub sql_type: String,
    /// Whether this is the primary key.
    pub primary_key: bool,
    /// Rendered default expression.
    pub default: Option<String>,
    /// Field description and metadata notes.
    pub comment: Option<String>,
}

/// A table derived from a schema type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Type description.
    pub description: String,
    /// Columns, primary key first when it is implicit.
    pub columns: Vec<Column>,
}

impl Table {
    /// Columns other than the primary key.
    pub fn values(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.primary_key)
    }
}

/// Builds the table of a schema type.
///
/// A type without an `id` field gets an implicit text primary key.
///
/// # Errors
/// Returns `CodegenError::UnsupportedTypeMapping` if `id` is not a scalar,
/// or any error from mapping the field types.
pub fn table(
    schema: &Schema,
    type_def: &TypeDef,
    dialect: &dyn Dialect,
    backend: &'static str,
) -> Result<Table, CodegenError> {
    let mapping = SqlMapping::new(dialect, backend);
    let mut columns = Vec::with_capacity(type_def.properties.len() + 1);

    if type_def.field(PRIMARY_KEY).is_none() {
        columns.push(Column {
            name: PRIMARY_KEY.to_string(),
            sql_type: dialect.text().to_string(),
            primary_key: true,
            default: None,
            comment: None,
        });
    }

    for field in &type_def.properties {
        let location = FieldLocation::Type {
            owner: &type_def.name,
            field: &field.name,
        };
        let sql_type = map_type(&mapping, schema, &field.field_type, location)?;
        let primary_key = field.name == PRIMARY_KEY;
        if primary_key && !field.field_type.is_scalar() {
            return Err(CodegenError::unsupported(
                backend,
                field.field_type.kind(),
                location,
            ));
        }
        columns.push(Column {
            name: field.name.clone(),
            sql_type,
            primary_key,
            default: field.default.as_ref().map(|v| default_literal(dialect, v)),
            comment: column_comment(field),
        });
    }

    Ok(Table {
        name: type_def.name.clone(),
        description: type_def.description.clone(),
        columns,
    })
}

/// Documents a column with its field's description and notes, if it has any.
fn column_comment(field: &FieldDef) -> Option<String> {
    if field.description.is_empty() && field_notes(field).is_empty() {
        return None;
    }
    Some(field_doc(&field.name, field).replace('\n', " "))
}

/// Renders an explicit default as a SQL literal.
fn default_literal(dialect: &dyn Dialect, value: &DefaultValue) -> String {
    match value {
        DefaultValue::String(s) => sql_string(s),
        DefaultValue::Int(i) => i.to_string(),
        DefaultValue::Bool(b) => dialect.bool_literal(*b).to_string(),
        DefaultValue::Float(f) => format_float(*f),
    }
}

/// Renders a single-quoted SQL string literal.
#[must_use]
pub fn sql_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
