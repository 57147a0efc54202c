//! # rpcgen Schema
//!
//! RPC schema loader and intermediate representation.
//!
//! This crate provides:
//! - JSON schema document loading with default target configuration
//! - The schema IR: types, fields, field types and methods
//! - Reference resolution with cycle detection
//! - Schema validation
//! - The shared identifier casing used by every generator

pub mod casing;
pub mod error;
pub mod methods;
pub mod parser;
pub mod resolver;
pub mod types;
pub mod validation;

pub use casing::{Case, convert};
pub use error::{ParseError, SchemaError};
pub use methods::{MethodDef, MethodShape};
pub use parser::{load_schema, load_schema_file};
pub use resolver::{Expansion, resolve, resolve_at};
pub use types::{
    DefaultValue, FieldDef, FieldKind, FieldLocation, FieldMeta, FieldType, GoConfig, Schema,
    TypeDef, format_float,
};
pub use validation::validate_schema;
