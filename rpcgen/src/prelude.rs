//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use rpcgen::prelude::*;
//! ```

// Schema types
pub use rpcgen_schema::{
    DefaultValue, FieldDef, FieldKind, FieldType, MethodDef, MethodShape, Schema, TypeDef,
};
pub use rpcgen_schema::{ParseError, SchemaError};
pub use rpcgen_schema::{load_schema, load_schema_file, validate_schema};

// Generation
pub use rpcgen_codegen::{
    CodegenError, GenerateOptions, Generator, SqlDialect, find_generator, generator_names,
    generators, get_generator,
};
