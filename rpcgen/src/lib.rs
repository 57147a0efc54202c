//! # rpcgen
//!
//! Schema-driven code generation for RPC services.
//!
//! A single JSON schema document describes named types and methods; rpcgen
//! loads it into an immutable IR and renders it through any number of
//! backends.
//!
//! ## Features
//!
//! - **Order-preserving IR** - Types, fields and methods keep declaration order
//! - **Reference checking** - Unresolved and by-value circular references are rejected
//! - **Uniform backends** - Go, Kotlin, Swift, TypeScript, Rust and SQL share one contract
//! - **Default synthesis** - Explicit defaults or zero values for every field type
//! - **Server stubs** - A Go HTTP handler and a Rust service trait per schema
//!
//! ## Quick Start
//!
//! ```ignore
//! use rpcgen::prelude::*;
//!
//! let schema = load_schema_file("todo.json".as_ref())?;
//! let generator = find_generator("typescript-types")?;
//! let code = generator.generate_string(&schema, &GenerateOptions::default())?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema loading, IR, resolution and validation
//! - [`codegen`] - Generator contract, backends and registry

pub mod prelude;

/// Schema loading, IR, resolution and validation.
pub mod schema {
    pub use rpcgen_schema::*;
}

/// Generator contract, backends and registry.
pub mod codegen {
    pub use rpcgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use rpcgen_codegen::{
    CodegenError, GenerateOptions, Generator, SqlDialect, find_generator, generate_from_file,
    generate_from_json, generator_names, generators, get_generator,
};
pub use rpcgen_schema::{ParseError, Schema, SchemaError, load_schema, load_schema_file};
