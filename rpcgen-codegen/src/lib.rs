//! # rpcgen Codegen
//!
//! Code generation from RPC schemas.
//!
//! This crate provides:
//! - The [`Generator`] contract every backend implements
//! - Shared sub-contracts: type mapping, default synthesis, method shapes,
//!   documentation notes and validation rules
//! - Backends for Go, Kotlin, Swift, TypeScript, Rust and SQL, including Go and
//!   Rust server stubs
//! - An immutable registry of all backends

pub mod defaults;
pub mod docs;
pub mod error;
pub mod generator;
pub mod go;
pub mod kotlin;
pub mod mapping;
pub mod registry;
pub mod rules;
pub mod rust;
pub mod shape;
pub mod sql;
pub mod swift;
pub mod typescript;

pub use error::CodegenError;
pub use generator::{GenerateOptions, Generator, SqlDialect};
pub use registry::{find_generator, generator_names, generators, get_generator};

use rpcgen_schema::load_schema;

/// Generates code for one target from a schema document string.
///
/// # Arguments
/// * `json` - Schema document content
/// * `target` - Registered generator name
/// * `options` - Generation options
///
/// # Returns
/// Generated code as a string.
///
/// # Errors
/// Returns `CodegenError` if the target is unknown, or if loading,
/// validation or generation fails.
pub fn generate_from_json(
    json: &str,
    target: &str,
    options: &GenerateOptions,
) -> Result<String, CodegenError> {
    let generator = find_generator(target)?;
    let schema = load_schema(json)?;
    generator.generate_string(&schema, options)
}

/// Generates code for one target from a schema file.
///
/// # Arguments
/// * `path` - Path to the schema document
/// * `target` - Registered generator name
/// * `options` - Generation options
///
/// # Returns
/// Generated code as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, loading, validation or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    target: &str,
    options: &GenerateOptions,
) -> Result<String, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_json(&json, target, options)
}

#[cfg(test)]
pub(crate) mod testing {
    use rpcgen_schema::{Schema, load_schema};

    /// The shared to-do fixture.
    pub const TODO_JSON: &str = include_str!("../testdata/todo.json");

    /// Loads the to-do fixture.
    pub fn todo_schema() -> Schema {
        load_schema(TODO_JSON).expect("fixture")
    }
}
