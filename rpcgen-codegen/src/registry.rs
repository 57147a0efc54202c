//! Registry of available generators.

use crate::error::CodegenError;
use crate::generator::Generator;
use crate::go::{GoClientGenerator, GoServerGenerator, GoTypesGenerator};
use crate::kotlin::{KotlinClientGenerator, KotlinTypesGenerator};
use crate::rust::RustGenerator;
use crate::sql::{SqlQueriesGenerator, SqlSchemaGenerator};
use crate::swift::{SwiftClientGenerator, SwiftTypesGenerator};
use crate::typescript::{TypeScriptClientGenerator, TypeScriptTypesGenerator};

static GENERATORS: &[&dyn Generator] = &[
    &GoTypesGenerator,
    &GoClientGenerator,
    &GoServerGenerator,
    &KotlinTypesGenerator,
    &KotlinClientGenerator,
    &SwiftTypesGenerator,
    &SwiftClientGenerator,
    &TypeScriptTypesGenerator,
    &TypeScriptClientGenerator,
    &RustGenerator,
    &SqlSchemaGenerator,
    &SqlQueriesGenerator,
];

/// Returns all registered generators in registration order.
#[must_use]
pub fn generators() -> &'static [&'static dyn Generator] {
    GENERATORS
}

/// Looks up a generator by name.
#[must_use]
pub fn get_generator(name: &str) -> Option<&'static dyn Generator> {
    GENERATORS.iter().copied().find(|g| g.name() == name)
}

/// Looks up a generator by name, failing if it is not registered.
///
/// # Errors
/// Returns `CodegenError::UnknownGenerator` if no generator has this name.
pub fn find_generator(name: &str) -> Result<&'static dyn Generator, CodegenError> {
    get_generator(name).ok_or_else(|| CodegenError::UnknownGenerator {
        name: name.to_string(),
    })
}

/// Returns the names of all registered generators.
#[must_use]
pub fn generator_names() -> Vec<&'static str> {
    GENERATORS.iter().map(|g| g.name()).collect()
}
