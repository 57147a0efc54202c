//! Reference resolution.
//!
//! References are name-based links from a field to a schema type. They are
//! looked up on demand and never cached; code that expands types recursively
//! walks through an [`Expansion`] so a by-value cycle is reported instead of
//! recursing without bound.

use crate::error::SchemaError;
use crate::types::{FieldLocation, Schema, TypeDef};

/// Resolves a reference by name.
///
/// # Errors
/// Returns `SchemaError::UnresolvedReference` if no type has that name.
pub fn resolve<'a>(schema: &'a Schema, name: &str) -> Result<&'a TypeDef, SchemaError> {
    schema
        .get_type(name)
        .ok_or_else(|| SchemaError::unresolved(name, "schema"))
}

/// Resolves a reference found at `location`, naming it in the error.
///
/// # Errors
/// Returns `SchemaError::UnresolvedReference` if no type has that name.
pub fn resolve_at<'a>(
    schema: &'a Schema,
    name: &str,
    location: FieldLocation<'_>,
) -> Result<&'a TypeDef, SchemaError> {
    schema
        .get_type(name)
        .ok_or_else(|| SchemaError::unresolved(name, location))
}

/// Visitation stack for recursive type expansion.
#[derive(Debug, Default)]
pub struct Expansion<'a> {
    stack: Vec<&'a str>,
}

impl<'a> Expansion<'a> {
    /// Creates an empty expansion.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `name` onto the stack.
    ///
    /// # Errors
    /// Returns `SchemaError::CircularReference` if `name` is already being
    /// expanded; the error carries the full cycle path.
    pub fn enter(&mut self, name: &'a str) -> Result<(), SchemaError> {
        if let Some(start) = self.stack.iter().position(|n| *n == name) {
            let mut path: Vec<&str> = self.stack[start..].to_vec();
            path.push(name);
            return Err(SchemaError::CircularReference {
                path: path.join(" -> "),
            });
        }
        self.stack.push(name);
        Ok(())
    }

    /// Pops the innermost type.
    pub fn leave(&mut self) {
        self.stack.pop();
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldDef, FieldType};

    fn schema() -> Schema {
        let mut schema = Schema::new("test");
        let mut todo = TypeDef::new("todo");
        todo.add_field(FieldDef::new("id", FieldType::String))
            .expect("field");
        schema.add_type(todo).expect("type");
        schema
    }

    #[test]
    fn test_resolve_round_trip() {
        let schema = schema();
        let resolved = resolve(&schema, "todo").expect("resolve");
        assert_eq!(resolved.name, "todo");
        assert_eq!(resolved.properties.len(), 1);
    }

    #[test]
    fn test_resolve_missing() {
        let schema = schema();
        let err = resolve(&schema, "ghost").unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnresolvedReference { ref name, .. } if name == "ghost"
        ));
    }

    #[test]
    fn test_resolve_at_names_location() {
        let schema = schema();
        let location = FieldLocation::Output {
            owner: "create_todo",
            field: "todo",
        };
        let err = resolve_at(&schema, "ghost", location).unwrap_err();
        assert!(err.to_string().contains("method `create_todo` output `todo`"));
    }

    #[test]
    fn test_expansion_detects_cycle() {
        let mut expansion = Expansion::new();
        expansion.enter("a").expect("a");
        expansion.enter("b").expect("b");
        let err = expansion.enter("a").unwrap_err();
        match err {
            SchemaError::CircularReference { path } => assert_eq!(path, "a -> b -> a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_expansion_allows_siblings() {
        let mut expansion = Expansion::new();
        expansion.enter("a").expect("a");
        expansion.enter("b").expect("b");
        expansion.leave();
        expansion.enter("c").expect("c");
        assert_eq!(expansion.depth(), 2);
    }
}
