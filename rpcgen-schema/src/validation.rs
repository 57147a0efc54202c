//! Schema validation utilities.
//!
//! This module checks the cross-references of a loaded schema: every
//! reference must name an existing type, and no type may contain itself by
//! value. It also rejects names that only differ before casing, since every
//! target would declare them twice.

use crate::casing::{Case, convert};
use crate::error::SchemaError;
use crate::methods::MethodDef;
use crate::resolver::{Expansion, resolve, resolve_at};
use crate::types::{FieldDef, FieldLocation, FieldType, Schema, TypeDef};
use std::collections::{HashMap, HashSet};

/// Cases field names are rendered in across the targets.
const MEMBER_CASES: [Case; 3] = [Case::Snake, Case::Camel, Case::GoExported];

/// Validates a loaded schema for correctness.
///
/// # Arguments
/// * `schema` - The schema to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError::UnresolvedReference` for the first reference (in
/// declaration order) that names a missing type, and
/// `SchemaError::CircularReference` if types contain each other by value.
/// Returns `SchemaError::NameCollision` if two types, payloads or methods, or
/// two fields of the same owner, share a generated identifier.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    validate_references(schema)?;
    validate_cycles(schema)?;
    validate_names(schema)?;
    tracing::debug!(name = %schema.name, "schema validated");
    Ok(())
}

/// Validates that every reference resolves.
fn validate_references(schema: &Schema) -> Result<(), SchemaError> {
    for (location, field) in schema.fields() {
        for name in field.field_type.references() {
            resolve_at(schema, name, location)?;
        }
    }
    Ok(())
}

/// Validates that no type contains itself through references or objects.
///
/// Arrays break a cycle: their default is empty, so a type may hold a list of
/// itself.
fn validate_cycles(schema: &Schema) -> Result<(), SchemaError> {
    let mut done = HashSet::new();
    for type_def in schema.types() {
        let mut expansion = Expansion::new();
        visit(schema, type_def, &mut expansion, &mut done)?;
    }
    Ok(())
}

fn visit<'a>(
    schema: &'a Schema,
    type_def: &'a TypeDef,
    expansion: &mut Expansion<'a>,
    done: &mut HashSet<&'a str>,
) -> Result<(), SchemaError> {
    if done.contains(type_def.name.as_str()) {
        return Ok(());
    }

    expansion.enter(&type_def.name)?;
    for field in &type_def.properties {
        if let Some(name) = by_value_reference(&field.field_type) {
            let target = resolve(schema, name)?;
            visit(schema, target, expansion, done)?;
        }
    }
    expansion.leave();

    done.insert(&type_def.name);
    Ok(())
}

/// Validates that generated identifiers are unique.
///
/// Types and method payloads (`{method}_input`, `{method}_output`) share one
/// namespace, as do the methods themselves. Fields are compared per owner
/// under every member case.
fn validate_names(schema: &Schema) -> Result<(), SchemaError> {
    let mut records = Namespace::new(Case::Pascal);
    for type_def in schema.types() {
        records.claim(&type_def.name, || format!("type `{}`", type_def.name))?;
    }
    for method in schema.methods() {
        let shape = method.shape();
        if shape.has_input() {
            let name = format!("{}_input", method.name);
            records.claim(&name, || format!("input of method `{}`", method.name))?;
        }
        if shape.has_output() {
            let name = format!("{}_output", method.name);
            records.claim(&name, || format!("output of method `{}`", method.name))?;
        }
    }

    let mut methods = Namespace::new(Case::Pascal);
    for method in schema.methods() {
        methods.claim(&method.name, || format!("method `{}`", method.name))?;
    }

    for type_def in schema.types() {
        validate_fields(&type_def.properties, |field| FieldLocation::Type {
            owner: &type_def.name,
            field,
        })?;
    }
    for method in schema.methods() {
        validate_method_fields(method)?;
    }
    Ok(())
}

fn validate_method_fields(method: &MethodDef) -> Result<(), SchemaError> {
    validate_fields(&method.inputs, |field| FieldLocation::Input {
        owner: &method.name,
        field,
    })?;
    validate_fields(&method.outputs, |field| FieldLocation::Output {
        owner: &method.name,
        field,
    })
}

fn validate_fields<'a>(
    fields: &'a [FieldDef],
    locate: impl Fn(&'a str) -> FieldLocation<'a>,
) -> Result<(), SchemaError> {
    for case in MEMBER_CASES {
        let mut members = Namespace::new(case);
        for field in fields {
            members.claim(&field.name, || locate(field.name.as_str()).to_string())?;
        }
    }
    Ok(())
}

/// Generated names claimed so far, with the definition that claimed each.
struct Namespace {
    case: Case,
    claimed: HashMap<String, String>,
}

impl Namespace {
    fn new(case: Case) -> Self {
        Self {
            case,
            claimed: HashMap::new(),
        }
    }

    fn claim(&mut self, name: &str, origin: impl Fn() -> String) -> Result<(), SchemaError> {
        let generated = convert(name, self.case);
        if let Some(first) = self.claimed.get(&generated) {
            return Err(SchemaError::collision(generated, first, origin()));
        }
        self.claimed.insert(generated, origin());
        Ok(())
    }
}

/// Returns the type a field embeds by value, if any.
fn by_value_reference(field_type: &FieldType) -> Option<&str> {
    match field_type {
        FieldType::Reference(name) => Some(name.as_str()),
        FieldType::Object(items) => by_value_reference(items),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_with(name: &str, fields: Vec<FieldDef>) -> TypeDef {
        let mut t = TypeDef::new(name);
        for field in fields {
            t.add_field(field).expect("field");
        }
        t
    }

    #[test]
    fn test_validate_valid_schema() {
        let mut schema = Schema::new("test");
        schema
            .add_type(type_with(
                "user",
                vec![FieldDef::new("name", FieldType::String)],
            ))
            .expect("user");
        schema
            .add_type(type_with(
                "todo",
                vec![FieldDef::new("owner", FieldType::reference("user"))],
            ))
            .expect("todo");
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_unresolved_reference_in_method() {
        let mut schema = Schema::new("test");
        let mut method = MethodDef::new("create_todo");
        method
            .add_output(FieldDef::new("todo", FieldType::reference("todo")))
            .expect("output");
        schema.add_method(method).expect("method");

        let err = validate_schema(&schema).unwrap_err();
        match err {
            SchemaError::UnresolvedReference { name, location } => {
                assert_eq!(name, "todo");
                assert_eq!(location, "method `create_todo` output `todo`");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unresolved_reference_nested_in_array() {
        let mut schema = Schema::new("test");
        schema
            .add_type(type_with(
                "list",
                vec![FieldDef::new(
                    "items",
                    FieldType::array(FieldType::reference("ghost")),
                )],
            ))
            .expect("list");
        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::UnresolvedReference { .. })
        ));
    }

    #[test]
    fn test_self_reference_rejected() {
        let mut schema = Schema::new("test");
        schema
            .add_type(type_with(
                "node",
                vec![FieldDef::new("parent", FieldType::reference("node"))],
            ))
            .expect("node");
        match validate_schema(&schema).unwrap_err() {
            SchemaError::CircularReference { path } => assert_eq!(path, "node -> node"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mutual_reference_through_object_rejected() {
        let mut schema = Schema::new("test");
        schema
            .add_type(type_with(
                "a",
                vec![FieldDef::new("b", FieldType::reference("b"))],
            ))
            .expect("a");
        schema
            .add_type(type_with(
                "b",
                vec![FieldDef::new(
                    "a",
                    FieldType::object(FieldType::reference("a")),
                )],
            ))
            .expect("b");
        match validate_schema(&schema).unwrap_err() {
            SchemaError::CircularReference { path } => assert_eq!(path, "a -> b -> a"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_recursion_through_array_allowed() {
        let mut schema = Schema::new("test");
        schema
            .add_type(type_with(
                "node",
                vec![
                    FieldDef::new("name", FieldType::String),
                    FieldDef::new("children", FieldType::array(FieldType::reference("node"))),
                ],
            ))
            .expect("node");
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_type_colliding_with_payload_rejected() {
        let mut schema = Schema::new("test");
        schema
            .add_type(type_with(
                "create_todo_input",
                vec![FieldDef::new("title", FieldType::String)],
            ))
            .expect("type");
        let mut method = MethodDef::new("createTodo");
        method
            .add_input(FieldDef::new("title", FieldType::String))
            .expect("input");
        schema.add_method(method).expect("method");

        match validate_schema(&schema).unwrap_err() {
            SchemaError::NameCollision {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "CreateTodoInput");
                assert_eq!(first, "type `create_todo_input`");
                assert_eq!(second, "input of method `createTodo`");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_payload_name_unused_by_shape_is_free() {
        let mut schema = Schema::new("test");
        schema
            .add_type(type_with("ping_input", vec![]))
            .expect("type");
        schema.add_method(MethodDef::new("ping")).expect("method");
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_methods_colliding_after_casing_rejected() {
        let mut schema = Schema::new("test");
        schema.add_method(MethodDef::new("ping")).expect("ping");
        schema.add_method(MethodDef::new("Ping")).expect("Ping");
        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::NameCollision { ref name, .. }) if name == "Ping"
        ));
    }

    #[test]
    fn test_fields_colliding_after_casing_rejected() {
        let mut schema = Schema::new("test");
        schema
            .add_type(type_with(
                "todo",
                vec![
                    FieldDef::new("created_at", FieldType::Timestamp),
                    FieldDef::new("createdAt", FieldType::Timestamp),
                ],
            ))
            .expect("todo");

        match validate_schema(&schema).unwrap_err() {
            SchemaError::NameCollision {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "created_at");
                assert_eq!(first, "type `todo` field `created_at`");
                assert_eq!(second, "type `todo` field `createdAt`");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_same_field_in_different_owners_allowed() {
        let mut schema = Schema::new("test");
        schema
            .add_type(type_with("a", vec![FieldDef::new("name", FieldType::String)]))
            .expect("a");
        schema
            .add_type(type_with("b", vec![FieldDef::new("name", FieldType::String)]))
            .expect("b");
        let mut method = MethodDef::new("rename");
        method
            .add_input(FieldDef::new("name", FieldType::String))
            .expect("input");
        method
            .add_output(FieldDef::new("name", FieldType::String))
            .expect("output");
        schema.add_method(method).expect("method");
        assert!(validate_schema(&schema).is_ok());
    }

    #[test]
    fn test_shared_type_is_not_a_cycle() {
        let mut schema = Schema::new("test");
        schema
            .add_type(type_with("leaf", vec![FieldDef::new("v", FieldType::Int)]))
            .expect("leaf");
        schema
            .add_type(type_with(
                "pair",
                vec![
                    FieldDef::new("left", FieldType::reference("leaf")),
                    FieldDef::new("right", FieldType::reference("leaf")),
                ],
            ))
            .expect("pair");
        assert!(validate_schema(&schema).is_ok());
    }
}
