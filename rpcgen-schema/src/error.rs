//! Error types for schema loading and validation.

use thiserror::Error;

/// Error type for schema loading operations.
///
/// Every variant means the document could not be turned into a well-formed
/// [`Schema`](crate::Schema).
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown field type discriminator.
    #[error("unknown field type '{type_name}' in {location}")]
    UnknownFieldType {
        /// The discriminator that was found.
        type_name: String,
        /// Where the field was declared.
        location: String,
    },

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on {element}")]
    MissingAttribute {
        /// Element description.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Name that cannot be used as an identifier.
    #[error("invalid {kind} name '{name}'")]
    InvalidName {
        /// Kind of definition (type, method, field).
        kind: String,
        /// The rejected name.
        name: String,
    },

    /// Default value that does not fit the field type.
    #[error("invalid default value {value} for {kind} field in {location}")]
    InvalidDefault {
        /// Field kind.
        kind: String,
        /// Rendered default value.
        value: String,
        /// Where the field was declared.
        location: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (type, method, field).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Invalid schema structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },
}

/// Error type for schema resolution and validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document was malformed.
    #[error("malformed schema: {0}")]
    Malformed(#[from] ParseError),

    /// A reference names a type that does not exist.
    #[error("unresolved reference to type '{name}' in {location}")]
    UnresolvedReference {
        /// Referenced type name.
        name: String,
        /// Where the reference was found.
        location: String,
    },

    /// Types contain each other by value.
    #[error("circular type reference detected: {path}")]
    CircularReference {
        /// Path of the cycle, e.g. `a -> b -> a`.
        path: String,
    },

    /// Two definitions yield the same generated identifier.
    #[error("generated name '{name}' of {first} collides with {second}")]
    NameCollision {
        /// The shared generated name.
        name: String,
        /// The definition that claimed the name first.
        first: String,
        /// The definition that collides with it.
        second: String,
    },
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an unknown field type error.
    pub fn unknown_type(type_name: impl Into<String>, location: impl ToString) -> Self {
        Self::UnknownFieldType {
            type_name: type_name.into(),
            location: location.to_string(),
        }
    }

    /// Creates an invalid name error.
    pub fn invalid_name(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidName {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

impl SchemaError {
    /// Creates an unresolved reference error.
    pub fn unresolved(name: impl Into<String>, location: impl ToString) -> Self {
        Self::UnresolvedReference {
            name: name.into(),
            location: location.to_string(),
        }
    }

    /// Creates a name collision error.
    pub fn collision(name: impl Into<String>, first: impl ToString, second: impl ToString) -> Self {
        Self::NameCollision {
            name: name.into(),
            first: first.to_string(),
            second: second.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message() {
        let err = ParseError::duplicate("type", "todo");
        assert_eq!(err.to_string(), "duplicate type definition: 'todo'");
    }

    #[test]
    fn test_unresolved_message_names_type() {
        let err = SchemaError::unresolved("ghost", "type `todo` field `owner`");
        let msg = err.to_string();
        assert!(msg.contains("'ghost'"));
        assert!(msg.contains("type `todo` field `owner`"));
    }

    #[test]
    fn test_collision_message_names_both_origins() {
        let err = SchemaError::collision(
            "CreateTodoInput",
            "type `create_todo_input`",
            "input of method `create_todo`",
        );
        assert_eq!(
            err.to_string(),
            "generated name 'CreateTodoInput' of type `create_todo_input` collides with \
             input of method `create_todo`"
        );
    }

    #[test]
    fn test_malformed_from_parse() {
        let err: SchemaError = ParseError::structure("no types").into();
        assert!(matches!(err, SchemaError::Malformed(_)));
    }
}
