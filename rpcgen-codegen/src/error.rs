//! Error types for code generation.

use rpcgen_schema::FieldKind;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] rpcgen_schema::ParseError),

    /// Schema resolution or validation error.
    #[error("schema error: {0}")]
    Schema(#[from] rpcgen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A generator cannot render a field type in this position.
    #[error("{backend} cannot map a {kind} field in {location}")]
    UnsupportedTypeMapping {
        /// Backend (generator) name.
        backend: String,
        /// Field type kind.
        kind: FieldKind,
        /// Where the field was declared.
        location: String,
    },

    /// No generator is registered under this name.
    #[error("unknown generator '{name}'")]
    UnknownGenerator {
        /// Requested name.
        name: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Creates an unsupported type mapping error.
    pub fn unsupported(
        backend: impl Into<String>,
        kind: FieldKind,
        location: impl ToString,
    ) -> Self {
        Self::UnsupportedTypeMapping {
            backend: backend.into(),
            kind,
            location: location.to_string(),
        }
    }

    /// Returns the missing type name if this is an unresolved reference.
    #[must_use]
    pub fn unresolved_reference(&self) -> Option<&str> {
        match self {
            Self::Schema(rpcgen_schema::SchemaError::UnresolvedReference { name, .. }) => {
                Some(name)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpcgen_schema::SchemaError;

    #[test]
    fn test_unresolved_reference_accessor() {
        let err: CodegenError = SchemaError::unresolved("ghost", "type `a` field `b`").into();
        assert_eq!(err.unresolved_reference(), Some("ghost"));
        assert_eq!(CodegenError::generation("x").unresolved_reference(), None);
    }

    #[test]
    fn test_unsupported_message() {
        let err =
            CodegenError::unsupported("sql-schema", FieldKind::Array, "type `todo` field `id`");
        assert_eq!(
            err.to_string(),
            "sql-schema cannot map a array field in type `todo` field `id`"
        );
    }
}
