//! The generator contract shared by every backend.

use crate::error::CodegenError;
use rpcgen_schema::{Schema, validate_schema};
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Default package (or module) name for generated code.
pub const DEFAULT_PACKAGE: &str = "client";

/// Default name of generated client types.
pub const DEFAULT_CLIENT_NAME: &str = "Client";

/// A code generation backend.
///
/// Backends are stateless: the output is a pure function of the schema and
/// the options, so the same inputs always produce byte-identical text.
pub trait Generator: Send + Sync {
    /// Registry name, e.g. `go-types`.
    fn name(&self) -> &'static str;

    /// Target language.
    fn language(&self) -> &'static str;

    /// File extension of the generated artifact, without the dot.
    fn extension(&self) -> &'static str;

    /// Renders the schema into a string.
    ///
    /// Callers normally go through [`Generator::generate`], which validates
    /// the schema first.
    ///
    /// # Errors
    /// Returns `CodegenError` if a reference cannot be resolved or a field
    /// type cannot be mapped.
    fn render(&self, schema: &Schema, options: &GenerateOptions) -> Result<String, CodegenError>;

    /// Validates and renders the schema into a string.
    ///
    /// # Errors
    /// Returns `CodegenError` if validation or rendering fails.
    fn generate_string(
        &self,
        schema: &Schema,
        options: &GenerateOptions,
    ) -> Result<String, CodegenError> {
        validate_schema(schema)?;
        tracing::debug!(generator = self.name(), schema = %schema.name, "rendering");
        self.render(schema, options)
    }

    /// Validates the schema, renders it and writes the result to `out`.
    ///
    /// Nothing is written unless rendering succeeds.
    ///
    /// # Arguments
    /// * `out` - Output sink
    /// * `schema` - Loaded schema
    /// * `options` - Generation options
    ///
    /// # Errors
    /// Returns `CodegenError` if validation, rendering or writing fails.
    fn generate(
        &self,
        out: &mut dyn Write,
        schema: &Schema,
        options: &GenerateOptions,
    ) -> Result<(), CodegenError> {
        let output = self.generate_string(schema, options)?;
        out.write_all(output.as_bytes())?;
        tracing::info!(
            generator = self.name(),
            bytes = output.len(),
            "generated"
        );
        Ok(())
    }
}

impl fmt::Debug for dyn Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("name", &self.name())
            .field("language", &self.language())
            .finish()
    }
}

/// Options passed to every backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Package or module name of the generated code.
    pub package: String,
    /// Name of generated client types.
    pub client_name: String,
    /// Emit validation helpers where the backend supports them.
    pub validate: bool,
    /// SQL dialect for the relational backends.
    pub dialect: SqlDialect,
    /// Import path of a separately generated Go types package. When set, the
    /// Go server refers to types through it instead of declaring them.
    pub types_package: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            validate: false,
            dialect: SqlDialect::default(),
            types_package: None,
        }
    }
}

impl GenerateOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the package name.
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Sets the client name.
    #[must_use]
    pub fn with_client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = client_name.into();
        self
    }

    /// Enables or disables validation helpers.
    #[must_use]
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Sets the SQL dialect.
    #[must_use]
    pub fn with_dialect(mut self, dialect: SqlDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Sets the import path of the Go types package.
    #[must_use]
    pub fn with_types_package(mut self, path: impl Into<String>) -> Self {
        self.types_package = Some(path.into());
        self
    }
}

/// SQL dialect targeted by the relational backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SqlDialect {
    /// SQLite.
    Sqlite,
    /// PostgreSQL.
    #[default]
    Postgres,
}

impl SqlDialect {
    /// Returns the dialect name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(format!("unknown SQL dialect '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpcgen_schema::{FieldDef, FieldType, TypeDef};

    struct Echo;

    impl Generator for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn language(&self) -> &'static str {
            "text"
        }

        fn extension(&self) -> &'static str {
            "txt"
        }

        fn render(&self, schema: &Schema, _: &GenerateOptions) -> Result<String, CodegenError> {
            Ok(format!("{}\n", schema.name))
        }
    }

    #[test]
    fn test_options_defaults() {
        let options = GenerateOptions::new();
        assert_eq!(options.package, "client");
        assert_eq!(options.client_name, "Client");
        assert!(!options.validate);
        assert_eq!(options.dialect, SqlDialect::Postgres);
    }

    #[test]
    fn test_options_builder() {
        let options = GenerateOptions::new()
            .with_package("api")
            .with_client_name("TodoClient")
            .with_validate(true)
            .with_dialect(SqlDialect::Sqlite);
        assert_eq!(options.package, "api");
        assert_eq!(options.client_name, "TodoClient");
        assert!(options.validate);
        assert_eq!(options.dialect, SqlDialect::Sqlite);
    }

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("SQLite".parse::<SqlDialect>(), Ok(SqlDialect::Sqlite));
        assert_eq!("pg".parse::<SqlDialect>(), Ok(SqlDialect::Postgres));
        assert!("oracle".parse::<SqlDialect>().is_err());
    }

    #[test]
    fn test_generate_writes_output() {
        let schema = Schema::new("todo");
        let mut out = Vec::new();
        Echo.generate(&mut out, &schema, &GenerateOptions::default())
            .expect("generate");
        assert_eq!(out, b"todo\n");
    }

    #[test]
    fn test_generate_writes_nothing_on_error() {
        let mut schema = Schema::new("todo");
        let mut t = TypeDef::new("todo");
        t.add_field(FieldDef::new("owner", FieldType::reference("user")))
            .expect("field");
        schema.add_type(t).expect("type");

        let mut out = Vec::new();
        let err = Echo
            .generate(&mut out, &schema, &GenerateOptions::default())
            .unwrap_err();
        assert_eq!(err.unresolved_reference(), Some("user"));
        assert!(out.is_empty());
    }
}
