//! SQL dialects.

use crate::generator::SqlDialect;

/// Column types and syntax of a SQL dialect.
pub trait Dialect: Send + Sync {
    /// Dialect name.
    fn name(&self) -> &'static str;

    /// Text column type.
    fn text(&self) -> &'static str;

    /// Integer column type.
    fn integer(&self) -> &'static str;

    /// Boolean column type.
    fn boolean(&self) -> &'static str;

    /// Floating point column type.
    fn real(&self) -> &'static str;

    /// Timestamp column type.
    fn timestamp(&self) -> &'static str;

    /// Column type for nested JSON values.
    fn json(&self) -> &'static str;

    /// Boolean literal.
    fn bool_literal(&self, value: bool) -> &'static str;

    /// Positional parameter, 1-based.
    fn placeholder(&self, index: usize) -> String;

    /// Quotes an identifier.
    fn quote_ident(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// SQLite.
pub struct Sqlite;

impl Dialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn text(&self) -> &'static str {
        "TEXT"
    }

    fn integer(&self) -> &'static str {
        "INTEGER"
    }

    fn boolean(&self) -> &'static str {
        "INTEGER"
    }

    fn real(&self) -> &'static str {
        "REAL"
    }

    fn timestamp(&self) -> &'static str {
        "TEXT"
    }

    fn json(&self) -> &'static str {
        "TEXT"
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "1" } else { "0" }
    }

    fn placeholder(&self, index: usize) -> String {
        format!("?{index}")
    }
}

/// PostgreSQL.
pub struct Postgres;

impl Dialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn text(&self) -> &'static str {
        "TEXT"
    }

    fn integer(&self) -> &'static str {
        "BIGINT"
    }

    fn boolean(&self) -> &'static str {
        "BOOLEAN"
    }

    fn real(&self) -> &'static str {
        "DOUBLE PRECISION"
    }

    fn timestamp(&self) -> &'static str {
        "TIMESTAMPTZ"
    }

    fn json(&self) -> &'static str {
        "JSONB"
    }

    fn bool_literal(&self, value: bool) -> &'static str {
        if value { "TRUE" } else { "FALSE" }
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${index}")
    }
}

/// Returns the dialect implementation for an option value.
#[must_use]
pub fn dialect_for(dialect: SqlDialect) -> &'static dyn Dialect {
    match dialect {
        SqlDialect::Sqlite => &Sqlite,
        SqlDialect::Postgres => &Postgres,
    }
}
