//! Named CRUD statement generation.
//!
//! Statements are annotated with `-- name: <Name> :<kind>` comments, the
//! convention of query compilers such as sqlc.

use super::{Dialect, PRIMARY_KEY, Table, dialect_for, table};
use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use rpcgen_schema::{Case, Schema, convert};

/// Generator for get/create/update/upsert/delete statements per table.
pub struct SqlQueriesGenerator;

impl Generator for SqlQueriesGenerator {
    fn name(&self) -> &'static str {
        "sql-queries"
    }

    fn language(&self) -> &'static str {
        "sql"
    }

    fn extension(&self) -> &'static str {
        "sql"
    }

    fn render(&self, schema: &Schema, options: &GenerateOptions) -> Result<String, CodegenError> {
        let dialect = dialect_for(options.dialect);
        let mut output = String::new();
        output.push_str("-- Code generated by rpcgen. DO NOT EDIT.\n");
        output.push_str(&format!("-- Dialect: {}\n\n", dialect.name()));

        for type_def in schema.types() {
            let table = table(schema, type_def, dialect, self.name())?;
            let queries = Queries {
                table: &table,
                dialect,
                name: convert(&table.name, Case::Pascal),
            };
            output.push_str(&queries.get());
            output.push_str(&queries.create());
            output.push_str(&queries.update());
            output.push_str(&queries.upsert());
            output.push_str(&queries.delete());
        }
        Ok(output)
    }
}

struct Queries<'a> {
    table: &'a Table,
    dialect: &'a dyn Dialect,
    name: String,
}

impl Queries<'_> {
    fn quote(&self, name: &str) -> String {
        self.dialect.quote_ident(name)
    }

    fn table_name(&self) -> String {
        self.quote(&self.table.name)
    }

    fn key(&self) -> String {
        self.quote(PRIMARY_KEY)
    }

    fn column_list(&self) -> String {
        self.table
            .columns
            .iter()
            .map(|c| self.quote(&c.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn placeholders(&self) -> String {
        (1..=self.table.columns.len())
            .map(|i| self.dialect.placeholder(i))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn get(&self) -> String {
        format!(
            "-- name: Get{} :one\nSELECT {} FROM {} WHERE {} = {} LIMIT 1;\n\n",
            self.name,
            self.column_list(),
            self.table_name(),
            self.key(),
            self.dialect.placeholder(1)
        )
    }

    fn create(&self) -> String {
        format!(
            "-- name: Create{} :exec\nINSERT INTO {} ({}) VALUES ({});\n\n",
            self.name,
            self.table_name(),
            self.column_list(),
            self.placeholders()
        )
    }

    /// The key binds to the first parameter; values follow in column order.
    fn update(&self) -> String {
        let assignments: Vec<String> = self
            .table
            .values()
            .enumerate()
            .map(|(i, c)| format!("{} = {}", self.quote(&c.name), self.dialect.placeholder(i + 2)))
            .collect();
        if assignments.is_empty() {
            return String::new();
        }
        format!(
            "-- name: Update{} :exec\nUPDATE {} SET {} WHERE {} = {};\n\n",
            self.name,
            self.table_name(),
            assignments.join(", "),
            self.key(),
            self.dialect.placeholder(1)
        )
    }

    fn upsert(&self) -> String {
        let assignments: Vec<String> = self
            .table
            .values()
            .map(|c| {
                let column = self.quote(&c.name);
                format!("{column} = excluded.{column}")
            })
            .collect();
        let conflict = if assignments.is_empty() {
            "DO NOTHING".to_string()
        } else {
            format!("DO UPDATE SET {}", assignments.join(", "))
        };
        format!(
            "-- name: Upsert{} :exec\nINSERT INTO {} ({}) VALUES ({})\nON CONFLICT ({}) {};\n\n",
            self.name,
            self.table_name(),
            self.column_list(),
            self.placeholders(),
            self.key(),
            conflict
        )
    }

    fn delete(&self) -> String {
        format!(
            "-- name: Delete{} :exec\nDELETE FROM {} WHERE {} = {};\n\n",
            self.name,
            self.table_name(),
            self.key(),
            self.dialect.placeholder(1)
        )
    }
}
