//! Relational DDL generation.

use super::{Table, dialect_for, table};
use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use rpcgen_schema::Schema;

/// Generator for `CREATE TABLE` statements.
pub struct SqlSchemaGenerator;

impl Generator for SqlSchemaGenerator {
    fn name(&self) -> &'static str {
        "sql-schema"
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
            output.push_str(&create_table(&table, |name| dialect.quote_ident(name)));
        }
        Ok(output)
    }
}

fn create_table(table: &Table, quote: impl Fn(&str) -> String) -> String {
    let mut output = String::new();
    if !table.description.is_empty() {
        output.push_str(&format!("-- {} {}\n", table.name, table.description));
    }
    output.push_str(&format!("CREATE TABLE IF NOT EXISTS {} (\n", quote(&table.name)));

    let lines: Vec<String> = table
        .columns
        .iter()
        .map(|column| {
            let mut line = String::new();
            if let Some(comment) = &column.comment {
                line.push_str(&format!("    -- {comment}\n"));
            }
            line.push_str(&format!("    {} {} NOT NULL", quote(&column.name), column.sql_type));
            if let Some(default) = &column.default {
                line.push_str(&format!(" DEFAULT {default}"));
            }
            if column.primary_key {
                line.push_str(" PRIMARY KEY");
            }
            line
        })
        .collect();
    output.push_str(&lines.join(",\n"));
    output.push_str("\n);\n\n");
    output
}
