//! Kotlin data class generation.

use super::{KotlinMapping, class_name, initial_expr, member_name};
use crate::defaults::{record_defaults, string_literal};
use crate::docs::{field_doc, type_doc};
use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use crate::mapping::map_type;
use crate::rules::{Rule, field_rules, has_rules};
use crate::shape::{Record, RecordKind, records};
use rpcgen_schema::{Case, Schema, convert};

/// Generator for kotlinx.serialization data classes.
pub struct KotlinTypesGenerator;

impl Generator for KotlinTypesGenerator {
    fn name(&self) -> &'static str {
        "kotlin-types"
    }

    fn language(&self) -> &'static str {
        "kotlin"
    }

    fn extension(&self) -> &'static str {
        "kt"
    }

    fn render(&self, schema: &Schema, options: &GenerateOptions) -> Result<String, CodegenError> {
        let mut output = String::new();
        output.push_str("// Code generated by rpcgen. DO NOT EDIT.\n\n");
        output.push_str(&format!("package {}\n\n", options.package));
        output.push_str("import kotlinx.serialization.SerialName\n");
        output.push_str("import kotlinx.serialization.Serializable\n\n");

        for record in records(schema) {
            output.push_str(&write_class(schema, &record, options.validate)?);
        }
        Ok(output)
    }
}

fn write_class(
    schema: &Schema,
    record: &Record<'_>,
    validate: bool,
) -> Result<String, CodegenError> {
    let name = class_name(&record.name());
    let mut output = String::new();

    // KDoc
    output.push_str("/**\n");
    let summary = match record.kind {
        RecordKind::Type => type_doc(&name, record.description),
        RecordKind::Input => {
            format!("{} input params.", convert(record.owner, Case::Camel))
        }
        RecordKind::Output => {
            format!("{} output params.", convert(record.owner, Case::Camel))
        }
    };
    output.push_str(&format!(" * {summary}\n"));
    for field in record.fields {
        let doc = field_doc(&convert(&field.name, Case::Camel), field);
        output.push_str(&format!(" * @property {doc}\n"));
    }
    output.push_str(" */\n");

    // class
    output.push_str("@Serializable\n");
    output.push_str(&format!("data class {name}(\n"));
    let defaults = record_defaults(schema, record)?;
    let mut params = Vec::with_capacity(defaults.len());
    for (field, value) in &defaults {
        let keyword = if field.read_only { "val" } else { "var" };
        let field_type = map_type(&KotlinMapping, schema, &field.field_type, record.locate(field))?;
        params.push(format!(
            "    @SerialName({}) {keyword} {}: {field_type} = {}",
            string_literal(&field.name),
            member_name(&field.name),
            initial_expr(value)
        ));
    }
    output.push_str(&params.join(",\n"));
    output.push_str("\n)");

    if validate && has_rules(record.fields) {
        output.push_str(" {\n    init {\n");
        for field in record.fields {
            let member = member_name(&field.name);
            for rule in field_rules(field) {
                let (condition, message) = match rule {
                    Rule::Required => (
                        format!("{member}.isNotEmpty()"),
                        format!("{}: is required", field.name),
                    ),
                    Rule::OneOf(values) => {
                        let list: Vec<String> = values.iter().map(|v| string_literal(v)).collect();
                        (
                            format!("{member} in listOf({})", list.join(", ")),
                            format!("{}: must be one of {}", field.name, values.join(", ")),
                        )
                    }
                    Rule::Minimum(min) => (
                        format!("{member} >= {min}"),
                        format!("{}: must be at least {min}", field.name),
                    ),
                    Rule::Maximum(max) => (
                        format!("{member} <= {max}"),
                        format!("{}: must be at most {max}", field.name),
                    ),
                };
                output.push_str(&format!(
                    "        require({condition}) {{ {} }}\n",
                    string_literal(&message)
                ));
            }
        }
        output.push_str("    }\n}");
    }

    output.push_str("\n\n");
    Ok(output)
}
