//! Go struct generation.

use super::{GoMapping, go_name, uses_timestamps, write_imports};
use crate::defaults::string_literal;
use crate::docs::{field_doc, type_doc};
use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use crate::mapping::map_type;
use crate::rules::{Rule, field_rules, has_rules};
use crate::shape::{Record, records};
use rpcgen_schema::{DefaultValue, FieldDef, FieldType, Schema, format_float};

/// Generator for Go structs.
pub struct GoTypesGenerator;

impl Generator for GoTypesGenerator {
    fn name(&self) -> &'static str {
        "go-types"
    }

    fn language(&self) -> &'static str {
        "go"
    }

    fn extension(&self) -> &'static str {
        "go"
    }

    fn render(&self, schema: &Schema, options: &GenerateOptions) -> Result<String, CodegenError> {
        let mut output = String::new();
        output.push_str("// Code generated by rpcgen. DO NOT EDIT.\n\n");
        output.push_str(&format!("package {}\n\n", options.package));

        let mut imports = Vec::new();
        if options.validate && records(schema).iter().any(|r| has_rules(r.fields)) {
            imports.push("fmt");
        }
        if uses_timestamps(schema) {
            imports.push("time");
        }
        write_imports(&mut output, &imports);

        output.push_str(&write_types(schema, options, self.name())?);
        Ok(output)
    }
}

/// Renders every record as a Go struct.
///
/// # Errors
/// Returns `CodegenError` if a field type cannot be mapped.
pub(crate) fn write_types(
    schema: &Schema,
    options: &GenerateOptions,
    backend: &'static str,
) -> Result<String, CodegenError> {
    let mapping = GoMapping::new(backend);
    let mut output = String::new();

    for record in records(schema) {
        let name = go_name(&record.name());
        let description = if record.is_payload() {
            "params."
        } else {
            record.description
        };

        output.push_str(&format!("// {}\n", type_doc(&name, description)));
        output.push_str(&format!("type {name} struct {{\n"));
        for (i, field) in record.fields.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            let field_name = go_name(&field.name);
            let field_type = map_type(&mapping, schema, &field.field_type, record.locate(field))?;
            output.push_str(&format!("\t// {}\n", field_doc(&field_name, field)));
            output.push_str(&format!(
                "\t{field_name} {field_type} {}\n",
                field_tags(&field.name, &schema.go.tags)
            ));
        }
        output.push_str("}\n\n");

        if options.validate {
            output.push_str(&write_validate(&name, &record));
        }
    }

    Ok(output)
}

/// Renders the struct tags of a field.
fn field_tags(name: &str, tags: &[String]) -> String {
    let pairs: Vec<String> = tags.iter().map(|tag| format!("{tag}:\"{name}\"")).collect();
    format!("`{}`", pairs.join(" "))
}

/// Returns true if the record gets a `Validate` method.
pub(crate) fn validates(record: &Record<'_>) -> bool {
    record.fields.iter().any(|f| f.default.is_some()) || has_rules(record.fields)
}

/// Renders a `Validate` method that fills explicit defaults and checks
/// field rules. Records with neither get no method.
fn write_validate(name: &str, record: &Record<'_>) -> String {
    if !validates(record) {
        return String::new();
    }
    let defaults: Vec<&FieldDef> = record
        .fields
        .iter()
        .filter(|f| f.default.is_some())
        .collect();

    let recv = name
        .chars()
        .next()
        .map(|c| c.to_ascii_lowercase())
        .unwrap_or('t');
    let mut output = String::new();
    output.push_str("// Validate implementation.\n");
    output.push_str(&format!("func ({recv} *{name}) Validate() error {{\n"));

    for field in defaults {
        if let Some((zero, value)) = field.default.as_ref().and_then(go_default) {
            let field_name = go_name(&field.name);
            output.push_str(&format!("\tif {recv}.{field_name} == {zero} {{\n"));
            output.push_str(&format!("\t\t{recv}.{field_name} = {value}\n"));
            output.push_str("\t}\n\n");
        }
    }

    for field in record.fields {
        let field_name = go_name(&field.name);
        let target = format!("{recv}.{field_name}");
        for rule in field_rules(field) {
            match rule {
                Rule::Required => {
                    output.push_str(&format!("\tif {target} == \"\" {{\n"));
                    output.push_str(&format!(
                        "\t\treturn fmt.Errorf(\"{}: is required\")\n",
                        field.name
                    ));
                    output.push_str("\t}\n\n");
                }
                Rule::OneOf(values) => {
                    let cases: Vec<String> = values.iter().map(|v| string_literal(v)).collect();
                    output.push_str(&format!("\tswitch {target} {{\n"));
                    output.push_str(&format!("\tcase {}:\n", cases.join(", ")));
                    output.push_str("\tdefault:\n");
                    output.push_str(&format!(
                        "\t\treturn fmt.Errorf(\"{}: must be one of {}\")\n",
                        field.name,
                        values.join(", ")
                    ));
                    output.push_str("\t}\n\n");
                }
                Rule::Minimum(min) => {
                    let operand = bound_operand(&target, field, min);
                    output.push_str(&format!("\tif {operand} < {min} {{\n"));
                    output.push_str(&format!(
                        "\t\treturn fmt.Errorf(\"{}: must be at least {min}\")\n",
                        field.name
                    ));
                    output.push_str("\t}\n\n");
                }
                Rule::Maximum(max) => {
                    let operand = bound_operand(&target, field, max);
                    output.push_str(&format!("\tif {operand} > {max} {{\n"));
                    output.push_str(&format!(
                        "\t\treturn fmt.Errorf(\"{}: must be at most {max}\")\n",
                        field.name
                    ));
                    output.push_str("\t}\n\n");
                }
            }
        }
    }

    output.push_str("\treturn nil\n");
    output.push_str("}\n\n");
    output
}

/// Compares an `int` field against a fractional bound as `float64`, since Go
/// rejects a fractional constant next to an `int`.
fn bound_operand(target: &str, field: &FieldDef, bound: f64) -> String {
    if matches!(field.field_type, FieldType::Int) && bound.fract() != 0.0 {
        format!("float64({target})")
    } else {
        target.to_string()
    }
}

/// Returns the zero literal and default literal for an explicit default.
///
/// Booleans are skipped: a `false` field cannot be told apart from an unset
/// one.
fn go_default(value: &DefaultValue) -> Option<(&'static str, String)> {
    match value {
        DefaultValue::String(s) => Some(("\"\"", string_literal(s))),
        DefaultValue::Int(i) => Some(("0", i.to_string())),
        DefaultValue::Float(f) => Some(("0", format_float(*f))),
        DefaultValue::Bool(_) => None,
    }
}
