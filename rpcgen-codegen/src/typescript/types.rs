//! TypeScript interface generation.

use super::{TypeScriptMapping, factory_name, initial_expr, property_key, type_name};
use crate::defaults::record_defaults;
use crate::docs::{field_doc, type_doc};
use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use crate::mapping::map_type;
use crate::shape::{Record, records};
use rpcgen_schema::Schema;

/// Generator for TypeScript interfaces and default factories.
pub struct TypeScriptTypesGenerator;

impl Generator for TypeScriptTypesGenerator {
    fn name(&self) -> &'static str {
        "typescript-types"
    }

    fn language(&self) -> &'static str {
        "typescript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn render(&self, schema: &Schema, _options: &GenerateOptions) -> Result<String, CodegenError> {
        let mut output = String::new();
        output.push_str("// Code generated by rpcgen. DO NOT EDIT.\n\n");
        for record in records(schema) {
            output.push_str(&write_interface(schema, &record)?);
            output.push_str(&write_factory(schema, &record)?);
        }
        Ok(output)
    }
}

fn write_interface(schema: &Schema, record: &Record<'_>) -> Result<String, CodegenError> {
    let name = type_name(&record.name());
    let description = if record.is_payload() {
        "params."
    } else {
        record.description
    };

    let mut output = String::new();
    output.push_str(&format!("// {}\n", type_doc(&name, description)));
    output.push_str(&format!("export interface {name} {{\n"));
    for (i, field) in record.fields.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let field_type =
            map_type(&TypeScriptMapping, schema, &field.field_type, record.locate(field))?;
        let modifier = if field.read_only { "readonly " } else { "" };
        output.push_str(&format!("  // {}\n", field_doc(&field.name, field)));
        output.push_str(&format!(
            "  {modifier}{}: {field_type}\n",
            property_key(&field.name)
        ));
    }
    output.push_str("}\n\n");
    Ok(output)
}

fn write_factory(schema: &Schema, record: &Record<'_>) -> Result<String, CodegenError> {
    let name = type_name(&record.name());
    let factory = factory_name(&name);

    let mut output = String::new();
    output.push_str(&format!("// {factory} returns a {name} with default values.\n"));
    output.push_str(&format!("export function {factory}(): {name} {{\n"));
    output.push_str("  return {\n");
    for (field, value) in record_defaults(schema, record)? {
        output.push_str(&format!(
            "    {}: {},\n",
            property_key(&field.name),
            initial_expr(&value)
        ));
    }
    output.push_str("  }\n");
    output.push_str("}\n\n");
    Ok(output)
}
