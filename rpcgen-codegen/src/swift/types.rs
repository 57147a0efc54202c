//! Swift Codable struct generation.

use super::{SwiftMapping, initial_expr, member_name, type_name};
use crate::defaults::{record_defaults, string_literal};
use crate::docs::{field_doc, type_doc};
use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use crate::mapping::map_type;
use crate::rules::{Rule, field_rules, has_rules};
use crate::shape::{Record, records};
use rpcgen_schema::{Case, FieldDef, FieldType, Schema, convert};

/// Generator for Swift Codable structs.
pub struct SwiftTypesGenerator;

impl Generator for SwiftTypesGenerator {
    fn name(&self) -> &'static str {
        "swift-types"
    }

    fn language(&self) -> &'static str {
        "swift"
    }

    fn extension(&self) -> &'static str {
        "swift"
    }

    fn render(&self, schema: &Schema, options: &GenerateOptions) -> Result<String, CodegenError> {
        let records = records(schema);
        let validate = options.validate && records.iter().any(|r| has_rules(r.fields));

        let mut output = String::new();
        output.push_str("// Code generated by rpcgen. DO NOT EDIT.\n\n");
        output.push_str("import Foundation\n\n");
        if validate {
            output.push_str(VALIDATION_ERROR);
        }

        for record in &records {
            output.push_str(&write_struct(schema, record, validate)?);
        }
        Ok(output)
    }
}

fn write_struct(
    schema: &Schema,
    record: &Record<'_>,
    validate: bool,
) -> Result<String, CodegenError> {
    let name = type_name(&record.name());
    let description = if record.is_payload() {
        "params."
    } else {
        record.description
    };

    let mut output = String::new();
    output.push_str(&format!("// {}\n", type_doc(&name, description)));
    output.push_str(&format!("struct {name}: Codable {{\n"));

    let defaults = record_defaults(schema, record)?;
    for (i, (field, value)) in defaults.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let member = member_name(&field.name);
        let field_type = map_type(&SwiftMapping, schema, &field.field_type, record.locate(field))?;
        let doc = field_doc(&convert(&field.name, Case::Camel), field);
        output.push_str(&format!("    // {doc}\n"));
        output.push_str(&format!(
            "    var {member}: {field_type} = {}\n",
            initial_expr(value)
        ));
    }

    if record
        .fields
        .iter()
        .any(|f| convert(&f.name, Case::Camel) != f.name)
    {
        output.push_str("\n    enum CodingKeys: String, CodingKey {\n");
        for field in record.fields {
            let member = member_name(&field.name);
            if convert(&field.name, Case::Camel) == field.name {
                output.push_str(&format!("        case {member}\n"));
            } else {
                output.push_str(&format!(
                    "        case {member} = {}\n",
                    string_literal(&field.name)
                ));
            }
        }
        output.push_str("    }\n");
    }

    if validate && has_rules(record.fields) {
        output.push_str(&write_validate(record));
    }

    output.push_str("}\n\n");
    Ok(output)
}

fn write_validate(record: &Record<'_>) -> String {
    let mut output = String::new();
    output.push_str("\n    // validate checks the field constraints.\n");
    output.push_str("    func validate() throws {\n");
    for field in record.fields {
        let member = member_name(&field.name);
        for rule in field_rules(field) {
            let (condition, message) = match rule {
                Rule::Required => (format!("{member}.isEmpty"), "is required".to_string()),
                Rule::OneOf(values) => {
                    let list: Vec<String> = values.iter().map(|v| string_literal(v)).collect();
                    (
                        format!("![{}].contains({member})", list.join(", ")),
                        format!("must be one of {}", values.join(", ")),
                    )
                }
                Rule::Minimum(min) => (
                    format!("{} < {min}", bound_operand(&member, field, min)),
                    format!("must be at least {min}"),
                ),
                Rule::Maximum(max) => (
                    format!("{} > {max}", bound_operand(&member, field, max)),
                    format!("must be at most {max}"),
                ),
            };
            output.push_str(&format!("        if {condition} {{\n"));
            output.push_str(&format!(
                "            throw ValidationError(field: {}, message: {})\n",
                string_literal(&field.name),
                string_literal(&message)
            ));
            output.push_str("        }\n");
        }
    }
    output.push_str("    }\n");
    output
}

/// Widens an `Int` member to `Double` for a fractional bound.
fn bound_operand(member: &str, field: &FieldDef, bound: f64) -> String {
    if matches!(field.field_type, FieldType::Int) && bound.fract() != 0.0 {
        format!("Double({member})")
    } else {
        member.to_string()
    }
}

const VALIDATION_ERROR: &str = "// ValidationError is thrown when a field violates a constraint.
struct ValidationError: Error {
    let field: String
    let message: String
}

";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::todo_schema;

    fn render(options: &GenerateOptions) -> String {
        SwiftTypesGenerator
            .generate_string(&todo_schema(), options)
            .expect("generate")
    }

    #[test]
    fn test_structs() {
        let output = render(&GenerateOptions::default());
        assert!(output.contains("import Foundation\n"));
        assert!(output.contains(
            "// Todo is a to-do item.\nstruct Todo: Codable {\n    // id is the id of the item. This field is read-only.\n    var id: String = \"\"\n"
        ));
        assert!(output.contains("    var items: [Todo] = []\n"));
        assert!(output.contains("    var limit: Int = 25\n"));
        assert!(output.contains("    var createdAt: Date = Date(timeIntervalSince1970: 0)\n"));
        assert!(output.contains("    var todo: Todo = Todo()\n"));
        assert!(output.contains("// CreateTodoInput params.\nstruct CreateTodoInput: Codable {\n"));
        assert!(!output.contains("ValidationError"));
    }

    #[test]
    fn test_coding_keys_only_when_renamed() {
        let output = render(&GenerateOptions::default());
        assert!(output.contains(
            "    enum CodingKeys: String, CodingKey {\n        case items\n        case limit\n        case createdAt = \"created_at\"\n        case score\n    }\n"
        ));
        let todo = output.find("struct Todo: Codable").expect("todo");
        let page = output.find("struct Page: Codable").expect("page");
        assert!(!output[todo..page].contains("CodingKeys"));
    }

    #[test]
    fn test_validate() {
        let output = render(&GenerateOptions::default().with_validate(true));
        assert!(output.contains("struct ValidationError: Error {\n"));
        assert!(output.contains(
            "    func validate() throws {\n        if title.isEmpty {\n            throw ValidationError(field: \"title\", message: \"is required\")\n        }\n"
        ));
        assert!(output.contains("        if limit < 1 {\n"));
    }

    #[test]
    fn test_fractional_bound_on_int() {
        let schema = rpcgen_schema::load_schema(
            r#"{ "types": { "quota": { "properties": {
                "count": { "type": "int", "minimum": 0.5, "maximum": 9 }
            } } } }"#,
        )
        .expect("load");
        let output = SwiftTypesGenerator
            .generate_string(&schema, &GenerateOptions::default().with_validate(true))
            .expect("generate");
        assert!(output.contains("        if Double(count) < 0.5 {\n"));
        assert!(output.contains("        if count > 9 {\n"));
    }
}
