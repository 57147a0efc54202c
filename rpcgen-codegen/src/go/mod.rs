//! Go code generation.

pub mod client;
pub mod server;
pub mod types;

pub use client::GoClientGenerator;
pub use server::GoServerGenerator;
pub use types::GoTypesGenerator;

use crate::error::CodegenError;
use crate::mapping::TypeMapping;
use crate::shape::{RecordKind, records};
use rpcgen_schema::{Case, FieldType, Schema, TypeDef, convert};

/// Go type mapping.
pub struct GoMapping {
    backend: &'static str,
}

impl GoMapping {
    /// Creates the mapping for the named backend.
    #[must_use]
    pub const fn new(backend: &'static str) -> Self {
        Self { backend }
    }
}

impl TypeMapping for GoMapping {
    fn backend(&self) -> &'static str {
        self.backend
    }

    fn string(&self) -> Option<String> {
        Some("string".to_string())
    }

    fn int(&self) -> Option<String> {
        Some("int".to_string())
    }

    fn bool(&self) -> Option<String> {
        Some("bool".to_string())
    }

    fn float(&self) -> Option<String> {
        Some("float64".to_string())
    }

    fn timestamp(&self) -> Option<String> {
        Some("time.Time".to_string())
    }

    fn object(&self, items: String) -> Option<String> {
        Some(items)
    }

    fn array(&self, items: String) -> Option<String> {
        Some(format!("[]{items}"))
    }

    fn reference(&self, target: &TypeDef) -> Option<String> {
        Some(go_name(&target.name))
    }
}

/// Exported Go identifier for a schema name.
#[must_use]
pub fn go_name(name: &str) -> String {
    convert(name, Case::GoExported)
}

/// Returns true if any field of the schema holds a timestamp.
pub(crate) fn uses_timestamps(schema: &Schema) -> bool {
    fn holds(field_type: &FieldType) -> bool {
        match field_type {
            FieldType::Timestamp => true,
            FieldType::Object(items) | FieldType::Array(items) => holds(items),
            _ => false,
        }
    }
    schema.fields().any(|(_, field)| holds(&field.field_type))
}

/// Rejects a record whose Go name is also declared by the generated file.
///
/// # Errors
/// Returns `CodegenError::Generation` naming the record and the declaration.
pub(crate) fn check_declarations(schema: &Schema, declared: &[&str]) -> Result<(), CodegenError> {
    for record in records(schema) {
        let name = go_name(&record.name());
        if declared.contains(&name.as_str()) {
            let origin = match record.kind {
                RecordKind::Type => format!("type `{}`", record.owner),
                RecordKind::Input => format!("input of method `{}`", record.owner),
                RecordKind::Output => format!("output of method `{}`", record.owner),
            };
            return Err(CodegenError::generation(format!(
                "{origin} collides with generated Go declaration `{name}`"
            )));
        }
    }
    Ok(())
}

/// Renders an import block.
pub(crate) fn write_imports(output: &mut String, imports: &[&str]) {
    match imports {
        [] => {}
        [single] => output.push_str(&format!("import \"{single}\"\n\n")),
        many => {
            output.push_str("import (\n");
            for import in many {
                output.push_str(&format!("\t\"{import}\"\n"));
            }
            output.push_str(")\n\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::map_type;
    use rpcgen_schema::FieldLocation;

    const LOCATION: FieldLocation<'static> = FieldLocation::Type {
        owner: "t",
        field: "f",
    };

    #[test]
    fn test_go_name_initialisms() {
        assert_eq!(go_name("user_id"), "UserID");
        assert_eq!(go_name("createTodo"), "CreateTodo");
        assert_eq!(go_name("api_url"), "APIURL");
    }

    #[test]
    fn test_mapping() {
        let schema = Schema::new("test");
        let mapping = GoMapping::new("go-types");
        let cases = [
            (FieldType::String, "string"),
            (FieldType::Int, "int"),
            (FieldType::Bool, "bool"),
            (FieldType::Float, "float64"),
            (FieldType::Timestamp, "time.Time"),
            (FieldType::array(FieldType::array(FieldType::Int)), "[][]int"),
            (FieldType::object(FieldType::String), "string"),
        ];
        for (ft, expected) in cases {
            assert_eq!(map_type(&mapping, &schema, &ft, LOCATION).expect("map"), expected);
        }
    }

    #[test]
    fn test_check_declarations() {
        let mut schema = Schema::new("test");
        schema.add_type(TypeDef::new("error")).expect("type");
        let err = check_declarations(&schema, &["Client", "Error"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "generation error: type `error` collides with generated Go declaration `Error`"
        );
        assert!(check_declarations(&schema, &["Client"]).is_ok());
    }

    #[test]
    fn test_write_imports() {
        let mut output = String::new();
        write_imports(&mut output, &["time"]);
        assert_eq!(output, "import \"time\"\n\n");

        let mut output = String::new();
        write_imports(&mut output, &["fmt", "time"]);
        assert_eq!(output, "import (\n\t\"fmt\"\n\t\"time\"\n)\n\n");
    }
}
