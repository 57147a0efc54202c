//! Method-shape dispatch and the record ordering policy.
//!
//! Every backend emits the same sequence of records: schema types in
//! declaration order, then for each method its input payload and its output
//! payload, present according to the method shape. Payload names are derived
//! from the method name (`create_todo` gives `create_todo_input`) and then
//! cased by each backend.

use rpcgen_schema::{FieldDef, FieldLocation, MethodDef, MethodShape, Schema, TypeDef};

/// Where a record comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A schema type.
    Type,
    /// A method input payload.
    Input,
    /// A method output payload.
    Output,
}

/// A record to emit: a schema type or a method payload.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Record kind.
    pub kind: RecordKind,
    /// Owning type or method name.
    pub owner: &'a str,
    /// Description of the owning type; empty for payloads.
    pub description: &'a str,
    /// Fields in declaration order.
    pub fields: &'a [FieldDef],
}

impl<'a> Record<'a> {
    /// Creates the record of a schema type.
    #[must_use]
    pub fn of_type(type_def: &'a TypeDef) -> Self {
        Self {
            kind: RecordKind::Type,
            owner: &type_def.name,
            description: &type_def.description,
            fields: &type_def.properties,
        }
    }

    /// Creates the input payload record of a method, if it has one.
    #[must_use]
    pub fn input(method: &'a MethodDef) -> Option<Self> {
        method.shape().has_input().then(|| Self {
            kind: RecordKind::Input,
            owner: &method.name,
            description: "",
            fields: &method.inputs,
        })
    }

    /// Creates the output payload record of a method, if it has one.
    #[must_use]
    pub fn output(method: &'a MethodDef) -> Option<Self> {
        method.shape().has_output().then(|| Self {
            kind: RecordKind::Output,
            owner: &method.name,
            description: "",
            fields: &method.outputs,
        })
    }

    /// Schema-style name of the record, ready for casing.
    #[must_use]
    pub fn name(&self) -> String {
        match self.kind {
            RecordKind::Type => self.owner.to_string(),
            RecordKind::Input => input_name(self.owner),
            RecordKind::Output => output_name(self.owner),
        }
    }

    /// Returns true for method payloads.
    #[must_use]
    pub fn is_payload(&self) -> bool {
        self.kind != RecordKind::Type
    }

    /// Location of one of this record's fields.
    #[must_use]
    pub fn locate(&self, field: &'a FieldDef) -> FieldLocation<'a> {
        match self.kind {
            RecordKind::Type => FieldLocation::Type {
                owner: self.owner,
                field: &field.name,
            },
            RecordKind::Input => FieldLocation::Input {
                owner: self.owner,
                field: &field.name,
            },
            RecordKind::Output => FieldLocation::Output {
                owner: self.owner,
                field: &field.name,
            },
        }
    }
}

/// Returns all records of the schema in emission order.
#[must_use]
pub fn records(schema: &Schema) -> Vec<Record<'_>> {
    let mut out: Vec<Record<'_>> = schema.types().iter().map(Record::of_type).collect();
    for method in schema.methods() {
        out.extend(Record::input(method));
        out.extend(Record::output(method));
    }
    out
}

/// Schema-style name of a method's input payload.
#[must_use]
pub fn input_name(method: &str) -> String {
    format!("{method}_input")
}

/// Schema-style name of a method's output payload.
#[must_use]
pub fn output_name(method: &str) -> String {
    format!("{method}_output")
}

/// Call signature derived from a method's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Method shape.
    pub shape: MethodShape,
    /// Schema-style name of the argument payload, if any.
    pub input: Option<String>,
    /// Schema-style name of the returned payload, if any.
    pub output: Option<String>,
}

impl Call {
    /// Derives the call signature of a method.
    #[must_use]
    pub fn of(method: &MethodDef) -> Self {
        let shape = method.shape();
        Self {
            shape,
            input: shape.has_input().then(|| input_name(&method.name)),
            output: shape.has_output().then(|| output_name(&method.name)),
        }
    }

    /// Number of call arguments (zero or one).
    #[must_use]
    pub fn arity(&self) -> usize {
        usize::from(self.input.is_some())
    }

    /// Returns true if the call returns a payload.
    #[must_use]
    pub fn returns(&self) -> bool {
        self.output.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpcgen_schema::FieldType;

    fn method(name: &str, inputs: &[&str], outputs: &[&str]) -> MethodDef {
        let mut m = MethodDef::new(name);
        for input in inputs {
            m.add_input(FieldDef::new(*input, FieldType::String))
                .expect("input");
        }
        for output in outputs {
            m.add_output(FieldDef::new(*output, FieldType::String))
                .expect("output");
        }
        m
    }

    #[test]
    fn test_call_arity_per_shape() {
        let cases = [
            (method("add", &["text"], &[]), 1, false),
            (method("list", &[], &["items"]), 0, true),
            (method("get", &["id"], &["item"]), 1, true),
            (method("ping", &[], &[]), 0, false),
        ];
        for (m, arity, returns) in cases {
            let call = Call::of(&m);
            assert_eq!(call.arity(), arity, "{}", m.name);
            assert_eq!(call.returns(), returns, "{}", m.name);
        }
    }

    #[test]
    fn test_call_payload_names() {
        let call = Call::of(&method("create_todo", &["title"], &["todo"]));
        assert_eq!(call.shape, MethodShape::Bidirectional);
        assert_eq!(call.input.as_deref(), Some("create_todo_input"));
        assert_eq!(call.output.as_deref(), Some("create_todo_output"));
    }

    #[test]
    fn test_records_order() {
        let mut schema = Schema::new("test");
        schema.add_type(TypeDef::new("todo")).expect("todo");
        schema.add_type(TypeDef::new("user")).expect("user");
        schema
            .add_method(method("create_todo", &["title"], &["todo"]))
            .expect("create");
        schema.add_method(method("ping", &[], &[])).expect("ping");
        schema
            .add_method(method("list_todos", &[], &["todos"]))
            .expect("list");

        let names: Vec<String> = records(&schema).iter().map(Record::name).collect();
        assert_eq!(
            names,
            vec![
                "todo",
                "user",
                "create_todo_input",
                "create_todo_output",
                "list_todos_output"
            ]
        );
    }

    #[test]
    fn test_record_locate() {
        let m = method("create_todo", &["title"], &[]);
        let record = Record::input(&m).expect("input");
        assert!(record.is_payload());
        assert_eq!(
            record.locate(&m.inputs[0]).to_string(),
            "method `create_todo` input `title`"
        );
        assert!(Record::output(&m).is_none());
    }
}
