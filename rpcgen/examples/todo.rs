//! Example building a to-do schema in code and running every generator.
//!
//! Run with: `cargo run --example todo`
//!
//! Set `RUST_LOG=debug` to see generator logs.

use rpcgen::prelude::*;

fn build_schema() -> Result<Schema, ParseError> {
    let mut schema = Schema::new("todo");

    let mut todo = TypeDef::new("todo").with_description("is a to-do item.");
    todo.add_field(
        FieldDef::new("id", FieldType::String)
            .with_description("the id of the item.")
            .read_only(),
    )?;
    todo.add_field(
        FieldDef::new("title", FieldType::String)
            .with_description("the to-do item text.")
            .required(),
    )?;
    todo.add_field(FieldDef::new("done", FieldType::Bool))?;
    schema.add_type(todo)?;

    let mut create = MethodDef::new("createTodo").with_description("creates a to-do item.");
    create.add_input(FieldDef::new("title", FieldType::String).required())?;
    create.add_output(FieldDef::new("todo", FieldType::reference("todo")))?;
    schema.add_method(create)?;

    let mut list = MethodDef::new("listTodos").with_description("returns all items.");
    list.add_output(FieldDef::new(
        "items",
        FieldType::array(FieldType::reference("todo")),
    ))?;
    schema.add_method(list)?;

    Ok(schema)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let schema = build_schema()?;
    let options = GenerateOptions::default()
        .with_package("todo")
        .with_client_name("TodoClient")
        .with_validate(true);

    for generator in generators() {
        let code = generator.generate_string(&schema, &options)?;
        println!("==> {}.{} <==", generator.name(), generator.extension());
        println!("{code}");
    }

    Ok(())
}
