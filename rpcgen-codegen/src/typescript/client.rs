//! TypeScript fetch client generation.

use super::type_name;
use crate::defaults::string_literal;
use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use rpcgen_schema::{Case, MethodShape, Schema, convert};

/// Generator for a fetch-based TypeScript client class.
///
/// Payload types are imported from the `typescript-types` output, expected
/// next to the client as `./types`.
pub struct TypeScriptClientGenerator;

impl Generator for TypeScriptClientGenerator {
    fn name(&self) -> &'static str {
        "typescript-client"
    }

    fn language(&self) -> &'static str {
        "typescript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn render(&self, schema: &Schema, options: &GenerateOptions) -> Result<String, CodegenError> {
        let client = &options.client_name;
        let mut output = String::new();
        output.push_str("// Code generated by rpcgen. DO NOT EDIT.\n\n");
        output.push_str("import type * as types from \"./types\"\n\n");
        output.push_str(&format!("// {client}Error is an error returned by the API.\n"));
        output.push_str(&format!("export class {client}Error extends Error {{\n"));
        output.push_str("  constructor(\n");
        output.push_str("    readonly status: string,\n");
        output.push_str("    readonly statusCode: number,\n");
        output.push_str("    readonly type: string,\n");
        output.push_str("    message: string,\n");
        output.push_str("  ) {\n");
        output.push_str("    super(message)\n");
        output.push_str("  }\n");
        output.push_str("}\n\n");

        output.push_str(&format!("// {client} is the API client.\n"));
        output.push_str(&format!("export class {client} {{\n"));
        output.push_str("  // url is the required API endpoint address; authToken is optional.\n");
        output.push_str("  constructor(readonly url: string, public authToken?: string) {}\n\n");

        for method in schema.methods() {
            let func = convert(&method.name, Case::Camel);
            let payload = type_name(&method.name);
            let wire = string_literal(&method.name);
            if method.description.is_empty() {
                output.push_str(&format!("  // {func} calls {}.\n", method.name));
            } else {
                output.push_str(&format!("  // {func} {}\n", method.description));
            }

            match method.shape() {
                MethodShape::InputOnly => {
                    output.push_str(&format!(
                        "  async {func}(input: types.{payload}Input): Promise<void> {{\n"
                    ));
                    output.push_str(&format!("    await this.call({wire}, input)\n"));
                }
                MethodShape::OutputOnly => {
                    output.push_str(&format!(
                        "  async {func}(): Promise<types.{payload}Output> {{\n"
                    ));
                    output.push_str(&format!(
                        "    return (await this.call({wire})) as types.{payload}Output\n"
                    ));
                }
                MethodShape::Bidirectional => {
                    output.push_str(&format!(
                        "  async {func}(input: types.{payload}Input): Promise<types.{payload}Output> {{\n"
                    ));
                    output.push_str(&format!(
                        "    return (await this.call({wire}, input)) as types.{payload}Output\n"
                    ));
                }
                MethodShape::Empty => {
                    output.push_str(&format!("  async {func}(): Promise<void> {{\n"));
                    output.push_str(&format!("    await this.call({wire})\n"));
                }
            }
            output.push_str("  }\n\n");
        }

        output.push_str(&CALL.replace("{client}", client));
        Ok(output)
    }
}

const CALL: &str = r#"  // call implementation.
  private async call(method: string, input?: unknown): Promise<unknown> {
    const headers: Record<string, string> = { "Content-Type": "application/json" }
    if (this.authToken) {
      headers["Authorization"] = `Bearer ${this.authToken}`
    }

    const res = await fetch(`${this.url}/${method}`, {
      method: "POST",
      headers,
      body: input === undefined ? undefined : JSON.stringify(input),
    })

    // error
    if (res.status >= 300) {
      let type = ""
      let message = res.statusText
      if (res.headers.get("Content-Type") === "application/json") {
        const body = await res.json()
        type = body.type
        message = body.message
      }
      throw new {client}Error(res.statusText, res.status, type, message)
    }

    const text = await res.text()
    return text ? JSON.parse(text) : undefined
  }
}
"#;
