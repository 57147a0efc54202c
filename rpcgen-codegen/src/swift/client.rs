//! Swift URLSession client generation.

use super::{member_name, type_name};
use crate::defaults::string_literal;
use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use rpcgen_schema::{MethodShape, Schema};

/// Generator for a Swift client struct using async URLSession calls.
pub struct SwiftClientGenerator;

impl Generator for SwiftClientGenerator {
    fn name(&self) -> &'static str {
        "swift-client"
    }

    fn language(&self) -> &'static str {
        "swift"
    }

    fn extension(&self) -> &'static str {
        "swift"
    }

    fn render(&self, schema: &Schema, options: &GenerateOptions) -> Result<String, CodegenError> {
        let client = &options.client_name;
        let mut output = String::new();
        output.push_str("// Code generated by rpcgen. DO NOT EDIT.\n\n");
        output.push_str("import Foundation\n\n");
        output.push_str(&format!("// {client} is the API client.\n"));
        output.push_str(&format!("struct {client} {{\n"));
        output.push_str(FIELDS);

        for method in schema.methods() {
            let func = member_name(&method.name);
            let payload = type_name(&method.name);
            let wire = string_literal(&method.name);
            let bare = func.trim_matches('`');
            if method.description.is_empty() {
                output.push_str(&format!("    // {bare} calls {}.\n", method.name));
            } else {
                output.push_str(&format!("    // {bare} {}\n", method.description));
            }

            match method.shape() {
                MethodShape::InputOnly => {
                    output.push_str(&format!(
                        "    func {func}(_ input: {payload}Input) async throws {{\n"
                    ));
                    output.push_str(&format!(
                        "        _ = try await send(method: {wire}, body: try encoder.encode(input))\n"
                    ));
                }
                MethodShape::OutputOnly => {
                    output.push_str(&format!(
                        "    func {func}() async throws -> {payload}Output {{\n"
                    ));
                    output.push_str(&format!(
                        "        let data = try await send(method: {wire}, body: nil)\n"
                    ));
                    output.push_str(&format!(
                        "        return try decoder.decode({payload}Output.self, from: data)\n"
                    ));
                }
                MethodShape::Bidirectional => {
                    output.push_str(&format!(
                        "    func {func}(_ input: {payload}Input) async throws -> {payload}Output {{\n"
                    ));
                    output.push_str(&format!(
                        "        let data = try await send(method: {wire}, body: try encoder.encode(input))\n"
                    ));
                    output.push_str(&format!(
                        "        return try decoder.decode({payload}Output.self, from: data)\n"
                    ));
                }
                MethodShape::Empty => {
                    output.push_str(&format!("    func {func}() async throws {{\n"));
                    output.push_str(&format!(
                        "        _ = try await send(method: {wire}, body: nil)\n"
                    ));
                }
            }
            output.push_str("    }\n\n");
        }

        output.push_str(SEND);
        Ok(output)
    }
}

const FIELDS: &str = "    // encoder is the conventional json encoder.
    let encoder = JSONEncoder()

    // decoder is the conventional json decoder.
    let decoder = JSONDecoder()

    // url is the required API endpoint address.
    let url: URL

    // authToken is an optional authentication token.
    var authToken: String?

    // session is the client used for making requests, defaulting to URLSession.shared.
    var session: URLSession = URLSession.shared

";

const SEND: &str = r#"    // send implementation.
    private func send(method: String, body: Data?) async throws -> Data {
        var request = URLRequest(url: url.appendingPathComponent(method, isDirectory: false))
        request.httpMethod = "POST"
        request.setValue("application/json", forHTTPHeaderField: "Content-Type")
        if let token = authToken {
            request.setValue("Bearer " + token, forHTTPHeaderField: "Authorization")
        }
        request.httpBody = body

        let (data, response) = try await session.data(for: request)
        guard let http = response as? HTTPURLResponse else {
            throw URLError(.badServerResponse)
        }

        // error
        if http.statusCode >= 300 {
            let status = HTTPURLResponse.localizedString(forStatusCode: http.statusCode)
            let body = try? decoder.decode(ResponseErrorBody.self, from: data)
            throw HTTPError(
                status: status,
                statusCode: http.statusCode,
                type: body?.type ?? "",
                message: body?.message ?? ""
            )
        }

        return data
    }
}

struct HTTPError: Error {
    let status: String
    let statusCode: Int
    let type: String
    let message: String
}

struct ResponseErrorBody: Codable {
    let type: String
    let message: String
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::todo_schema;

    fn render(options: &GenerateOptions) -> String {
        SwiftClientGenerator
            .generate_string(&todo_schema(), options)
            .expect("generate")
    }

    #[test]
    fn test_client_named() {
        let output = render(&GenerateOptions::default().with_client_name("TodoClient"));
        assert!(output.contains("// TodoClient is the API client.\nstruct TodoClient {\n"));
        assert!(output.contains("struct ResponseErrorBody: Codable {\n"));
    }

    #[test]
    fn test_method_shapes() {
        let output = render(&GenerateOptions::default());
        assert!(output.contains(
            "    func createTodo(_ input: CreateTodoInput) async throws -> CreateTodoOutput {\n"
        ));
        assert!(output.contains("    func addItem(_ input: AddItemInput) async throws {\n"));
        assert!(output.contains("    func listTodos() async throws -> ListTodosOutput {\n"));
        assert!(output.contains(
            "    func ping() async throws {\n        _ = try await send(method: \"ping\", body: nil)\n"
        ));
    }
}
