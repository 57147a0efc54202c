//! Kotlin Ktor client generation.

use super::{class_name, member_name};
use crate::defaults::string_literal;
use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use rpcgen_schema::{MethodShape, Schema};

/// Generator for a Ktor-based Kotlin client class.
pub struct KotlinClientGenerator;

impl Generator for KotlinClientGenerator {
    fn name(&self) -> &'static str {
        "kotlin-client"
    }

    fn language(&self) -> &'static str {
        "kotlin"
    }

    fn extension(&self) -> &'static str {
        "kt"
    }

    fn render(&self, schema: &Schema, options: &GenerateOptions) -> Result<String, CodegenError> {
        let client = &options.client_name;
        let mut output = String::new();
        output.push_str("// Code generated by rpcgen. DO NOT EDIT.\n\n");
        output.push_str(&format!("package {}\n\n", options.package));
        output.push_str(IMPORTS);
        output.push_str(&format!("// {client} is the API client.\n"));
        output.push_str("// url is the required API endpoint address.\n");
        output.push_str(&format!("class {client}(val url: String) {{\n"));
        output.push_str(FIELDS);

        for method in schema.methods() {
            let fun = member_name(&method.name);
            let class = class_name(&method.name);
            let wire = string_literal(&method.name);
            let camel = fun.trim_matches('`');
            if method.description.is_empty() {
                output.push_str(&format!("    // {camel} calls {}.\n", method.name));
            } else {
                output.push_str(&format!("    // {camel} {}\n", method.description));
            }

            match method.shape() {
                MethodShape::InputOnly => {
                    output.push_str(&format!("    suspend fun {fun}(input: {class}Input) {{\n"));
                    output.push_str(&format!(
                        "        call(method = {wire}, input = json.encodeToString(input))\n"
                    ));
                }
                MethodShape::OutputOnly => {
                    output.push_str(&format!("    suspend fun {fun}(): {class}Output {{\n"));
                    output.push_str(&format!(
                        "        val out = call(method = {wire}, input = \"\")\n"
                    ));
                    output.push_str("        return json.decodeFromString(out)\n");
                }
                MethodShape::Bidirectional => {
                    output.push_str(&format!(
                        "    suspend fun {fun}(\n        input: {class}Input\n    ): {class}Output {{\n"
                    ));
                    output.push_str(&format!(
                        "        val out = call(method = {wire}, input = json.encodeToString(input))\n"
                    ));
                    output.push_str("        return json.decodeFromString(out)\n");
                }
                MethodShape::Empty => {
                    output.push_str(&format!("    suspend fun {fun}() {{\n"));
                    output.push_str(&format!("        call(method = {wire}, input = \"\")\n"));
                }
            }
            output.push_str("    }\n\n");
        }

        output.push_str(CALL);
        Ok(output)
    }
}

const IMPORTS: &str = "import io.ktor.client.*
import io.ktor.client.engine.cio.*
import io.ktor.client.plugins.*
import io.ktor.client.request.*
import io.ktor.client.statement.*
import io.ktor.http.*
import kotlinx.serialization.Serializable
import kotlinx.serialization.decodeFromString
import kotlinx.serialization.encodeToString
import kotlinx.serialization.json.Json

";

const FIELDS: &str = "    // authToken is an optional authentication token.
    var authToken: String? = null

    // client is used for making requests.
    val client = HttpClient(CIO)

    private val json = Json { ignoreUnknownKeys = true }

";

const CALL: &str = r#"    // call implementation.
    suspend fun call(
        method: String, input: String
    ): String {
        val url = this.url + "/" + method
        try {
            val r = this.client.post(url) {
                headers {
                    append(HttpHeaders.ContentType, "application/json")
                    authToken?.let { append(HttpHeaders.Authorization, "Bearer $it") }
                }
                setBody(input)
            }
            return r.bodyAsText()
        } catch (e: ClientRequestException) {
            val body = e.response.bodyAsText()
            val err = json.decodeFromString<ResponseError>(body)
            throw RPCError(
                status = e.response.status.description,
                statusCode = e.response.status.value,
                type = err.type,
                msg = err.message
            )
        }
    }
}

data class RPCError(
    val status: String,
    val statusCode: Int,
    val type: String,
    val msg: String
) : Exception()

@Serializable
private data class ResponseError(val type: String, val message: String)
"#;
