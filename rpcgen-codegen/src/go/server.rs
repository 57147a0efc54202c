//! Go HTTP server generation.
//!
//! The server declares a service interface with one function per method and
//! a `Server` handler that routes `POST /<method>` requests to it, the
//! counterpart of the requests the Go client sends. Types are declared in
//! the same file unless a types package is given, in which case they are
//! imported and qualified with the package name.

use super::types::{validates, write_types};
use super::{check_declarations, go_name, uses_timestamps, write_imports};
use crate::defaults::string_literal;
use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use crate::rules::has_rules;
use crate::shape::{Record, records};
use rpcgen_schema::{MethodDef, MethodShape, Schema};

/// Generator for a Go service interface and HTTP handler.
pub struct GoServerGenerator;

/// Name of the generated handler struct.
const SERVER: &str = "Server";

impl Generator for GoServerGenerator {
    fn name(&self) -> &'static str {
        "go-server"
    }

    fn language(&self) -> &'static str {
        "go"
    }

    fn extension(&self) -> &'static str {
        "go"
    }

    fn render(&self, schema: &Schema, options: &GenerateOptions) -> Result<String, CodegenError> {
        let service = go_name(&options.client_name);
        if service == SERVER || service == "Error" {
            return Err(CodegenError::generation(format!(
                "service name `{service}` collides with a generated Go declaration"
            )));
        }
        let types = match &options.types_package {
            Some(path) => Types::Imported {
                path: path.as_str(),
                qualifier: package_name(path)?,
            },
            None => {
                check_declarations(schema, &[service.as_str(), SERVER, "Error"])?;
                Types::Local
            }
        };

        let mut output = String::new();
        output.push_str("// Code generated by rpcgen. DO NOT EDIT.\n\n");
        output.push_str(&format!("package {}\n\n", options.package));

        let mut imports = vec!["encoding/json", "errors", "net/http", "strings"];
        if !schema.methods().is_empty() {
            imports.push("context");
        }
        match types {
            Types::Imported { path, .. } => imports.push(path),
            Types::Local => {
                if options.validate && records(schema).iter().any(|r| has_rules(r.fields)) {
                    imports.push("fmt");
                }
                if uses_timestamps(schema) {
                    imports.push("time");
                }
            }
        }
        imports.sort_unstable();
        write_imports(&mut output, &imports);

        if matches!(types, Types::Local) {
            output.push_str(&write_types(schema, options, self.name())?);
        }
        output.push_str(&write_service(schema, &service, &types));
        output.push_str(&write_handler(schema, options, &types));
        output.push_str(RESPOND);
        Ok(output)
    }
}

/// Where the server finds the record types.
#[derive(Debug, Clone, Copy)]
enum Types<'a> {
    /// Declared in the same file.
    Local,
    /// Imported from a separate package.
    Imported { path: &'a str, qualifier: &'a str },
}

impl Types<'_> {
    fn payload(&self, method: &str, suffix: &str) -> String {
        match self {
            Self::Local => format!("{method}{suffix}"),
            Self::Imported { qualifier, .. } => format!("{qualifier}.{method}{suffix}"),
        }
    }
}

/// Returns the package name of a Go import path: its last element.
fn package_name(path: &str) -> Result<&str, CodegenError> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid || path.contains(['"', '\\', ' ']) {
        return Err(CodegenError::generation(format!(
            "types package `{path}` has no usable package name"
        )));
    }
    Ok(name)
}

fn write_service(schema: &Schema, service: &str, types: &Types<'_>) -> String {
    let mut output = String::new();
    output.push_str(&format!("// {service} is the API service.\n"));
    output.push_str(&format!("type {service} interface {{\n"));
    for (i, method) in schema.methods().iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let name = go_name(&method.name);
        if method.description.is_empty() {
            output.push_str(&format!("\t// {name} handles {}.\n", method.name));
        } else {
            output.push_str(&format!("\t// {name} {}\n", method.description));
        }
        output.push_str(&format!("\t{}\n", signature(method, &name, types)));
    }
    output.push_str("}\n\n");
    output
}

/// Renders the interface function of a method.
fn signature(method: &MethodDef, name: &str, types: &Types<'_>) -> String {
    let input = types.payload(name, "Input");
    let output = types.payload(name, "Output");
    match method.shape() {
        MethodShape::Bidirectional => {
            format!("{name}(ctx context.Context, in {input}) (*{output}, error)")
        }
        MethodShape::InputOnly => format!("{name}(ctx context.Context, in {input}) error"),
        MethodShape::OutputOnly => format!("{name}(ctx context.Context) (*{output}, error)"),
        MethodShape::Empty => format!("{name}(ctx context.Context) error"),
    }
}

fn write_handler(schema: &Schema, options: &GenerateOptions, types: &Types<'_>) -> String {
    let service = go_name(&options.client_name);
    let mut output = String::new();
    output.push_str(&format!("// {SERVER} serves a {service} over HTTP.\n"));
    output.push_str(&format!("type {SERVER} struct {{\n"));
    output.push_str(&format!("\t// Service handles the calls.\n\tService {service}\n"));
    output.push_str("}\n\n");

    output.push_str("// ServeHTTP implementation.\n");
    output.push_str(&format!(
        "func (s *{SERVER}) ServeHTTP(w http.ResponseWriter, r *http.Request) {{\n"
    ));
    output.push_str("\tif r.Method != http.MethodPost {\n");
    output.push_str(
        "\t\twriteError(w, http.StatusMethodNotAllowed, \"method_not_allowed\", \"only POST is allowed\")\n",
    );
    output.push_str("\t\treturn\n");
    output.push_str("\t}\n\n");

    if !schema.methods().is_empty() {
        output.push_str("\tctx := r.Context()\n");
    }
    output.push_str("\tswitch strings.TrimPrefix(r.URL.Path, \"/\") {\n");
    for method in schema.methods() {
        output.push_str(&write_route(method, options, types));
    }
    output.push_str("\tdefault:\n");
    output.push_str("\t\twriteError(w, http.StatusNotFound, \"not_found\", \"unknown method\")\n");
    output.push_str("\t}\n");
    output.push_str("}\n\n");
    output
}

/// Renders the `case` routing one method to the service.
fn write_route(method: &MethodDef, options: &GenerateOptions, types: &Types<'_>) -> String {
    let name = go_name(&method.name);
    let mut output = String::new();
    output.push_str(&format!("\tcase {}:\n", string_literal(&method.name)));

    if let Some(record) = Record::input(method) {
        output.push_str(&format!("\t\tvar in {}\n", types.payload(&name, "Input")));
        output.push_str("\t\tif !decode(w, r, &in) {\n\t\t\treturn\n\t\t}\n");
        if options.validate && validates(&record) {
            output.push_str("\t\tif err := in.Validate(); err != nil {\n");
            output.push_str(
                "\t\t\twriteError(w, http.StatusBadRequest, \"invalid_request\", err.Error())\n",
            );
            output.push_str("\t\t\treturn\n\t\t}\n");
        }
    }

    let call = match method.shape() {
        MethodShape::Bidirectional | MethodShape::InputOnly => {
            format!("s.Service.{name}(ctx, in)")
        }
        MethodShape::OutputOnly | MethodShape::Empty => format!("s.Service.{name}(ctx)"),
    };
    if method.shape().has_output() {
        output.push_str(&format!("\t\tout, err := {call}\n"));
        output.push_str("\t\trespond(w, out, err)\n");
    } else {
        output.push_str(&format!("\t\trespond(w, nil, {call})\n"));
    }
    output
}

const RESPOND: &str = r#"// Error is an error reported to the caller.
type Error struct {
	// Status is the HTTP status code, defaulting to 500.
	Status int `json:"-"`

	// Type is the error type.
	Type string `json:"type"`

	// Message is the error message.
	Message string `json:"message"`
}

// Error implementation.
func (e Error) Error() string {
	return e.Type + ": " + e.Message
}

// decode reads the request body into in.
func decode(w http.ResponseWriter, r *http.Request, in interface{}) bool {
	if err := json.NewDecoder(r.Body).Decode(in); err != nil {
		writeError(w, http.StatusBadRequest, "invalid_request", "failed to parse request body")
		return false
	}
	return true
}

// respond writes out as JSON, or err as an error response.
func respond(w http.ResponseWriter, out interface{}, err error) {
	if err != nil {
		var e Error
		if !errors.As(err, &e) {
			writeError(w, http.StatusInternalServerError, "internal", "internal server error")
			return
		}
		if e.Status == 0 {
			e.Status = http.StatusInternalServerError
		}
		writeError(w, e.Status, e.Type, e.Message)
		return
	}

	if out == nil {
		w.WriteHeader(http.StatusNoContent)
		return
	}
	w.Header().Set("Content-Type", "application/json")
	json.NewEncoder(w).Encode(out)
}

// writeError writes a JSON error response.
func writeError(w http.ResponseWriter, status int, kind, message string) {
	w.Header().Set("Content-Type", "application/json")
	w.WriteHeader(status)
	json.NewEncoder(w).Encode(Error{Type: kind, Message: message})
}
"#;
