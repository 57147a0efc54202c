//! Go HTTP client generation.

use super::types::write_types;
use super::{check_declarations, go_name, uses_timestamps, write_imports};
use crate::error::CodegenError;
use crate::generator::{GenerateOptions, Generator};
use rpcgen_schema::{MethodShape, Schema};

/// Generator for a Go client package: types plus an HTTP client.
pub struct GoClientGenerator;

/// Fields of the generated client struct.
const CLIENT_FIELDS: [&str; 3] = ["URL", "AuthToken", "HTTPClient"];

impl Generator for GoClientGenerator {
    fn name(&self) -> &'static str {
        "go-client"
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

        let mut imports = vec!["bytes", "encoding/json", "fmt", "io", "net/http"];
        if uses_timestamps(schema) {
            imports.push("time");
        }
        write_imports(&mut output, &imports);

        check_declarations(schema, &[options.client_name.as_str(), "Error"])?;
        output.push_str(&write_types(schema, options, self.name())?);
        output.push_str(&write_client(schema, options)?);
        output.push_str(CALL);
        Ok(output)
    }
}

fn write_client(schema: &Schema, options: &GenerateOptions) -> Result<String, CodegenError> {
    let client = &options.client_name;
    let mut output = String::new();

    output.push_str(&format!("// {client} is the API client.\n"));
    output.push_str(&format!("type {client} struct {{\n"));
    output.push_str("\t// URL is the required API endpoint address.\n");
    output.push_str("\tURL string\n\n");
    output.push_str("\t// AuthToken is an optional authentication token.\n");
    output.push_str("\tAuthToken string\n\n");
    output.push_str(
        "\t// HTTPClient is the client used for making requests, defaulting to http.DefaultClient.\n",
    );
    output.push_str("\tHTTPClient *http.Client\n");
    output.push_str("}\n\n");

    for method in schema.methods() {
        let name = go_name(&method.name);
        if CLIENT_FIELDS.contains(&name.as_str()) {
            return Err(CodegenError::generation(format!(
                "method `{}` collides with client field `{name}`",
                method.name
            )));
        }
        let wire = &method.name;
        if method.description.is_empty() {
            output.push_str(&format!("// {name} calls {wire}.\n"));
        } else {
            output.push_str(&format!("// {name} {}\n", method.description));
        }

        match method.shape() {
            MethodShape::InputOnly => {
                output.push_str(&format!(
                    "func (c *{client}) {name}(in {name}Input) error {{\n"
                ));
                output.push_str(&format!(
                    "\treturn call(c.HTTPClient, c.AuthToken, c.URL, \"{wire}\", in, nil)\n"
                ));
            }
            MethodShape::OutputOnly => {
                output.push_str(&format!(
                    "func (c *{client}) {name}() (*{name}Output, error) {{\n"
                ));
                output.push_str(&format!("\tvar out {name}Output\n"));
                output.push_str(&format!(
                    "\treturn &out, call(c.HTTPClient, c.AuthToken, c.URL, \"{wire}\", nil, &out)\n"
                ));
            }
            MethodShape::Bidirectional => {
                output.push_str(&format!(
                    "func (c *{client}) {name}(in {name}Input) (*{name}Output, error) {{\n"
                ));
                output.push_str(&format!("\tvar out {name}Output\n"));
                output.push_str(&format!(
                    "\treturn &out, call(c.HTTPClient, c.AuthToken, c.URL, \"{wire}\", in, &out)\n"
                ));
            }
            MethodShape::Empty => {
                output.push_str(&format!("func (c *{client}) {name}() error {{\n"));
                output.push_str(&format!(
                    "\treturn call(c.HTTPClient, c.AuthToken, c.URL, \"{wire}\", nil, nil)\n"
                ));
            }
        }
        output.push_str("}\n\n");
    }

    Ok(output)
}

const CALL: &str = r#"// Error is an error returned by the API.
type Error struct {
	// Status is the HTTP status text.
	Status string `json:"-"`

	// StatusCode is the HTTP status code.
	StatusCode int `json:"-"`

	// Type is the error type.
	Type string `json:"type"`

	// Message is the error message.
	Message string `json:"message"`
}

// Error implementation.
func (e Error) Error() string {
	if e.Type == "" {
		return fmt.Sprintf("%s: %d", e.Status, e.StatusCode)
	}
	return fmt.Sprintf("%s: %s", e.Type, e.Message)
}

// call implementation.
func call(client *http.Client, authToken, endpoint, method string, in, out interface{}) error {
	var body io.Reader

	// default client
	if client == nil {
		client = http.DefaultClient
	}

	// input params
	if in != nil {
		var buf bytes.Buffer
		if err := json.NewEncoder(&buf).Encode(in); err != nil {
			return fmt.Errorf("encoding: %w", err)
		}
		body = &buf
	}

	// POST request
	req, err := http.NewRequest("POST", endpoint+"/"+method, body)
	if err != nil {
		return err
	}
	req.Header.Set("Content-Type", "application/json")

	// auth token
	if authToken != "" {
		req.Header.Set("Authorization", "Bearer "+authToken)
	}

	// response
	res, err := client.Do(req)
	if err != nil {
		return err
	}
	defer res.Body.Close()

	// error
	if res.StatusCode >= 300 {
		var e Error
		if res.Header.Get("Content-Type") == "application/json" {
			if err := json.NewDecoder(res.Body).Decode(&e); err != nil {
				return err
			}
		}
		e.Status = http.StatusText(res.StatusCode)
		e.StatusCode = res.StatusCode
		return e
	}

	// output params
	if out != nil {
		if err := json.NewDecoder(res.Body).Decode(out); err != nil {
			return err
		}
	}

	return nil
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::todo_schema;
    use rpcgen_schema::{MethodDef, TypeDef};

    fn render(options: &GenerateOptions) -> String {
        GoClientGenerator
            .generate_string(&todo_schema(), options)
            .expect("generate")
    }

    #[test]
    fn test_client_header_and_types() {
        let output = render(&GenerateOptions::default().with_package("todo"));
        assert!(output.contains("package todo\n"));
        assert!(output.contains("\t\"net/http\"\n\t\"time\"\n)\n"));
        assert!(output.contains("type Todo struct {\n"));
        assert!(output.contains("type Client struct {\n"));
        assert!(output.contains("func call(client *http.Client"));
    }

    #[test]
    fn test_method_shapes() {
        let output = render(&GenerateOptions::default());
        assert!(output.contains(
            "func (c *Client) CreateTodo(in CreateTodoInput) (*CreateTodoOutput, error) {\n"
        ));
        assert!(output.contains("func (c *Client) AddItem(in AddItemInput) error {\n"));
        assert!(output.contains("func (c *Client) ListTodos() (*ListTodosOutput, error) {\n"));
        assert!(output.contains("func (c *Client) Ping() error {\n"));
        assert!(output.contains("\"createTodo\", in, &out)"));
        assert!(output.contains("\"ping\", nil, nil)"));
    }

    #[test]
    fn test_method_colliding_with_client_field() {
        let mut schema = Schema::new("test");
        schema.add_method(MethodDef::new("url")).expect("method");
        let err = GoClientGenerator
            .generate_string(&schema, &GenerateOptions::default())
            .unwrap_err();
        assert!(matches!(err, CodegenError::Generation { .. }));
        assert_eq!(
            err.to_string(),
            "generation error: method `url` collides with client field `URL`"
        );
    }

    #[test]
    fn test_type_colliding_with_client_struct() {
        let mut schema = Schema::new("test");
        schema.add_type(TypeDef::new("client")).expect("type");
        let err = GoClientGenerator
            .generate_string(&schema, &GenerateOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("type `client`"));

        let output = GoClientGenerator
            .generate_string(&schema, &GenerateOptions::default().with_client_name("Api"))
            .expect("generate");
        assert!(output.contains("type Client struct {\n"));
        assert!(output.contains("type Api struct {\n"));
    }

    #[test]
    fn test_client_name() {
        let output = render(&GenerateOptions::default().with_client_name("TodoClient"));
        assert!(output.contains("// TodoClient is the API client.\ntype TodoClient struct {\n"));
        assert!(output.contains("func (c *TodoClient) Ping() error {\n"));
    }
}
