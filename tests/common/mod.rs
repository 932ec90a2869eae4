#![allow(dead_code)]

pub mod temp_files {
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Scratch directory removed when dropped
    pub struct TempFiles {
        dir: TempDir,
    }

    impl TempFiles {
        pub fn new() -> Self {
            Self {
                dir: tempfile::tempdir().unwrap(),
            }
        }

        /// Write `content` to `name` inside the scratch directory
        pub fn write(&self, name: &str, content: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, content).unwrap();
            path
        }

        pub fn path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }
    }
}

pub mod fixtures {
    use brrtdoc::dsl::{
        BodyDeclaration, ExampleDeclaration, ParameterDeclaration, ResponseDeclaration,
        RouteDescriptor, TypeShape,
    };
    use serde_json::{json, Value};

    pub const ROUTES_YAML: &str = r#"
routes:
  - method: get
    path: /hello
    tags: [test]
    description: Hello World Endpoint
    responses:
      "200":
        description: Successful Request
        body:
          schema: { type: string }
          examples:
            greeting: { value: "Hello World!" }
      "500":
        description: Something unexpected happened
  - method: post
    path: /math/{operation}
    tags: [test]
    description: Performs the given operation on the given values.
    parameters:
      - name: operation
        location: path
        description: the math operation to perform. Either 'add' or 'sub'
        schema: { type: string }
    request_body:
      schema:
        type: object
        name: MathRequest
        properties:
          a: { type: integer }
          b: { type: integer }
        required: [a, b]
      examples:
        sample: { value: { a: 1, b: 2 } }
    responses:
      "200":
        description: The operation was successful
        body:
          schema: { type: integer }
          description: The result of the operation
      "400":
        description: An invalid operation was provided
      default:
        description: Something unexpected happened
"#;

    pub const CONFIG_YAML: &str = r#"
info:
  title: Example API
  version: latest
  description: Example API for testing and demonstration purposes.
servers:
  - url: http://localhost:8080
    description: Development Server
  - url: https://www.example.com
    description: Production Server
components:
  examples_in_components: true
  schemas_in_components: true
"#;

    pub fn math_request() -> TypeShape {
        TypeShape::object("MathRequest")
            .property("a", TypeShape::integer(), true)
            .property("b", TypeShape::integer(), true)
    }

    /// A route whose request body carries one example named `sample`
    pub fn route_with_sample(path: &str, sample: Value) -> RouteDescriptor {
        RouteDescriptor::post(path)
            .request_body(
                BodyDeclaration::new(math_request())
                    .example("sample", ExampleDeclaration::new(sample)),
            )
            .response("200", ResponseDeclaration::new("ok"))
    }

    pub fn math_routes() -> Vec<RouteDescriptor> {
        vec![
            RouteDescriptor::get("/hello")
                .tag("test")
                .description("Hello World Endpoint")
                .response(
                    "200",
                    ResponseDeclaration::new("Successful Request").body(
                        BodyDeclaration::new(TypeShape::string())
                            .example("greeting", ExampleDeclaration::new(json!("Hello World!"))),
                    ),
                )
                .response(
                    "500",
                    ResponseDeclaration::new("Something unexpected happened"),
                ),
            RouteDescriptor::post("/math/{operation}")
                .tag("test")
                .parameter(
                    ParameterDeclaration::path("operation")
                        .description("the math operation to perform. Either 'add' or 'sub'"),
                )
                .request_body(
                    BodyDeclaration::new(math_request())
                        .example("sample", ExampleDeclaration::new(json!({"a": 1, "b": 2}))),
                )
                .response(
                    "200",
                    ResponseDeclaration::new("The operation was successful")
                        .body(BodyDeclaration::new(TypeShape::integer())),
                )
                .response(
                    "400",
                    ResponseDeclaration::new("An invalid operation was provided"),
                )
                .response(
                    "default",
                    ResponseDeclaration::new("Something unexpected happened"),
                ),
            RouteDescriptor::get("/items/{id}")
                .parameter(ParameterDeclaration::path("id").schema(TypeShape::integer()))
                .parameter(ParameterDeclaration::query("verbose").schema(TypeShape::Boolean))
                .response(
                    "200",
                    ResponseDeclaration::new("the item").body(
                        BodyDeclaration::new(
                            TypeShape::object("Item")
                                .property("id", TypeShape::integer(), true)
                                .property("tags", TypeShape::array(TypeShape::string()), false),
                        )
                        .example("sample", ExampleDeclaration::new(json!({"id": 7}))),
                    ),
                ),
        ]
    }
}
