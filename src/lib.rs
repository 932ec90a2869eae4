//! # brrtdoc
//!
//! **brrtdoc** assembles [OpenAPI 3.1.0](https://spec.openapis.org/oas/v3.1.0)
//! documents from route-level declarations.
//!
//! ## Overview
//!
//! Applications describe each route (method, path template, parameters,
//! request body, responses, security) with the types in [`dsl`], either in
//! Rust or in a YAML/JSON/TOML file. The [`generator`] turns every
//! declaration into an operation and decides, per fragment kind, whether a
//! fragment is inlined at its use site or hoisted into the shared
//! `components` section and referenced by `$ref`.
//!
//! Hoisted fragments get stable, human-readable identifiers derived from
//! their logical names. When two different fragments share a name, the
//! later one gets a numeric suffix (`sample`, `sample_1`), so every
//! reference resolves to exactly one entry.
//!
//! ## Architecture
//!
//! - **[`dsl`]** - Route, parameter, body and schema-shape declarations
//! - **[`components`]** - Per-run registry of hoisted fragments
//! - **[`generator`]** - One generator per fragment kind, plus route and document assembly
//! - **[`document`]** - The OpenAPI object model and serialization helpers
//! - **[`config`]** - Document metadata, servers, security schemes and placement flags
//! - **[`error`]** - Configuration and generation errors
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `brrtdoc` binary
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant App as Application
//!     participant Doc as DocumentGenerator
//!     participant Route as RouteGenerator
//!     participant Gen as Fragment generators
//!     participant Ctx as ComponentsContext
//!
//!     App->>Doc: generate(&routes)
//!     Doc->>Ctx: register security schemes
//!     loop every route
//!         Doc->>Route: generate(route, ctx)
//!         Route->>Gen: parameters, body, responses
//!         Gen->>Ctx: add_* when hoisting
//!         Ctx-->>Gen: identifier
//!         Gen-->>Route: inline value or $ref
//!         Route-->>Doc: Operation
//!     end
//!     Doc->>Ctx: render() (once)
//!     Ctx-->>Doc: FrozenComponents
//!     Doc-->>App: Document
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use brrtdoc::config::{ComponentsConfig, GeneratorConfig};
//! use brrtdoc::dsl::{
//!     BodyDeclaration, ExampleDeclaration, ParameterDeclaration, ResponseDeclaration,
//!     RouteDescriptor, TypeShape,
//! };
//! use brrtdoc::generator::DocumentGenerator;
//! use serde_json::json;
//!
//! let route = RouteDescriptor::post("/math/{operation}")
//!     .tag("test")
//!     .parameter(ParameterDeclaration::path("operation").description("the math operation"))
//!     .request_body(
//!         BodyDeclaration::new(
//!             TypeShape::object("MathRequest")
//!                 .property("a", TypeShape::integer(), true)
//!                 .property("b", TypeShape::integer(), true),
//!         )
//!         .example("sample", ExampleDeclaration::new(json!({"a": 1, "b": 2}))),
//!     )
//!     .response("200", ResponseDeclaration::new("The operation was successful"))
//!     .response("default", ResponseDeclaration::new("Something unexpected happened"));
//!
//! let config = GeneratorConfig {
//!     components: ComponentsConfig::all_in_components(),
//!     ..Default::default()
//! };
//! let document = DocumentGenerator::new(config).generate(&[route]).unwrap();
//! assert!(document.unresolved_references().unwrap().is_empty());
//! println!("{}", document.to_json_pretty().unwrap());
//! ```

pub mod cli;
pub mod components;
pub mod config;
pub mod document;
pub mod dsl;
pub mod error;
pub mod generator;
pub mod logging;

pub use config::GeneratorConfig;
pub use document::Document;
pub use error::{ConfigurationError, Error, Result};
pub use generator::DocumentGenerator;
