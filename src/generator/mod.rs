//! # Generator Module
//!
//! Turns route declarations into an OpenAPI [`Document`](crate::document::Document).
//!
//! ## Overview
//!
//! Every hoistable fragment kind has one [`FragmentGenerator`]
//! implementation. A generator receives the logical name, the declaration
//! and the run's [`ComponentsContext`], and returns a [`RefOr`]: either the
//! inline payload or a `$ref` into `components`, depending on the
//! placement flag for its kind. Callers never branch on placement.
//!
//! | Kind | Generator | Placement flag |
//! |---|---|---|
//! | Example | [`ExampleGenerator`] | `examples_in_components` |
//! | Schema | [`SchemaGenerator`] | `schemas_in_components` (named shapes only) |
//! | Parameter | [`ParameterGenerator`] | `parameters_in_components` |
//! | Request body | [`BodyGenerator`] | `request_bodies_in_components` |
//! | Security scheme | [`SecuritySchemeGenerator`] | always hoisted |
//!
//! Servers, info and tag definitions are never hoisted and have plain
//! mapping generators ([`ServersGenerator`], [`InfoGenerator`], [`TagsGenerator`]).
//!
//! [`RouteGenerator`] builds one operation from a
//! [`RouteDescriptor`](crate::dsl::RouteDescriptor) and
//! [`DocumentGenerator`] runs the whole pass, rendering the registry exactly
//! once at the end.
//!
//! ## Example
//!
//! ```rust
//! use brrtdoc::config::GeneratorConfig;
//! use brrtdoc::dsl::{ResponseDeclaration, RouteDescriptor};
//! use brrtdoc::generator::DocumentGenerator;
//!
//! let routes = vec![RouteDescriptor::get("/hello")
//!     .response("200", ResponseDeclaration::new("greeting"))];
//! let document = DocumentGenerator::new(GeneratorConfig::default())
//!     .generate(&routes)
//!     .unwrap();
//! assert_eq!(document.operation_count(), 1);
//! ```

mod body;
mod document;
mod example;
mod info;
mod parameter;
mod route;
mod schema;
mod security;
mod server;
mod tags;

pub use body::BodyGenerator;
pub use document::DocumentGenerator;
pub use example::ExampleGenerator;
pub use info::{InfoGenerator, TagsGenerator};
pub use parameter::ParameterGenerator;
pub use route::RouteGenerator;
pub use schema::SchemaGenerator;
pub use security::SecuritySchemeGenerator;
pub use server::ServersGenerator;
pub use tags::{first_path_segment, TagInference};

use crate::components::ComponentsContext;
use crate::document::RefOr;
use crate::error::ConfigurationError;

/// Converts one declaration into a document fragment, inline or referenced.
pub trait FragmentGenerator {
    type Declaration: ?Sized;
    type Fragment;

    /// Generate the fragment for `declaration`.
    ///
    /// `name` is the logical name used when the fragment is hoisted; the
    /// returned reference carries the identifier the registry assigned.
    fn generate(
        &self,
        name: &str,
        declaration: &Self::Declaration,
        ctx: &mut ComponentsContext,
    ) -> Result<RefOr<Self::Fragment>, ConfigurationError>;
}
