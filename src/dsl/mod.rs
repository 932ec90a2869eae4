//! # Declaration Module
//!
//! Route-level declarations: the input of document generation. A framework
//! integration builds these while routes are registered; they can also be
//! read from a YAML/JSON declarations file:
//!
//! ```yaml
//! routes:
//!   - method: get
//!     path: /hello
//!     tags: [test]
//!     description: Hello World Endpoint
//!     responses:
//!       "200":
//!         description: Successful Request
//!         body:
//!           schema: { type: string }
//!           description: the response
//!       "500":
//!         description: Something unexpected happened
//! ```
//!
//! Rust callers use the builder methods instead:
//!
//! ```rust
//! use brrtdoc::dsl::{BodyDeclaration, ResponseDeclaration, RouteDescriptor, TypeShape};
//!
//! let route = RouteDescriptor::get("/hello")
//!     .tag("test")
//!     .description("Hello World Endpoint")
//!     .response(
//!         "200",
//!         ResponseDeclaration::new("Successful Request")
//!             .body(BodyDeclaration::new(TypeShape::string()).description("the response")),
//!     );
//! assert_eq!(route.route_id(), "GET /hello");
//! ```

mod shape;
mod types;

pub use shape::*;
pub use types::*;

use crate::config::read_structured;
use crate::error::Result;
use std::path::Path;

/// Load route declarations from a file.
pub fn load_declarations(path: &Path) -> Result<ApiDeclaration> {
    read_structured(path)
}
