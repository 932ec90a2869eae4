//! # CLI Module
//!
//! Command-line interface for the `brrtdoc` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Build a document from a route declarations file:
//!
//! ```bash
//! brrtdoc generate --routes routes.yaml --config brrtdoc.yaml --format yaml
//! ```
//!
//! Options:
//! - `--routes <FILE>` - Route declarations (required)
//! - `--config <FILE>` - Generator configuration (defaults apply without it)
//! - `--format <json|yaml>` - Output format (default: json)
//! - `--output <FILE>` - Write to a file instead of stdout
//! - `--infer-tags` - Tag untagged routes by their first path segment
//!
//! ### `check`
//!
//! Generate, then verify every `$ref` resolves and the output parses as
//! OpenAPI 3:
//!
//! ```bash
//! brrtdoc check --routes routes.yaml
//! ```
//!
//! ### `inspect`
//!
//! List operations and registered component identifiers:
//!
//! ```bash
//! brrtdoc inspect --routes routes.yaml --config brrtdoc.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use brrtdoc::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```

mod commands;

pub use commands::{load_config, render, run_cli, run_with_writer, Cli, Commands, OutputFormat};
