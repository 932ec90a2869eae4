use crate::config::GeneratorConfig;
use crate::document::Document;
use crate::dsl::load_declarations;
use crate::generator::{first_path_segment, DocumentGenerator};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Command-line interface for brrtdoc
///
/// Builds OpenAPI documents from route declaration files.
#[derive(Parser)]
#[command(name = "brrtdoc", version)]
#[command(about = "Generate OpenAPI documents from route declarations", long_about = None)]
pub struct Cli {
    /// Debug-level logging with source locations
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Serialization format of the generated document
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate an OpenAPI document
    Generate {
        /// Route declarations file (YAML, JSON or TOML)
        #[arg(short, long)]
        routes: PathBuf,

        /// Generator configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tag untagged routes with their first path segment
        #[arg(long, default_value_t = false)]
        infer_tags: bool,
    },
    /// Generate and verify a document without writing it
    ///
    /// Fails if any `$ref` does not resolve or the document does not parse
    /// as an OpenAPI 3 specification.
    Check {
        #[arg(short, long)]
        routes: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List generated operations and registered components
    Inspect {
        #[arg(short, long)]
        routes: PathBuf,

        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Load the configuration file (or defaults) and apply env overrides.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    config.components = config.components.with_env_overrides();
    Ok(config)
}

fn build_document(routes: &Path, config: Option<&Path>, infer_tags: bool) -> Result<Document> {
    let declarations = load_declarations(routes)
        .with_context(|| format!("Failed to load routes {}", routes.display()))?;
    let mut generator = DocumentGenerator::new(load_config(config)?);
    if infer_tags {
        generator = generator.with_tag_inference(first_path_segment);
    }
    Ok(generator.generate(&declarations.routes)?)
}

pub fn render(document: &Document, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => document.to_json_pretty()?,
        OutputFormat::Yaml => document.to_yaml()?,
    };
    Ok(rendered)
}

/// Run a parsed command, printing to stdout.
pub fn run_cli(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_writer(cli, &mut out)
}

/// Run a parsed command, printing to `out`.
pub fn run_with_writer<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Commands::Generate {
            routes,
            config,
            format,
            output,
            infer_tags,
        } => {
            let document = build_document(&routes, config.as_deref(), infer_tags)?;
            let mut rendered = render(&document, format)?;
            if !rendered.ends_with('\n') {
                rendered.push('\n');
            }
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "wrote OpenAPI document");
                }
                None => out.write_all(rendered.as_bytes())?,
            }
            Ok(())
        }
        Commands::Check { routes, config } => {
            let document = build_document(&routes, config.as_deref(), false)?;
            let unresolved = document.unresolved_references()?;
            if !unresolved.is_empty() {
                bail!("Unresolved references: {}", unresolved.join(", "));
            }
            document
                .to_oas3()
                .context("Generated document is not a valid OpenAPI specification")?;
            writeln!(
                out,
                "OK: {} paths, {} operations, {} references",
                document.paths.len(),
                document.operation_count(),
                document.references()?.len()
            )?;
            Ok(())
        }
        Commands::Inspect { routes, config } => {
            let document = build_document(&routes, config.as_deref(), false)?;
            writeln!(out, "Operations:")?;
            for (path, item) in &document.paths {
                for (method, operation) in &item.operations {
                    let id = operation.operation_id.as_deref().unwrap_or("-");
                    writeln!(
                        out,
                        "  {} {} ({id}) responses: {}",
                        method.to_uppercase(),
                        path,
                        operation.responses.keys().cloned().collect::<Vec<_>>().join(", ")
                    )?;
                }
            }
            writeln!(out, "Components:")?;
            if let Some(components) = &document.components {
                let sections: [(&str, Vec<&String>); 5] = [
                    ("schemas", components.schemas.keys().collect()),
                    ("parameters", components.parameters.keys().collect()),
                    ("requestBodies", components.request_bodies.keys().collect()),
                    ("examples", components.examples.keys().collect()),
                    ("securitySchemes", components.security_schemes.keys().collect()),
                ];
                for (section, ids) in sections {
                    for id in ids {
                        writeln!(out, "  {section}/{id}")?;
                    }
                }
            }
            Ok(())
        }
    }
}
