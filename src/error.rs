//! Error types for document generation.
//!
//! Generation is all-or-nothing: any [`ConfigurationError`] aborts the whole
//! build, because a partially assembled document would silently mis-describe
//! the API. Route-level failures always carry the route identity
//! (e.g. `POST /math/{operation}`) so the bad declaration can be located.

use crate::components::ComponentKind;
use std::path::PathBuf;
use thiserror::Error;

/// A declared route or fragment is structurally invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Response selector is neither a valid HTTP status code nor `default`
    #[error("invalid response status '{0}': expected an HTTP status code (100-599) or 'default'")]
    InvalidStatus(String),

    /// The same method + path was declared twice
    #[error("duplicate route {0}")]
    DuplicateRoute(String),

    /// The schema shape cannot be expressed
    #[error("unsupported schema for '{name}': {reason}")]
    UnsupportedSchema { name: String, reason: String },

    /// Media type is not of the form `type/subtype`
    #[error("invalid media type '{0}'")]
    InvalidMediaType(String),

    /// Operation references a security scheme that was never configured
    #[error("unknown security scheme '{0}'")]
    UnknownSecurityScheme(String),

    /// Path parameter has no `{name}` placeholder in the path template
    #[error("path parameter '{0}' does not appear in the path template")]
    UnboundPathParameter(String),

    /// Path template placeholder with no matching path parameter
    #[error("path placeholder '{{{0}}}' has no declared path parameter")]
    UndeclaredPathParameter(String),

    /// Route is protected but names no scheme and no defaults are configured
    #[error("route is protected but no security scheme applies")]
    MissingSecurityScheme,

    /// Same parameter name declared twice for one location
    #[error("duplicate {location} parameter '{name}'")]
    DuplicateParameter { name: String, location: String },
}

/// Top-level error returned by the generation entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// A route-scoped configuration error
    #[error("invalid declaration for {route}: {source}")]
    Route {
        /// Route identity, `METHOD /path`
        route: String,
        #[source]
        source: ConfigurationError,
    },

    /// A configuration error outside any single route
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A fragment was added after the components registry was rendered.
    ///
    /// This is a programming error; it can only surface through
    /// [`SharedComponentsContext`](crate::components::SharedComponentsContext).
    #[error("components registry already rendered: cannot add {kind} '{name}'")]
    RegistryMisuse { kind: ComponentKind, name: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize document: {0}")]
    Serialize(String),
}

impl Error {
    /// Attach a route identity to a configuration error.
    pub fn in_route(route: impl Into<String>, source: ConfigurationError) -> Self {
        Error::Route {
            route: route.into(),
            source,
        }
    }

    /// The underlying configuration error, if this is one.
    pub fn configuration(&self) -> Option<&ConfigurationError> {
        match self {
            Error::Route { source, .. } => Some(source),
            Error::Configuration(source) => Some(source),
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
