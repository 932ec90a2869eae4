//! # Configuration Module
//!
//! Run-level configuration for document generation: document metadata,
//! servers, tag definitions, security schemes and the per-kind placement
//! flags that decide whether fragments are inlined or hoisted into
//! `components`.
//!
//! Configuration is read from YAML, JSON or TOML (chosen by file extension)
//! and every field has a default, so an empty file is a valid config:
//!
//! ```yaml
//! info:
//!   title: Example API
//!   version: latest
//! servers:
//!   - url: http://localhost:8080
//!     description: Development Server
//! security_schemes:
//!   BearerAuth:
//!     type: http
//!     scheme: bearer
//!     bearer_format: JWT
//! default_security_scheme_names: [BearerAuth]
//! components:
//!   examples_in_components: true
//!   naming_policy: dedup_by_content
//! ```
//!
//! ## Environment Variables
//!
//! [`ComponentsConfig::with_env_overrides`] lets the placement flags be
//! flipped without editing the file:
//!
//! - `BRRTDOC_EXAMPLES_IN_COMPONENTS`
//! - `BRRTDOC_SCHEMAS_IN_COMPONENTS`
//! - `BRRTDOC_PARAMETERS_IN_COMPONENTS`
//! - `BRRTDOC_REQUEST_BODIES_IN_COMPONENTS`
//! - `BRRTDOC_NAMING_POLICY` (`dedup_by_content` | `suffix_by_name`)

use crate::document::ApiKeyLocation;
use crate::dsl::ResponseDeclaration;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// How identifiers are chosen when two fragments of one kind share a
/// logical name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingPolicy {
    /// Identical payloads share one identifier; differing payloads get a
    /// numeric suffix (`sample`, `sample_1`, ...)
    #[default]
    DedupByContent,
    /// Every addition gets its own identifier, suffixed on name collision
    SuffixByName,
}

impl NamingPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "dedup_by_content" | "content" => Some(NamingPolicy::DedupByContent),
            "suffix_by_name" | "name" => Some(NamingPolicy::SuffixByName),
            _ => None,
        }
    }
}

/// Placement flags, read-only during generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsConfig {
    pub examples_in_components: bool,
    pub schemas_in_components: bool,
    pub parameters_in_components: bool,
    pub request_bodies_in_components: bool,
    pub naming_policy: NamingPolicy,
}

impl ComponentsConfig {
    /// Every hoistable kind goes to `components`.
    pub fn all_in_components() -> Self {
        Self {
            examples_in_components: true,
            schemas_in_components: true,
            parameters_in_components: true,
            request_bodies_in_components: true,
            naming_policy: NamingPolicy::default(),
        }
    }

    /// Apply `BRRTDOC_*` environment overrides.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_flag("BRRTDOC_EXAMPLES_IN_COMPONENTS") {
            self.examples_in_components = v;
        }
        if let Some(v) = env_flag("BRRTDOC_SCHEMAS_IN_COMPONENTS") {
            self.schemas_in_components = v;
        }
        if let Some(v) = env_flag("BRRTDOC_PARAMETERS_IN_COMPONENTS") {
            self.parameters_in_components = v;
        }
        if let Some(v) = env_flag("BRRTDOC_REQUEST_BODIES_IN_COMPONENTS") {
            self.request_bodies_in_components = v;
        }
        if let Some(policy) = env::var("BRRTDOC_NAMING_POLICY")
            .ok()
            .and_then(|v| NamingPolicy::parse(&v))
        {
            self.naming_policy = policy;
        }
        self
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoConfig {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub terms_of_service: Option<String>,
    pub contact: Option<ContactConfig>,
    pub license: Option<LicenseConfig>,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            version: "latest".to_string(),
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub name: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseConfig {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ServerConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub external_docs_url: Option<String>,
    #[serde(default)]
    pub external_docs_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthFlowConfig {
    pub authorization_url: Option<String>,
    pub token_url: Option<String>,
    pub refresh_url: Option<String>,
    pub scopes: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthFlowsConfig {
    pub implicit: Option<OAuthFlowConfig>,
    pub password: Option<OAuthFlowConfig>,
    pub client_credentials: Option<OAuthFlowConfig>,
    pub authorization_code: Option<OAuthFlowConfig>,
}

/// Declared security scheme, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SecuritySchemeConfig {
    ApiKey {
        name: String,
        location: ApiKeyLocation,
        #[serde(default)]
        description: Option<String>,
    },
    Http {
        scheme: String,
        #[serde(default)]
        bearer_format: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    #[serde(rename = "oauth2")]
    OAuth2 {
        flows: OAuthFlowsConfig,
        #[serde(default)]
        description: Option<String>,
    },
    OpenIdConnect {
        url: String,
        #[serde(default)]
        description: Option<String>,
    },
}

/// Complete configuration for one generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub info: InfoConfig,
    pub servers: Vec<ServerConfig>,
    pub tags: Vec<TagConfig>,
    pub security_schemes: IndexMap<String, SecuritySchemeConfig>,
    /// Schemes applied to protected routes that name none
    pub default_security_scheme_names: Vec<String>,
    /// Attached as `401` to protected routes without one
    pub default_unauthorized_response: Option<ResponseDeclaration>,
    pub components: ComponentsConfig,
}

impl GeneratorConfig {
    /// Load from a `.yaml`/`.yml`, `.json` or `.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        read_structured(path)
    }
}

/// Read and deserialize a file, choosing the format from its extension.
///
/// Unknown extensions are parsed as YAML, which also accepts JSON.
pub fn read_structured<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |message: String| Error::Parse {
        path: path.to_path_buf(),
        message,
    };
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
        _ => serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string())),
    }
}
