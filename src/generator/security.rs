use super::FragmentGenerator;
use crate::components::{ComponentKind, ComponentsContext};
use crate::config::{OAuthFlowConfig, OAuthFlowsConfig, SecuritySchemeConfig};
use crate::document::{OAuthFlow, OAuthFlows, RefOr, SecurityScheme};
use crate::error::ConfigurationError;

/// Generator for the OpenAPI Security Scheme Object.
///
/// Security schemes only exist in `components`; use sites refer to them by
/// identifier in security requirements.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecuritySchemeGenerator;

impl SecuritySchemeGenerator {
    pub fn scheme(&self, config: &SecuritySchemeConfig) -> SecurityScheme {
        match config {
            SecuritySchemeConfig::ApiKey {
                name,
                location,
                description,
            } => SecurityScheme::ApiKey {
                name: name.clone(),
                location: *location,
                description: description.clone(),
            },
            SecuritySchemeConfig::Http {
                scheme,
                bearer_format,
                description,
            } => SecurityScheme::Http {
                scheme: scheme.clone(),
                bearer_format: bearer_format.clone(),
                description: description.clone(),
            },
            SecuritySchemeConfig::OAuth2 { flows, description } => SecurityScheme::OAuth2 {
                flows: oauth_flows(flows),
                description: description.clone(),
            },
            SecuritySchemeConfig::OpenIdConnect { url, description } => {
                SecurityScheme::OpenIdConnect {
                    open_id_connect_url: url.clone(),
                    description: description.clone(),
                }
            }
        }
    }

    /// Register the scheme and return its components identifier.
    pub fn register(
        &self,
        name: &str,
        config: &SecuritySchemeConfig,
        ctx: &mut ComponentsContext,
    ) -> String {
        ctx.add_security_scheme(name, self.scheme(config))
    }
}

fn oauth_flows(config: &OAuthFlowsConfig) -> OAuthFlows {
    OAuthFlows {
        implicit: config.implicit.as_ref().map(oauth_flow),
        password: config.password.as_ref().map(oauth_flow),
        client_credentials: config.client_credentials.as_ref().map(oauth_flow),
        authorization_code: config.authorization_code.as_ref().map(oauth_flow),
    }
}

fn oauth_flow(config: &OAuthFlowConfig) -> OAuthFlow {
    OAuthFlow {
        authorization_url: config.authorization_url.clone(),
        token_url: config.token_url.clone(),
        refresh_url: config.refresh_url.clone(),
        scopes: config.scopes.clone(),
    }
}

impl FragmentGenerator for SecuritySchemeGenerator {
    type Declaration = SecuritySchemeConfig;
    type Fragment = SecurityScheme;

    fn generate(
        &self,
        name: &str,
        declaration: &SecuritySchemeConfig,
        ctx: &mut ComponentsContext,
    ) -> Result<RefOr<SecurityScheme>, ConfigurationError> {
        let id = self.register(name, declaration, ctx);
        Ok(RefOr::reference(ComponentKind::SecuritySchemes.ref_path(&id)))
    }
}
