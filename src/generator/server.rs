use crate::config::ServerConfig;
use crate::document::Server;

/// Generator for the OpenAPI Server Objects.
///
/// Servers are never hoisted and their order is kept: the first server is
/// the default one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServersGenerator;

impl ServersGenerator {
    pub fn generate(&self, configs: &[ServerConfig]) -> Vec<Server> {
        configs
            .iter()
            .map(|config| Server {
                url: config.url.clone(),
                description: config.description.clone(),
            })
            .collect()
    }
}
