use super::{
    InfoGenerator, RouteGenerator, SecuritySchemeGenerator, ServersGenerator, TagInference,
    TagsGenerator,
};
use crate::components::ComponentsContext;
use crate::config::GeneratorConfig;
use crate::document::{Document, PathItem, OPENAPI_VERSION};
use crate::dsl::RouteDescriptor;
use crate::error::{ConfigurationError, Result};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, info, info_span};

/// Assembles a complete [`Document`] from route declarations.
///
/// Each call to [`generate`](Self::generate) is one independent run with its
/// own components registry: routes are turned into operations in
/// declaration order, grouped by path and method, and the registry is
/// rendered once at the end. Generation is all-or-nothing.
pub struct DocumentGenerator {
    config: GeneratorConfig,
    tag_inference: Option<Box<TagInference>>,
}

impl fmt::Debug for DocumentGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentGenerator")
            .field("config", &self.config)
            .field("tag_inference", &self.tag_inference.is_some())
            .finish()
    }
}

impl DocumentGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            tag_inference: None,
        }
    }

    /// Derive tags for routes that declare none.
    pub fn with_tag_inference<F>(mut self, inference: F) -> Self
    where
        F: Fn(&[&str]) -> Vec<String> + Send + Sync + 'static,
    {
        self.tag_inference = Some(Box::new(inference));
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, routes: &[RouteDescriptor]) -> Result<Document> {
        let span = info_span!("generate_document", routes = routes.len());
        let _enter = span.enter();

        let mut ctx = ComponentsContext::new(self.config.components.clone());

        let mut scheme_ids = IndexMap::new();
        for (name, scheme) in &self.config.security_schemes {
            let id = SecuritySchemeGenerator.register(name, scheme, &mut ctx);
            scheme_ids.insert(name.clone(), id);
        }
        if let Some(unknown) = self
            .config
            .default_security_scheme_names
            .iter()
            .find(|name| !scheme_ids.contains_key(*name))
        {
            return Err(ConfigurationError::UnknownSecurityScheme(unknown.clone()).into());
        }

        let route_generator = RouteGenerator::new(&scheme_ids)
            .default_security(&self.config.default_security_scheme_names)
            .unauthorized_response(self.config.default_unauthorized_response.as_ref())
            .tag_inference(self.tag_inference.as_deref());

        let mut seen = HashSet::new();
        let mut paths: IndexMap<String, PathItem> = IndexMap::new();
        for route in routes {
            if route.hidden {
                debug!(route = %route.route_id(), "skipping hidden route");
                continue;
            }
            if !seen.insert((route.method.clone(), route.path_shape())) {
                return Err(ConfigurationError::DuplicateRoute(route.route_id()).into());
            }
            let operation = route_generator.generate(route, &mut ctx)?;
            paths
                .entry(route.path.clone())
                .or_default()
                .insert(&route.method, operation);
        }

        let component_count = ctx.len();
        let components = ctx.render();

        let document = Document {
            openapi: OPENAPI_VERSION.to_string(),
            info: InfoGenerator.generate(&self.config.info),
            servers: ServersGenerator.generate(&self.config.servers),
            tags: TagsGenerator.generate(&self.config.tags),
            paths,
            components: components.into_section(),
        };

        info!(
            paths = document.paths.len(),
            operations = document.operation_count(),
            components = component_count,
            "generated OpenAPI document"
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SecuritySchemeConfig, ServerConfig};
    use crate::dsl::ResponseDeclaration;
    use crate::error::Error;
    use crate::generator::first_path_segment;
    use http::Method;

    fn ok() -> ResponseDeclaration {
        ResponseDeclaration::new("ok")
    }

    #[test]
    fn test_groups_methods_by_path() {
        let routes = vec![
            RouteDescriptor::get("/items").response("200", ok()),
            RouteDescriptor::get("/health").response("200", ok()),
            RouteDescriptor::post("/items").response("201", ResponseDeclaration::new("created")),
        ];
        let doc = DocumentGenerator::new(GeneratorConfig::default())
            .generate(&routes)
            .unwrap();
        assert_eq!(doc.openapi, "3.1.0");
        assert_eq!(doc.paths.keys().collect::<Vec<_>>(), vec!["/items", "/health"]);
        let items = &doc.paths["/items"];
        assert!(items.get(&Method::GET).is_some());
        assert!(items.get(&Method::POST).is_some());
        assert_eq!(doc.operation_count(), 3);
        assert!(doc.components.is_none());
    }

    #[test]
    fn test_duplicate_route() {
        let routes = vec![
            RouteDescriptor::get("/items").response("200", ok()),
            RouteDescriptor::get("/items").response("204", ResponseDeclaration::new("empty")),
        ];
        let err = DocumentGenerator::new(GeneratorConfig::default())
            .generate(&routes)
            .unwrap_err();
        assert_eq!(
            err.configuration(),
            Some(&ConfigurationError::DuplicateRoute("GET /items".to_string()))
        );
    }

    #[test]
    fn test_duplicate_route_with_renamed_placeholder() {
        use crate::dsl::ParameterDeclaration;

        let routes = vec![
            RouteDescriptor::get("/users/{id}")
                .parameter(ParameterDeclaration::path("id"))
                .response("200", ok()),
            RouteDescriptor::get("/users/{uid}")
                .parameter(ParameterDeclaration::path("uid"))
                .response("200", ok()),
            RouteDescriptor::delete("/users/{uid}")
                .parameter(ParameterDeclaration::path("uid"))
                .response("204", ResponseDeclaration::new("deleted")),
        ];
        let err = DocumentGenerator::new(GeneratorConfig::default())
            .generate(&routes)
            .unwrap_err();
        assert_eq!(
            err.configuration(),
            Some(&ConfigurationError::DuplicateRoute("GET /users/{uid}".to_string()))
        );

        let doc = DocumentGenerator::new(GeneratorConfig::default())
            .generate(&[routes[0].clone(), routes[2].clone()])
            .unwrap();
        assert_eq!(
            doc.paths.keys().collect::<Vec<_>>(),
            vec!["/users/{id}", "/users/{uid}"]
        );
    }

    #[test]
    fn test_hidden_routes_skipped() {
        let routes = vec![
            RouteDescriptor::get("/internal").hidden(true),
            RouteDescriptor::get("/internal").response("200", ok()),
        ];
        let doc = DocumentGenerator::new(GeneratorConfig::default())
            .generate(&routes)
            .unwrap();
        assert_eq!(doc.operation_count(), 1);
    }

    #[test]
    fn test_no_partial_document_on_error() {
        let routes = vec![
            RouteDescriptor::get("/good").response("200", ok()),
            RouteDescriptor::get("/bad").response("9000", ok()),
        ];
        let err = DocumentGenerator::new(GeneratorConfig::default())
            .generate(&routes)
            .unwrap_err();
        assert!(matches!(err, Error::Route { ref route, .. } if route == "GET /bad"));
    }

    #[test]
    fn test_servers_and_security_schemes() {
        let mut config = GeneratorConfig {
            servers: vec![
                ServerConfig::new("https://a.example.com"),
                ServerConfig::new("https://b.example.com"),
            ],
            default_security_scheme_names: vec!["BearerAuth".to_string()],
            ..Default::default()
        };
        config.security_schemes.insert(
            "BearerAuth".to_string(),
            SecuritySchemeConfig::Http {
                scheme: "bearer".to_string(),
                bearer_format: Some("JWT".to_string()),
                description: None,
            },
        );
        let routes = vec![RouteDescriptor::get("/me").protected(true).response("200", ok())];
        let doc = DocumentGenerator::new(config).generate(&routes).unwrap();
        assert_eq!(doc.servers[0].url, "https://a.example.com");
        let components = doc.components.as_ref().unwrap();
        assert!(components.security_schemes.contains_key("BearerAuth"));
        let op = doc.paths["/me"].get(&Method::GET).unwrap();
        assert!(op.security[0].contains_key("BearerAuth"));
        assert!(doc.unresolved_references().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_default_security_scheme() {
        let config = GeneratorConfig {
            default_security_scheme_names: vec!["Nope".to_string()],
            ..Default::default()
        };
        let err = DocumentGenerator::new(config).generate(&[]).unwrap_err();
        assert!(matches!(
            err,
            Error::Configuration(ConfigurationError::UnknownSecurityScheme(ref name)) if name == "Nope"
        ));
    }

    #[test]
    fn test_tag_inference_injected() {
        let routes = vec![RouteDescriptor::get("/math/add").response("200", ok())];
        let doc = DocumentGenerator::new(GeneratorConfig::default())
            .with_tag_inference(first_path_segment)
            .generate(&routes)
            .unwrap();
        assert_eq!(doc.paths["/math/add"].get(&Method::GET).unwrap().tags, vec!["math"]);
    }
}
