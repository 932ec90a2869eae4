use super::{BodyGenerator, FragmentGenerator, ParameterGenerator, SchemaGenerator, TagInference};
use crate::components::ComponentsContext;
use crate::document::{Header, Operation, ParameterLocation, Response, SecurityRequirement};
use crate::dsl::{ResponseDeclaration, ResponseSelector, RouteDescriptor};
use crate::error::{ConfigurationError, Error, Result};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

const UNAUTHORIZED: &str = "401";

/// Builds one [`Operation`] per route.
///
/// Parameters keep their declaration order, and so do responses. Security
/// scheme names are resolved against the identifiers registered for the run.
/// Any failure is reported with the route identity attached.
pub struct RouteGenerator<'a> {
    security_scheme_ids: &'a IndexMap<String, String>,
    default_security_scheme_names: &'a [String],
    default_unauthorized_response: Option<&'a ResponseDeclaration>,
    tag_inference: Option<&'a TagInference>,
}

impl<'a> RouteGenerator<'a> {
    /// `security_scheme_ids` maps configured scheme names to their
    /// components identifiers.
    pub fn new(security_scheme_ids: &'a IndexMap<String, String>) -> Self {
        Self {
            security_scheme_ids,
            default_security_scheme_names: &[],
            default_unauthorized_response: None,
            tag_inference: None,
        }
    }

    pub fn default_security(mut self, names: &'a [String]) -> Self {
        self.default_security_scheme_names = names;
        self
    }

    pub fn unauthorized_response(mut self, response: Option<&'a ResponseDeclaration>) -> Self {
        self.default_unauthorized_response = response;
        self
    }

    pub fn tag_inference(mut self, inference: Option<&'a TagInference>) -> Self {
        self.tag_inference = inference;
        self
    }

    pub fn generate(
        &self,
        route: &RouteDescriptor,
        ctx: &mut ComponentsContext,
    ) -> Result<Operation> {
        self.build(route, ctx)
            .map_err(|source| Error::in_route(route.route_id(), source))
    }

    fn build(
        &self,
        route: &RouteDescriptor,
        ctx: &mut ComponentsContext,
    ) -> Result<Operation, ConfigurationError> {
        validate_parameters(route)?;
        let base = base_name(route);

        let mut parameters = Vec::with_capacity(route.parameters.len());
        for parameter in &route.parameters {
            parameters.push(ParameterGenerator.generate(&parameter.name, parameter, ctx)?);
        }

        let request_body = match &route.request_body {
            Some(body) => {
                let name = body
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("{base}_request"));
                Some(BodyGenerator.generate(&name, body, ctx)?)
            }
            None => None,
        };

        let mut responses = IndexMap::new();
        for (token, declaration) in &route.responses {
            let selector = ResponseSelector::parse(token)?;
            let response = self.response(&base, &selector, declaration, ctx)?;
            responses.insert(selector.to_string(), response);
        }

        let security = self.security(route)?;
        if !security.is_empty() && !responses.contains_key(UNAUTHORIZED) {
            if let Some(declaration) = self.default_unauthorized_response {
                let selector = ResponseSelector::parse(UNAUTHORIZED)?;
                let response = self.response(&base, &selector, declaration, ctx)?;
                responses.insert(UNAUTHORIZED.to_string(), response);
            }
        }

        let tags = if !route.tags.is_empty() {
            route.tags.clone()
        } else if let Some(infer) = self.tag_inference {
            infer(&route.path_segments())
        } else {
            Vec::new()
        };

        debug!(
            route = %route.route_id(),
            parameters = parameters.len(),
            responses = responses.len(),
            "built operation"
        );

        Ok(Operation {
            tags,
            summary: route.summary.clone(),
            description: route.description.clone(),
            operation_id: route.operation_id.clone(),
            parameters,
            request_body,
            responses,
            deprecated: route.deprecated,
            security,
        })
    }

    fn response(
        &self,
        base: &str,
        selector: &ResponseSelector,
        declaration: &ResponseDeclaration,
        ctx: &mut ComponentsContext,
    ) -> Result<Response, ConfigurationError> {
        let content = match &declaration.body {
            Some(body) => {
                let name = body
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("{base}_{selector}_response"));
                BodyGenerator.content(&name, body, ctx)?
            }
            None => IndexMap::new(),
        };

        let mut headers = IndexMap::new();
        for (name, header) in &declaration.headers {
            let schema = match &header.schema {
                Some(shape) => Some(SchemaGenerator.generate(name, shape, ctx)?),
                None => None,
            };
            headers.insert(
                name.clone(),
                Header {
                    description: header.description.clone(),
                    required: header.required,
                    schema,
                },
            );
        }

        Ok(Response {
            description: declaration.description.clone(),
            headers,
            content,
        })
    }

    /// One requirement per scheme: any of them grants access.
    fn security(
        &self,
        route: &RouteDescriptor,
    ) -> Result<Vec<SecurityRequirement>, ConfigurationError> {
        let protected = route.protected || !route.security_scheme_names.is_empty();
        if !protected {
            return Ok(Vec::new());
        }
        let names = if route.security_scheme_names.is_empty() {
            self.default_security_scheme_names
        } else {
            route.security_scheme_names.as_slice()
        };
        if names.is_empty() {
            return Err(ConfigurationError::MissingSecurityScheme);
        }
        names
            .iter()
            .map(|name| -> Result<SecurityRequirement, ConfigurationError> {
                let id = self
                    .security_scheme_ids
                    .get(name)
                    .ok_or_else(|| ConfigurationError::UnknownSecurityScheme(name.clone()))?;
                let mut requirement = SecurityRequirement::new();
                requirement.insert(id.clone(), Vec::new());
                Ok(requirement)
            })
            .collect()
    }
}

fn validate_parameters(route: &RouteDescriptor) -> Result<(), ConfigurationError> {
    let placeholders = route.path_placeholders();
    let mut seen = HashSet::new();
    for parameter in &route.parameters {
        if !seen.insert((parameter.location, parameter.name.as_str())) {
            return Err(ConfigurationError::DuplicateParameter {
                name: parameter.name.clone(),
                location: parameter.location.to_string(),
            });
        }
        if parameter.location == ParameterLocation::Path
            && !placeholders.contains(&parameter.name.as_str())
        {
            return Err(ConfigurationError::UnboundPathParameter(parameter.name.clone()));
        }
    }
    if let Some(placeholder) = placeholders
        .iter()
        .find(|name| !seen.contains(&(ParameterLocation::Path, **name)))
    {
        return Err(ConfigurationError::UndeclaredPathParameter(
            placeholder.to_string(),
        ));
    }
    Ok(())
}

/// Logical name prefix for the route's anonymous bodies, e.g.
/// `post_math_operation` for `POST /math/{operation}`.
fn base_name(route: &RouteDescriptor) -> String {
    if let Some(operation_id) = &route.operation_id {
        return operation_id.clone();
    }
    let method = route.method.as_str().to_ascii_lowercase();
    let segments: Vec<&str> = route
        .path_segments()
        .into_iter()
        .map(|s| s.trim_matches(|c| c == '{' || c == '}'))
        .collect();
    if segments.is_empty() {
        format!("{method}_root")
    } else {
        format!("{method}_{}", segments.join("_"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentsConfig;
    use crate::dsl::{BodyDeclaration, HeaderDeclaration, ParameterDeclaration, TypeShape};
    use crate::generator::first_path_segment;

    fn no_schemes() -> IndexMap<String, String> {
        IndexMap::new()
    }

    fn inline_ctx() -> ComponentsContext {
        ComponentsContext::new(ComponentsConfig::default())
    }

    #[test]
    fn test_default_and_status_responses() {
        let schemes = no_schemes();
        let route = RouteDescriptor::get("/hello")
            .response("default", ResponseDeclaration::new("unexpected"))
            .response("200", ResponseDeclaration::new("ok"));
        let op = RouteGenerator::new(&schemes)
            .generate(&route, &mut inline_ctx())
            .unwrap();
        assert_eq!(op.responses.keys().collect::<Vec<_>>(), vec!["default", "200"]);
        assert_eq!(op.responses["200"].description, "ok");
    }

    #[test]
    fn test_invalid_status_carries_route() {
        let schemes = no_schemes();
        let route = RouteDescriptor::get("/hello").response("2OO", ResponseDeclaration::new("ok"));
        let err = RouteGenerator::new(&schemes)
            .generate(&route, &mut inline_ctx())
            .unwrap_err();
        match err {
            Error::Route { route, source } => {
                assert_eq!(route, "GET /hello");
                assert_eq!(source, ConfigurationError::InvalidStatus("2OO".to_string()));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parameters_keep_order() {
        let schemes = no_schemes();
        let route = RouteDescriptor::get("/users/{id}")
            .parameter(ParameterDeclaration::query("limit"))
            .parameter(ParameterDeclaration::path("id"))
            .parameter(ParameterDeclaration::header("X-Trace"));
        let op = RouteGenerator::new(&schemes)
            .generate(&route, &mut inline_ctx())
            .unwrap();
        let names: Vec<&str> = op
            .parameters
            .iter()
            .map(|p| p.as_inline().unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["limit", "id", "X-Trace"]);
    }

    #[test]
    fn test_unbound_path_parameter() {
        let schemes = no_schemes();
        let route = RouteDescriptor::get("/users").parameter(ParameterDeclaration::path("id"));
        let err = RouteGenerator::new(&schemes)
            .generate(&route, &mut inline_ctx())
            .unwrap_err();
        assert_eq!(
            err.configuration(),
            Some(&ConfigurationError::UnboundPathParameter("id".to_string()))
        );
    }

    #[test]
    fn test_undeclared_path_placeholder() {
        let schemes = no_schemes();
        let route = RouteDescriptor::get("/users/{id}")
            .parameter(ParameterDeclaration::query("id"))
            .response("200", ResponseDeclaration::new("ok"));
        let err = RouteGenerator::new(&schemes)
            .generate(&route, &mut inline_ctx())
            .unwrap_err();
        assert_eq!(
            err.configuration(),
            Some(&ConfigurationError::UndeclaredPathParameter("id".to_string()))
        );
        assert!(err.to_string().contains("GET /users/{id}"));
    }

    #[test]
    fn test_duplicate_parameter() {
        let schemes = no_schemes();
        let route = RouteDescriptor::get("/users")
            .parameter(ParameterDeclaration::query("page"))
            .parameter(ParameterDeclaration::header("page"))
            .parameter(ParameterDeclaration::query("page"));
        let err = RouteGenerator::new(&schemes)
            .generate(&route, &mut inline_ctx())
            .unwrap_err();
        assert_eq!(
            err.configuration(),
            Some(&ConfigurationError::DuplicateParameter {
                name: "page".to_string(),
                location: "query".to_string(),
            })
        );
    }

    #[test]
    fn test_request_body_default_name() {
        let schemes = no_schemes();
        let mut ctx = ComponentsContext::new(ComponentsConfig {
            request_bodies_in_components: true,
            ..Default::default()
        });
        let route = RouteDescriptor::post("/math/{operation}")
            .parameter(ParameterDeclaration::path("operation"))
            .request_body(BodyDeclaration::new(TypeShape::string()));
        let op = RouteGenerator::new(&schemes).generate(&route, &mut ctx).unwrap();
        assert_eq!(
            op.request_body.unwrap().ref_path(),
            Some("#/components/requestBodies/post_math_operation_request")
        );
    }

    #[test]
    fn test_response_headers() {
        let schemes = no_schemes();
        let route = RouteDescriptor::get("/items").response(
            "200",
            ResponseDeclaration::new("ok").header(
                "X-Rate-Limit",
                HeaderDeclaration {
                    schema: Some(TypeShape::integer()),
                    description: Some("calls left".to_string()),
                    required: true,
                },
            ),
        );
        let op = RouteGenerator::new(&schemes)
            .generate(&route, &mut inline_ctx())
            .unwrap();
        let header = &op.responses["200"].headers["X-Rate-Limit"];
        assert!(header.required);
        assert_eq!(
            header.schema.as_ref().unwrap().as_inline().unwrap().type_name(),
            Some("integer")
        );
    }

    #[test]
    fn test_security_and_default_unauthorized() {
        let mut schemes = IndexMap::new();
        schemes.insert("BearerAuth".to_string(), "BearerAuth".to_string());
        let defaults = vec!["BearerAuth".to_string()];
        let unauthorized = ResponseDeclaration::new("missing or invalid credentials");
        let generator = RouteGenerator::new(&schemes)
            .default_security(&defaults)
            .unauthorized_response(Some(&unauthorized));

        let route = RouteDescriptor::get("/me")
            .protected(true)
            .response("200", ResponseDeclaration::new("ok"));
        let op = generator.generate(&route, &mut inline_ctx()).unwrap();
        assert_eq!(op.security.len(), 1);
        assert!(op.security[0].contains_key("BearerAuth"));
        assert_eq!(op.responses.keys().collect::<Vec<_>>(), vec!["200", "401"]);

        let open = RouteDescriptor::get("/health").response("200", ResponseDeclaration::new("ok"));
        let op = generator.generate(&open, &mut inline_ctx()).unwrap();
        assert!(op.security.is_empty());
        assert!(!op.responses.contains_key("401"));
    }

    #[test]
    fn test_protected_route_without_any_scheme() {
        let schemes = no_schemes();
        let route = RouteDescriptor::get("/me").protected(true);
        let err = RouteGenerator::new(&schemes)
            .generate(&route, &mut inline_ctx())
            .unwrap_err();
        assert_eq!(
            err.configuration(),
            Some(&ConfigurationError::MissingSecurityScheme)
        );
        assert!(err.to_string().contains("GET /me"));
    }

    #[test]
    fn test_unknown_security_scheme() {
        let schemes = no_schemes();
        let route = RouteDescriptor::get("/me").secured_by("Missing");
        let err = RouteGenerator::new(&schemes)
            .generate(&route, &mut inline_ctx())
            .unwrap_err();
        assert_eq!(
            err.configuration(),
            Some(&ConfigurationError::UnknownSecurityScheme("Missing".to_string()))
        );
    }

    #[test]
    fn test_tag_inference_only_without_tags() {
        let schemes = no_schemes();
        let infer: &TagInference = &first_path_segment;
        let generator = RouteGenerator::new(&schemes).tag_inference(Some(infer));

        let route = RouteDescriptor::get("/math/{operation}")
            .parameter(ParameterDeclaration::path("operation"));
        let inferred = generator.generate(&route, &mut inline_ctx()).unwrap();
        assert_eq!(inferred.tags, vec!["math"]);

        let explicit = generator
            .generate(&RouteDescriptor::get("/math").tag("calculator"), &mut inline_ctx())
            .unwrap();
        assert_eq!(explicit.tags, vec!["calculator"]);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(&RouteDescriptor::post("/math/{operation}")), "post_math_operation");
        assert_eq!(base_name(&RouteDescriptor::get("/")), "get_root");
        assert_eq!(
            base_name(&RouteDescriptor::get("/x").operation_id("listThings")),
            "listThings"
        );
    }
}
