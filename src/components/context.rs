use super::registry::{ComponentKind, Registry};
use crate::config::ComponentsConfig;
use crate::document::{Components, Example, Parameter, RequestBody, Schema, SecurityScheme};
use tracing::debug;

/// Per-run registry of hoisted fragments.
///
/// Created once per generation run and passed explicitly to every
/// generator. [`ComponentsContext::render`] consumes the context, so no
/// fragment can be added once the components section exists.
#[derive(Debug, Clone)]
pub struct ComponentsContext {
    config: ComponentsConfig,
    schemas: Registry<Schema>,
    parameters: Registry<Parameter>,
    request_bodies: Registry<RequestBody>,
    examples: Registry<Example>,
    security_schemes: Registry<SecurityScheme>,
}

impl ComponentsContext {
    pub fn new(config: ComponentsConfig) -> Self {
        let policy = config.naming_policy;
        Self {
            schemas: Registry::new(ComponentKind::Schemas, policy),
            parameters: Registry::new(ComponentKind::Parameters, policy),
            request_bodies: Registry::new(ComponentKind::RequestBodies, policy),
            examples: Registry::new(ComponentKind::Examples, policy),
            security_schemes: Registry::new(ComponentKind::SecuritySchemes, policy),
            config,
        }
    }

    pub fn config(&self) -> &ComponentsConfig {
        &self.config
    }

    pub fn examples_in_components(&self) -> bool {
        self.config.examples_in_components
    }

    pub fn schemas_in_components(&self) -> bool {
        self.config.schemas_in_components
    }

    pub fn parameters_in_components(&self) -> bool {
        self.config.parameters_in_components
    }

    pub fn request_bodies_in_components(&self) -> bool {
        self.config.request_bodies_in_components
    }

    pub fn add_example(&mut self, name: &str, example: Example) -> String {
        let id = self.examples.insert(name, example);
        debug!(kind = %ComponentKind::Examples, name, id = %id, "registered component");
        id
    }

    pub fn add_schema(&mut self, name: &str, schema: Schema) -> String {
        let id = self.schemas.insert(name, schema);
        debug!(kind = %ComponentKind::Schemas, name, id = %id, "registered component");
        id
    }

    pub fn add_parameter(&mut self, name: &str, parameter: Parameter) -> String {
        let id = self.parameters.insert(name, parameter);
        debug!(kind = %ComponentKind::Parameters, name, id = %id, "registered component");
        id
    }

    pub fn add_request_body(&mut self, name: &str, body: RequestBody) -> String {
        let id = self.request_bodies.insert(name, body);
        debug!(kind = %ComponentKind::RequestBodies, name, id = %id, "registered component");
        id
    }

    pub fn add_security_scheme(&mut self, name: &str, scheme: SecurityScheme) -> String {
        let id = self.security_schemes.insert(name, scheme);
        debug!(kind = %ComponentKind::SecuritySchemes, name, id = %id, "registered component");
        id
    }

    /// Whether an entry with this identifier exists for the kind.
    pub fn contains(&self, kind: ComponentKind, id: &str) -> bool {
        match kind {
            ComponentKind::Schemas => self.schemas.contains(id),
            ComponentKind::Parameters => self.parameters.contains(id),
            ComponentKind::RequestBodies => self.request_bodies.contains(id),
            ComponentKind::Examples => self.examples.contains(id),
            ComponentKind::SecuritySchemes => self.security_schemes.contains(id),
        }
    }

    /// Total number of registered entries across kinds.
    pub fn len(&self) -> usize {
        self.schemas.len()
            + self.parameters.len()
            + self.request_bodies.len()
            + self.examples.len()
            + self.security_schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the registry and build the components section.
    pub fn render(self) -> FrozenComponents {
        FrozenComponents {
            components: Components {
                schemas: self.schemas.into_entries(),
                parameters: self.parameters.into_entries(),
                request_bodies: self.request_bodies.into_entries(),
                examples: self.examples.into_entries(),
                security_schemes: self.security_schemes.into_entries(),
            },
        }
    }
}

/// The immutable registry after rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenComponents {
    components: Components,
}

impl FrozenComponents {
    /// The components section; identical on every call.
    pub fn render(&self) -> Components {
        self.components.clone()
    }

    pub fn as_components(&self) -> &Components {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// `None` when nothing was registered, so the document omits the section.
    pub fn into_section(self) -> Option<Components> {
        if self.components.is_empty() {
            None
        } else {
            Some(self.components)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn example(value: serde_json::Value) -> Example {
        Example {
            value: Some(value),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_and_render() {
        let mut ctx = ComponentsContext::new(ComponentsConfig::default());
        assert!(ctx.is_empty());
        let a = ctx.add_example("sample", example(json!({"a": 1})));
        let b = ctx.add_example("sample", example(json!({"a": 2})));
        assert_eq!((a.as_str(), b.as_str()), ("sample", "sample_1"));
        assert!(ctx.contains(ComponentKind::Examples, "sample_1"));
        assert!(!ctx.contains(ComponentKind::Schemas, "sample"));

        let frozen = ctx.render();
        let first = serde_json::to_string(&frozen.render()).unwrap();
        let second = serde_json::to_string(&frozen.render()).unwrap();
        assert_eq!(first, second);
        assert_eq!(frozen.as_components().examples.len(), 2);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut ctx = ComponentsContext::new(ComponentsConfig::default());
        let schema_id = ctx.add_schema("Item", Schema::default());
        let example_id = ctx.add_example("Item", Example::default());
        assert_eq!(schema_id, "Item");
        assert_eq!(example_id, "Item");
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_empty_render_has_no_section() {
        let ctx = ComponentsContext::new(ComponentsConfig::default());
        assert!(ctx.render().into_section().is_none());
    }
}
