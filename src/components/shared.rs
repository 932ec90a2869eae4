use super::context::{ComponentsContext, FrozenComponents};
use super::registry::ComponentKind;
use crate::config::ComponentsConfig;
use crate::document::{Example, Parameter, RequestBody, Schema, SecurityScheme};
use crate::error::{Error, Result};
use parking_lot::Mutex;

/// Single-writer wrapper for integrations that register routes from
/// several threads.
///
/// Every mutation takes the lock, so additions are serialized. Unlike
/// [`ComponentsContext`], freezing happens at runtime here: any addition
/// after [`SharedComponentsContext::freeze`] returns
/// [`Error::RegistryMisuse`].
#[derive(Debug)]
pub struct SharedComponentsContext {
    inner: Mutex<Option<ComponentsContext>>,
}

impl SharedComponentsContext {
    pub fn new(config: ComponentsConfig) -> Self {
        Self {
            inner: Mutex::new(Some(ComponentsContext::new(config))),
        }
    }

    /// Run `f` against the live context while holding the lock.
    ///
    /// `kind` and `name` identify the attempted addition in the misuse error.
    pub fn with<R>(
        &self,
        kind: ComponentKind,
        name: &str,
        f: impl FnOnce(&mut ComponentsContext) -> R,
    ) -> Result<R> {
        let mut guard = self.inner.lock();
        match guard.as_mut() {
            Some(ctx) => Ok(f(ctx)),
            None => Err(Error::RegistryMisuse {
                kind,
                name: name.to_string(),
            }),
        }
    }

    pub fn add_example(&self, name: &str, example: Example) -> Result<String> {
        self.with(ComponentKind::Examples, name, |ctx| {
            ctx.add_example(name, example)
        })
    }

    pub fn add_schema(&self, name: &str, schema: Schema) -> Result<String> {
        self.with(ComponentKind::Schemas, name, |ctx| ctx.add_schema(name, schema))
    }

    pub fn add_parameter(&self, name: &str, parameter: Parameter) -> Result<String> {
        self.with(ComponentKind::Parameters, name, |ctx| {
            ctx.add_parameter(name, parameter)
        })
    }

    pub fn add_request_body(&self, name: &str, body: RequestBody) -> Result<String> {
        self.with(ComponentKind::RequestBodies, name, |ctx| {
            ctx.add_request_body(name, body)
        })
    }

    pub fn add_security_scheme(&self, name: &str, scheme: SecurityScheme) -> Result<String> {
        self.with(ComponentKind::SecuritySchemes, name, |ctx| {
            ctx.add_security_scheme(name, scheme)
        })
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.lock().is_none()
    }

    /// Take the context out and render it. Returns `None` if already frozen.
    pub fn freeze(&self) -> Option<FrozenComponents> {
        self.inner.lock().take().map(ComponentsContext::render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_after_freeze_is_misuse() {
        let shared = SharedComponentsContext::new(ComponentsConfig::default());
        shared.add_example("sample", Example::default()).unwrap();
        let frozen = shared.freeze().unwrap();
        assert_eq!(frozen.as_components().examples.len(), 1);
        assert!(shared.is_frozen());
        assert!(shared.freeze().is_none());

        let err = shared.add_example("late", Example::default()).unwrap_err();
        match err {
            Error::RegistryMisuse { kind, name } => {
                assert_eq!(kind, ComponentKind::Examples);
                assert_eq!(name, "late");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_concurrent_additions_are_serialized() {
        let shared = SharedComponentsContext::new(ComponentsConfig::default());
        std::thread::scope(|scope| {
            for t in 0..4 {
                let shared = &shared;
                scope.spawn(move || {
                    for i in 0..25 {
                        let example = Example {
                            value: Some(json!({"thread": t, "i": i})),
                            ..Default::default()
                        };
                        shared.add_example("sample", example).unwrap();
                    }
                });
            }
        });
        let components = shared.freeze().unwrap().render();
        assert_eq!(components.examples.len(), 100);
        assert!(components.examples.contains_key("sample"));
        assert!(components.examples.contains_key("sample_99"));
    }
}
