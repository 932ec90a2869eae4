use super::FragmentGenerator;
use crate::components::{ComponentKind, ComponentsContext};
use crate::document::{RefOr, Schema};
use crate::dsl::TypeShape;
use crate::error::ConfigurationError;
use serde_json::{json, Map, Value};

/// Generator for JSON Schemas derived from declared [`TypeShape`]s.
///
/// Named objects (and named raw schemas) are hoisted into
/// `components/schemas` when `schemas_in_components` is set, at any depth;
/// everything else is inlined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaGenerator;

impl SchemaGenerator {
    fn build(
        &self,
        name: &str,
        shape: &TypeShape,
        ctx: &mut ComponentsContext,
    ) -> Result<Value, ConfigurationError> {
        let value = match shape {
            TypeShape::String { format } => scalar("string", format.as_deref()),
            TypeShape::Integer { format } => scalar("integer", format.as_deref()),
            TypeShape::Number { format } => scalar("number", format.as_deref()),
            TypeShape::Boolean => json!({ "type": "boolean" }),
            TypeShape::Binary => json!({ "type": "string", "format": "binary" }),
            TypeShape::Array { items } => {
                let items = self.build(name, items, ctx)?;
                json!({ "type": "array", "items": items })
            }
            TypeShape::Map { values } => {
                let values = self.build(name, values, ctx)?;
                json!({ "type": "object", "additionalProperties": values })
            }
            TypeShape::Object {
                name: object_name,
                properties,
                required,
            } => {
                let label = object_name.as_deref().unwrap_or(name);
                let mut props = Map::new();
                for (prop, prop_shape) in properties {
                    if prop.is_empty() {
                        return Err(unsupported(label, "empty property name"));
                    }
                    props.insert(prop.clone(), self.build(prop, prop_shape, ctx)?);
                }
                if let Some(missing) = required.iter().find(|r| !properties.contains_key(*r)) {
                    return Err(unsupported(
                        label,
                        &format!("required property '{missing}' is not declared"),
                    ));
                }
                let mut schema = Map::new();
                schema.insert("type".to_string(), json!("object"));
                if !props.is_empty() {
                    schema.insert("properties".to_string(), Value::Object(props));
                }
                if !required.is_empty() {
                    schema.insert("required".to_string(), json!(required));
                }
                return Ok(self.place(object_name.as_deref(), schema, ctx));
            }
            TypeShape::Raw {
                name: raw_name,
                schema,
            } => {
                let Value::Object(schema) = schema else {
                    return Err(unsupported(
                        raw_name.as_deref().unwrap_or(name),
                        "raw schema must be a JSON object",
                    ));
                };
                return Ok(self.place(raw_name.as_deref(), schema.clone(), ctx));
            }
        };
        Ok(value)
    }

    /// Hoist a named schema when configured, otherwise inline it.
    fn place(
        &self,
        logical_name: Option<&str>,
        schema: Map<String, Value>,
        ctx: &mut ComponentsContext,
    ) -> Value {
        match logical_name {
            Some(name) if ctx.schemas_in_components() => {
                let id = ctx.add_schema(name, Schema(schema));
                json!({ "$ref": ComponentKind::Schemas.ref_path(&id) })
            }
            _ => Value::Object(schema),
        }
    }
}

fn scalar(kind: &str, format: Option<&str>) -> Value {
    match format {
        Some(format) => json!({ "type": kind, "format": format }),
        None => json!({ "type": kind }),
    }
}

fn unsupported(name: &str, reason: &str) -> ConfigurationError {
    ConfigurationError::UnsupportedSchema {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

impl FragmentGenerator for SchemaGenerator {
    type Declaration = TypeShape;
    type Fragment = Schema;

    fn generate(
        &self,
        name: &str,
        declaration: &TypeShape,
        ctx: &mut ComponentsContext,
    ) -> Result<RefOr<Schema>, ConfigurationError> {
        match self.build(name, declaration, ctx)? {
            Value::Object(map) => match map.get("$ref").and_then(Value::as_str) {
                Some(ref_path) if map.len() == 1 => Ok(RefOr::reference(ref_path)),
                _ => Ok(RefOr::Inline(Schema(map))),
            },
            _ => Err(unsupported(name, "schema did not produce an object")),
        }
    }
}
