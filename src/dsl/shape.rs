use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// The declared shape of a value, from which a JSON Schema is derived.
///
/// In declaration files the variant is selected by `type`:
///
/// ```yaml
/// type: object
/// name: MathRequest
/// properties:
///   a: { type: integer, format: int32 }
///   b: { type: integer, format: int32 }
/// required: [a, b]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeShape {
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    Integer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
    },
    Boolean,
    /// Raw bytes
    Binary,
    Array {
        items: Box<TypeShape>,
    },
    /// String-keyed map with uniform values
    Map {
        values: Box<TypeShape>,
    },
    Object {
        /// Logical name; named objects can be hoisted into `components/schemas`
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        properties: IndexMap<String, TypeShape>,
        #[serde(default)]
        required: Vec<String>,
    },
    /// A JSON Schema supplied verbatim
    Raw {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        schema: Value,
    },
}

impl TypeShape {
    pub fn string() -> Self {
        TypeShape::String { format: None }
    }

    pub fn integer() -> Self {
        TypeShape::Integer { format: None }
    }

    pub fn number() -> Self {
        TypeShape::Number { format: None }
    }

    pub fn array(items: TypeShape) -> Self {
        TypeShape::Array {
            items: Box::new(items),
        }
    }

    pub fn map(values: TypeShape) -> Self {
        TypeShape::Map {
            values: Box::new(values),
        }
    }

    /// A named object with no properties yet
    pub fn object(name: impl Into<String>) -> Self {
        TypeShape::Object {
            name: Some(name.into()),
            properties: IndexMap::new(),
            required: Vec::new(),
        }
    }

    pub fn anonymous_object() -> Self {
        TypeShape::Object {
            name: None,
            properties: IndexMap::new(),
            required: Vec::new(),
        }
    }

    /// Add a property to an object shape. No-op for other shapes.
    pub fn property(mut self, name: impl Into<String>, shape: TypeShape, required: bool) -> Self {
        if let TypeShape::Object {
            properties,
            required: req,
            ..
        } = &mut self
        {
            let name = name.into();
            if required && !req.contains(&name) {
                req.push(name.clone());
            }
            properties.insert(name, shape);
        }
        self
    }

    pub fn with_format(self, format: impl Into<String>) -> Self {
        let format = Some(format.into());
        match self {
            TypeShape::String { .. } => TypeShape::String { format },
            TypeShape::Integer { .. } => TypeShape::Integer { format },
            TypeShape::Number { .. } => TypeShape::Number { format },
            other => other,
        }
    }

    /// The logical name used when this shape is hoisted
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeShape::Object { name, .. } | TypeShape::Raw { name, .. } => name.as_deref(),
            _ => None,
        }
    }

    /// Media type used when a body declares none.
    pub fn default_media_type(&self) -> &'static str {
        match self {
            TypeShape::String { .. }
            | TypeShape::Integer { .. }
            | TypeShape::Number { .. }
            | TypeShape::Boolean => TEXT_PLAIN,
            TypeShape::Binary => APPLICATION_OCTET_STREAM,
            TypeShape::Array { .. }
            | TypeShape::Map { .. }
            | TypeShape::Object { .. }
            | TypeShape::Raw { .. } => APPLICATION_JSON,
        }
    }
}
