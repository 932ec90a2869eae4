use super::shape::TypeShape;
use crate::document::ParameterLocation;
use crate::error::ConfigurationError;
use http::{Method, StatusCode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

mod method_serde {
    use http::Method;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Method, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Method::from_bytes(raw.to_ascii_uppercase().as_bytes())
            .map_err(|_| D::Error::custom(format!("invalid HTTP method '{raw}'")))
    }
}

/// A named example attached to a body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleDeclaration {
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExampleDeclaration {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            summary: None,
            description: None,
        }
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A request or response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyDeclaration {
    /// Logical name used when the body itself is hoisted into `components`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<TypeShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub examples: IndexMap<String, ExampleDeclaration>,
    /// Allowed media types; empty means derive one from the schema
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_types: Vec<String>,
}

impl BodyDeclaration {
    pub fn new(schema: TypeShape) -> Self {
        Self {
            schema: Some(schema),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn example(mut self, name: impl Into<String>, example: ExampleDeclaration) -> Self {
        self.examples.insert(name.into(), example);
        self
    }

    /// Add an allowed media type; duplicates are ignored.
    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        let media_type = media_type.into();
        if !self.media_types.contains(&media_type) {
            self.media_types.push(media_type);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDeclaration {
    pub name: String,
    pub location: ParameterLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<TypeShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ignored for path parameters, which are always required
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

impl ParameterDeclaration {
    pub fn new(name: impl Into<String>, location: ParameterLocation) -> Self {
        Self {
            name: name.into(),
            location,
            schema: None,
            description: None,
            required: false,
            deprecated: false,
            example: None,
        }
    }

    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Path)
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Query)
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self::new(name, ParameterLocation::Header)
    }

    pub fn schema(mut self, schema: TypeShape) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderDeclaration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<TypeShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseDeclaration {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyDeclaration>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, HeaderDeclaration>,
}

impl ResponseDeclaration {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn body(mut self, body: BodyDeclaration) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: impl Into<String>, header: HeaderDeclaration) -> Self {
        self.headers.insert(name.into(), header);
        self
    }
}

/// Key of a response entry: a concrete status code or `default`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseSelector {
    Default,
    Status(StatusCode),
}

impl ResponseSelector {
    /// Parse a selector token.
    ///
    /// Accepts exactly `default` or a three-digit status code in `100..=599`.
    pub fn parse(token: &str) -> Result<Self, ConfigurationError> {
        if token == "default" {
            return Ok(ResponseSelector::Default);
        }
        let invalid = || ConfigurationError::InvalidStatus(token.to_string());
        if token.len() != 3 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let code: u16 = token.parse().map_err(|_| invalid())?;
        if !(100..=599).contains(&code) {
            return Err(invalid());
        }
        StatusCode::from_u16(code)
            .map(ResponseSelector::Status)
            .map_err(|_| invalid())
    }
}

impl std::fmt::Display for ResponseSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseSelector::Default => write!(f, "default"),
            ResponseSelector::Status(code) => write!(f, "{}", code.as_u16()),
        }
    }
}

/// Everything declared for one route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    #[serde(with = "method_serde")]
    pub method: Method,
    /// Path template with `{param}` placeholders
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    /// Hidden routes are left out of the document
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub protected: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_scheme_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<BodyDeclaration>,
    /// Raw selector token (`"200"`, `"default"`) -> response
    #[serde(default)]
    pub responses: IndexMap<String, ResponseDeclaration>,
}

impl RouteDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            tags: Vec::new(),
            summary: None,
            description: None,
            operation_id: None,
            deprecated: false,
            hidden: false,
            protected: false,
            security_scheme_names: Vec::new(),
            parameters: Vec::new(),
            request_body: None,
            responses: IndexMap::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Mark as protected by the named scheme.
    pub fn secured_by(mut self, scheme: impl Into<String>) -> Self {
        self.protected = true;
        self.security_scheme_names.push(scheme.into());
        self
    }

    /// Mark as protected by the configured default schemes.
    pub fn protected(mut self, protected: bool) -> Self {
        self.protected = protected;
        self
    }

    pub fn parameter(mut self, parameter: ParameterDeclaration) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn request_body(mut self, body: BodyDeclaration) -> Self {
        self.request_body = Some(body);
        self
    }

    pub fn response(mut self, selector: impl Into<String>, response: ResponseDeclaration) -> Self {
        self.responses.insert(selector.into(), response);
        self
    }

    /// `METHOD /path`, used in logs and error messages
    pub fn route_id(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Non-empty path segments, templates included
    pub fn path_segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Names of the `{param}` placeholders in the path template
    pub fn path_placeholders(&self) -> Vec<&str> {
        self.path_segments()
            .into_iter()
            .flat_map(|segment| {
                segment.split('{').skip(1).filter_map(|rest| {
                    rest.split_once('}').map(|(name, _)| name)
                })
            })
            .collect()
    }

    /// Path template with every placeholder blanked to `{}`.
    ///
    /// `/users/{id}` and `/users/{uid}` share the shape `/users/{}`.
    pub fn path_shape(&self) -> String {
        let mut shape = String::with_capacity(self.path.len());
        let mut in_placeholder = false;
        for c in self.path.chars() {
            match c {
                '{' if !in_placeholder => {
                    shape.push_str("{}");
                    in_placeholder = true;
                }
                '}' if in_placeholder => in_placeholder = false,
                _ if in_placeholder => {}
                _ => shape.push(c),
            }
        }
        shape
    }
}

/// A file of route declarations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiDeclaration {
    #[serde(default)]
    pub routes: Vec<RouteDescriptor>,
}
