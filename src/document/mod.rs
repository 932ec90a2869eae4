//! # Document Module
//!
//! The OpenAPI 3.1 object model produced by the generators, plus the
//! serialization and audit helpers used once a [`Document`] is built.
//!
//! The model only covers what the generators emit. Wire names follow the
//! OpenAPI specification (camelCase, `$ref`, `in`), empty collections are
//! omitted and every map keeps insertion order so two runs over the same
//! declarations serialize byte-identically.
//!
//! [`Document::to_oas3`] re-reads the serialized document as an
//! [`oas3::OpenApiV3Spec`], which is how `brrtdoc check` verifies that the
//! output is a conforming specification.

mod types;

pub use types::*;

use crate::error::{Error, Result};
use oas3::OpenApiV3Spec;
use serde_json::Value;

const COMPONENTS_PREFIX: &str = "#/components/";

impl Document {
    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Serialize as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Re-read this document through the `oas3` object model.
    pub fn to_oas3(&self) -> Result<OpenApiV3Spec> {
        let value = serde_json::to_value(self).map_err(|e| Error::Serialize(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| Error::Serialize(e.to_string()))
    }

    /// Number of operations across all paths.
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations.len()).sum()
    }

    /// Every `$ref` in the document, in document order.
    pub fn references(&self) -> Result<Vec<String>> {
        let value = serde_json::to_value(self).map_err(|e| Error::Serialize(e.to_string()))?;
        let mut refs = Vec::new();
        collect_refs(&value, &mut refs);
        Ok(refs)
    }

    /// References that do not point at exactly one components entry.
    ///
    /// An empty result means the document is referentially intact.
    pub fn unresolved_references(&self) -> Result<Vec<String>> {
        let value = serde_json::to_value(self).map_err(|e| Error::Serialize(e.to_string()))?;
        let mut refs = Vec::new();
        collect_refs(&value, &mut refs);
        Ok(refs
            .into_iter()
            .filter(|r| !resolves(&value, r))
            .collect())
    }
}

fn collect_refs(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(obj) => {
            if let Some(Value::String(r)) = obj.get("$ref") {
                out.push(r.clone());
            }
            for v in obj.values() {
                collect_refs(v, out);
            }
        }
        Value::Array(arr) => {
            for v in arr {
                collect_refs(v, out);
            }
        }
        _ => {}
    }
}

fn resolves(document: &Value, reference: &str) -> bool {
    let Some(tail) = reference.strip_prefix(COMPONENTS_PREFIX) else {
        return false;
    };
    let Some((section, id)) = tail.split_once('/') else {
        return false;
    };
    document
        .get("components")
        .and_then(|c| c.get(section))
        .and_then(|s| s.get(id))
        .is_some()
}
