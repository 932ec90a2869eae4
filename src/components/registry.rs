use crate::config::NamingPolicy;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The fragment kinds that can live in `components`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Schemas,
    Parameters,
    RequestBodies,
    Examples,
    SecuritySchemes,
}

impl ComponentKind {
    /// Section name under `components`
    pub fn section(&self) -> &'static str {
        match self {
            ComponentKind::Schemas => "schemas",
            ComponentKind::Parameters => "parameters",
            ComponentKind::RequestBodies => "requestBodies",
            ComponentKind::Examples => "examples",
            ComponentKind::SecuritySchemes => "securitySchemes",
        }
    }

    /// `#/components/<section>/<id>`
    pub fn ref_path(&self, id: &str) -> String {
        format!("#/components/{}/{}", self.section(), id)
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.section())
    }
}

/// Turn a logical name into a valid component key (`^[A-Za-z0-9._-]+$`).
pub fn sanitize_identifier(name: &str) -> String {
    let id: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if id.is_empty() {
        "unnamed".to_string()
    } else {
        id
    }
}

/// Entries of one kind, keyed by generated identifier.
///
/// Identifiers start from the sanitized logical name. On collision a numeric
/// suffix is appended (`name_1`, `name_2`, ...) until the identifier is free,
/// or, under [`NamingPolicy::DedupByContent`], until an entry with an equal
/// payload is found and reused. Insertion order is kept so rendering is
/// deterministic for a fixed sequence of additions.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    kind: ComponentKind,
    policy: NamingPolicy,
    entries: IndexMap<String, T>,
}

impl<T: PartialEq> Registry<T> {
    pub fn new(kind: ComponentKind, policy: NamingPolicy) -> Self {
        Self {
            kind,
            policy,
            entries: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Register a fragment and return its identifier.
    pub fn insert(&mut self, name: &str, value: T) -> String {
        let base = sanitize_identifier(name);
        let mut candidate = base.clone();
        let mut suffix = 0usize;
        loop {
            match self.entries.get(&candidate) {
                None => {
                    self.entries.insert(candidate.clone(), value);
                    return candidate;
                }
                Some(existing)
                    if self.policy == NamingPolicy::DedupByContent && *existing == value =>
                {
                    return candidate;
                }
                Some(_) => {
                    suffix += 1;
                    candidate = format!("{base}_{suffix}");
                }
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn into_entries(self) -> IndexMap<String, T> {
        self.entries
    }
}
