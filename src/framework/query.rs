//! # Query Descriptors
//!
//! A [`Query`] is the set of parameters (filters, pagination, sort) identifying one
//! list request. The store never keys anything by the `Query` itself: it keys by the
//! [`QueryKey`], a canonical string derived from it.
//!
//! ## Canonical form
//!
//! Parameters are flattened into `name=value` pairs:
//!
//! - object keys are sorted at every depth, so insertion order never matters
//! - nested objects become `parent[child]`
//! - arrays become `parent[0]`, `parent[1]`, ... and keep their order
//! - `null` values are dropped
//!
//! The pairs are form-urlencoded and joined with `&`. The result is both the cache
//! key and the query string sent to the server, so two queries share a cache entry
//! exactly when they would produce the same request.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Parameters of a list request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(BTreeMap<String, Value>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a query from a JSON object. Anything else yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map.into_iter().collect())),
            Value::Null => Some(Self::default()),
            _ => None,
        }
    }

    /// Builds a query from any serializable struct whose fields are the parameters.
    pub fn from_serialize<S: Serialize>(params: &S) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(params)?;
        let map: Map<String, Value> = serde_json::from_value(value)?;
        Ok(Self(map.into_iter().collect()))
    }

    /// Flattened `name=value` pairs in canonical order.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for (name, value) in &self.0 {
            flatten(name, value, &mut out);
        }
        out
    }

    pub fn key(&self) -> QueryKey {
        QueryKey::from(self)
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((prefix.to_string(), b.to_string())),
        Value::Number(n) => out.push((prefix.to_string(), n.to_string())),
        Value::String(s) => out.push((prefix.to_string(), s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(&format!("{prefix}[{index}]"), item, out);
            }
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (name, nested) in entries {
                flatten(&format!("{prefix}[{name}]"), nested, out);
            }
        }
    }
}

/// Stable cache key for a [`Query`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Query> for QueryKey {
    fn from(query: &Query) -> Self {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query.pairs())
            .finish();
        Self(encoded)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
