//! Schema-less resource for collections described only at runtime.

use crate::framework::Resource;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON object identified by its `id` field.
///
/// Responses for these collections are not guaranteed to be full
/// representations, so [`merge`](Resource::merge) is a shallow object merge:
/// top-level fields present in the incoming object win, absent ones are kept.
///
/// Deserialization rejects objects without a non-empty string or numeric `id`,
/// so a response containing one fails to decode instead of collapsing into a
/// single cached entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct DynamicResource(pub Map<String, Value>);

impl DynamicResource {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

fn object_id(map: &Map<String, Value>) -> Option<String> {
    match map.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

impl TryFrom<Map<String, Value>> for DynamicResource {
    type Error = String;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        if object_id(&map).is_none() {
            return Err("object has no usable `id` field".to_string());
        }
        Ok(Self(map))
    }
}

impl From<DynamicResource> for Map<String, Value> {
    fn from(resource: DynamicResource) -> Self {
        resource.0
    }
}

impl Resource for DynamicResource {
    type Id = String;
    type Create = Value;
    type Update = Value;

    /// Empty for values built by hand without an `id`.
    fn id(&self) -> String {
        object_id(&self.0).unwrap_or_default()
    }

    fn merge(&mut self, incoming: Self) {
        for (field, value) in incoming.0 {
            self.0.insert(field, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(value: Value) -> DynamicResource {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_id_from_number_or_string() {
        assert_eq!(resource(json!({ "id": 7 })).id(), "7");
        assert_eq!(resource(json!({ "id": "standard" })).id(), "standard");
    }

    #[test]
    fn test_rejects_objects_without_id() {
        assert!(serde_json::from_value::<DynamicResource>(json!({ "name": "x" })).is_err());
        assert!(serde_json::from_value::<DynamicResource>(json!({ "id": "" })).is_err());
        assert!(serde_json::from_value::<DynamicResource>(json!({ "id": null })).is_err());
        let list = json!([{ "id": 1 }, { "name": "no id" }]);
        assert!(serde_json::from_value::<Vec<DynamicResource>>(list).is_err());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let zone = resource(json!({ "id": 1, "name": "Zone A" }));
        assert_eq!(serde_json::to_value(&zone).unwrap(), json!({ "id": 1, "name": "Zone A" }));
    }

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut cached = resource(json!({ "id": 1, "name": "Zone A", "order": 0 }));
        cached.merge(resource(json!({ "id": 1, "name": "Zone B" })));
        assert_eq!(cached.get("name"), Some(&json!("Zone B")));
        assert_eq!(cached.get("order"), Some(&json!(0)));
    }
}
