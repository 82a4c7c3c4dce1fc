//! # Resource Trait
//!
//! The [`Resource`] trait is the contract every mirrored REST resource implements
//! so that one generic [`ResourceStore`](crate::framework::ResourceStore) can serve
//! products, tags, categories, or a schema-less collection described at runtime.
//!
//! Associated types keep the payloads apart: a `Product` store only accepts
//! `ProductCreate` / `ProductUpdate`, and the compiler rejects anything else.
//!
//! # Merge Rules
//! [`Resource::merge`] decides how a freshly received representation is folded into
//! the cached one. The provided implementation replaces the cached object, which is
//! right for typed resources because the server always answers with the full
//! representation. Resources whose responses may be partial override it (see
//! [`DynamicResource`](crate::framework::DynamicResource)).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

pub trait Resource: Clone + Debug + Send + Sync + DeserializeOwned + 'static {
    /// The server-assigned identifier (e.g. `u64` for WooCommerce objects).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + 'static;

    /// Body of a create request.
    type Create: Serialize + Send + Sync + Debug + 'static;

    /// Body of a partial update request.
    type Update: Serialize + Send + Sync + Debug + 'static;

    fn id(&self) -> Self::Id;

    /// Folds `incoming` into `self`. Incoming fields always take precedence.
    fn merge(&mut self, incoming: Self) {
        *self = incoming;
    }
}

/// Names and REST location of one resource collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub resource_name: String,
    pub plural_resource_name: String,
    /// Collection path, e.g. `/wc/v3/products`.
    pub namespace: String,
}

impl ResourceDescriptor {
    pub fn new(
        resource_name: impl Into<String>,
        plural_resource_name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        let namespace: String = namespace.into();
        Self {
            resource_name: resource_name.into(),
            plural_resource_name: plural_resource_name.into(),
            namespace: namespace.trim_end_matches('/').to_string(),
        }
    }

    pub fn collection_path(&self) -> &str {
        &self.namespace
    }

    pub fn item_path(&self, id: &impl Display) -> String {
        format!("{}/{}", self.namespace, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let d = ResourceDescriptor::new("productTag", "productTags", "/wc/v3/products/tags/");
        assert_eq!(d.collection_path(), "/wc/v3/products/tags");
        assert_eq!(d.item_path(&34), "/wc/v3/products/tags/34");
    }
}
