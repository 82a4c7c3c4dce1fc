use crate::framework::Resource;
use serde::{Deserialize, Serialize};

/// A catalog product as returned by `/wc/v3/products`.
///
/// Only the fields the stores need are modelled; unknown fields are ignored on
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub regular_price: String,
    #[serde(default)]
    pub sale_price: String,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub categories: Vec<TermRef>,
    #[serde(default)]
    pub tags: Vec<TermRef>,
}

/// Reference to a taxonomy term embedded in a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermRef {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

impl TermRef {
    pub fn id(id: u64) -> Self {
        Self {
            id,
            name: String::new(),
            slug: String::new(),
        }
    }
}

/// Payload for creating a product.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<TermRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TermRef>,
}

/// Partial update: only `Some` fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i64>,
}

impl Resource for Product {
    type Id = u64;
    type Create = ProductCreate;
    type Update = ProductUpdate;

    fn id(&self) -> u64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = ProductUpdate {
            regular_price: Some("12.00".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "regular_price": "12.00" }));
    }

    #[test]
    fn test_deserializes_api_shape() {
        let product: Product = serde_json::from_value(json!({
            "id": 794,
            "name": "Premium Quality",
            "slug": "premium-quality",
            "status": "publish",
            "regular_price": "21.99",
            "stock_quantity": null,
            "categories": [{ "id": 9, "name": "Clothing", "slug": "clothing" }],
            "meta_data": []
        }))
        .unwrap();
        assert_eq!(product.id(), 794);
        assert_eq!(product.categories[0].slug, "clothing");
        assert!(product.tags.is_empty());
    }
}
