use crate::framework::Resource;
use serde::{Deserialize, Serialize};

/// A product category (`/wc/v3/products/categories`). `parent` is `0` for top-level categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub parent: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub count: u64,
}

impl ProductCategory {
    pub fn is_top_level(&self) -> bool {
        self.parent == 0
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductCategoryCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductCategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource for ProductCategory {
    type Id = u64;
    type Create = ProductCategoryCreate;
    type Update = ProductCategoryUpdate;

    fn id(&self) -> u64 {
        self.id
    }
}
