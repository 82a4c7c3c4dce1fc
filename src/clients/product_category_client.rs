use crate::framework::{Query, StoreError};
use crate::model::ProductCategory;
use tracing::instrument;

crate::resource_client!(
    ProductCategoryClient,
    ProductCategory,
    product_category,
    product_categories
);

impl ProductCategoryClient {
    /// Categories without a parent.
    #[instrument(skip(self))]
    pub async fn resolve_top_level_categories(&self) -> Result<Vec<ProductCategory>, StoreError> {
        let query = Query::new().with("parent", 0).with("per_page", 100);
        self.resolve_product_categories(&query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{ResourceDescriptor, ResourceStore};
    use crate::transport::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_delete_removes_category_from_lists() {
        let transport = MockTransport::new();
        transport.expect_get("/wc/v3/products/categories").return_list(
            json!([
                { "id": 9, "name": "Clothing", "parent": 0 },
                { "id": 11, "name": "Music", "parent": 0 }
            ]),
            2,
        );
        transport
            .expect_delete("/wc/v3/products/categories/11")
            .with_query(vec![("force".to_string(), "true".to_string())])
            .return_ok(json!({ "id": 11, "name": "Music" }));

        let descriptor = ResourceDescriptor::new(
            "productCategory",
            "productCategories",
            "/wc/v3/products/categories",
        );
        let (store, inner) =
            ResourceStore::<ProductCategory>::new(descriptor, Arc::new(transport.clone()), 10);
        tokio::spawn(store.run());
        let client = ProductCategoryClient::new(inner);

        let top = client.resolve_top_level_categories().await.unwrap();
        assert!(top.iter().all(ProductCategory::is_top_level));
        assert_eq!(top.len(), 2);

        client.delete_product_category(11, true).await.unwrap();

        let query = Query::new().with("parent", 0).with("per_page", 100);
        let remaining = client.get_product_categories(&query).await.unwrap();
        assert_eq!(remaining.iter().map(|c| c.id).collect::<Vec<_>>(), vec![9]);
        assert_eq!(client.get_product_categories_total_count(&query).await.unwrap(), Some(1));
        assert!(client.get_product_category(11).await.unwrap().is_none());
        transport.verify();
    }
}
