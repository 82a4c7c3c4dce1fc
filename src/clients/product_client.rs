use crate::framework::{Query, StoreError};
use crate::model::Product;
use tracing::instrument;

crate::resource_client!(ProductClient, Product, product, products);

impl ProductClient {
    /// One page of products in a category, newest first.
    #[instrument(skip(self))]
    pub async fn resolve_products_in_category(
        &self,
        category: u64,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Product>, StoreError> {
        let query = Query::new()
            .with("category", category)
            .with("page", page)
            .with("per_page", per_page)
            .with("orderby", "date")
            .with("order", "desc");
        self.resolve_products(&query).await
    }
}
