//! Demo binary: mirrors the first page of products and tags of a store.
//!
//! Reads its connection settings from `RESOURCE_STORE_*` variables (see
//! [`StoreConfig::from_env`]).

use resource_store::clients::ResourceClientExt;
use resource_store::config::StoreConfig;
use resource_store::framework::Query;
use resource_store::lifecycle::{setup_tracing, CatalogSystem};
use resource_store::transport::HttpTransport;
use std::error::Error;
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_tracing();

    let config = StoreConfig::from_env()?;
    info!(base_url = %config.base_url, "Starting catalog mirror");

    let transport = Arc::new(HttpTransport::from_config(&config)?);
    let system = CatalogSystem::new(transport, &config);

    let query = Query::new().with("per_page", 5).with("orderby", "date");
    let span = tracing::info_span!("catalog_listing");
    async {
        let products = system.products.resolve_products(&query).await?;
        let total = system.products.get_products_total_count(&query).await?;
        match system.products.get_products_error(&query).await? {
            Some(error) => warn!(code = %error.code, "Listing products failed: {}", error.message),
            None => info!(page = products.len(), ?total, "Products listed"),
        }
        for product in &products {
            info!(id = product.id, name = %product.name, price = %product.regular_price, "Product");
        }

        let tags = system.product_tags.resolve_product_tags(&Query::new()).await?;
        info!(count = tags.len(), "Tags listed");

        let state = system.products.snapshot().await?;
        info!(cached = state.data().len(), "Product store state");
        Ok::<_, Box<dyn Error>>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;
    Ok(())
}
