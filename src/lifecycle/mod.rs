//! Startup and shutdown of the catalog stores.

pub mod tracing;

pub use self::tracing::setup_tracing;

use crate::clients::{ProductCategoryClient, ProductClient, ProductTagClient};
use crate::config::StoreConfig;
use crate::framework::{Resource, ResourceDescriptor, ResourceStore, StoreClient};
use crate::transport::Transport;
use std::sync::Arc;
use tokio::task::JoinHandle;
use ::tracing::{error, info};

pub const PRODUCTS_NAMESPACE: &str = "/wc/v3/products";
pub const PRODUCT_TAGS_NAMESPACE: &str = "/wc/v3/products/tags";
pub const PRODUCT_CATEGORIES_NAMESPACE: &str = "/wc/v3/products/categories";

/// Runs one store per catalog collection over a shared [`Transport`].
///
/// `CatalogSystem` is the dependency injection container of the crate: it owns the
/// task handles and hands out the named clients. Stores hold no reference to each
/// other, so they can be started in any order.
///
/// # Example
///
/// ```ignore
/// let transport = Arc::new(HttpTransport::from_config(&config)?);
/// let system = CatalogSystem::new(transport, &config);
///
/// let products = system.products.resolve_products(&Query::new()).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    pub products: ProductClient,
    pub product_tags: ProductTagClient,
    pub product_categories: ProductCategoryClient,

    /// Task handles for all running stores (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl CatalogSystem {
    /// Spawns every store. Must be called inside a Tokio runtime.
    pub fn new(transport: Arc<dyn Transport>, config: &StoreConfig) -> Self {
        let mut handles = Vec::new();

        let products = spawn_store(
            ResourceDescriptor::new("product", "products", PRODUCTS_NAMESPACE),
            &transport,
            config.buffer_size,
            &mut handles,
        );
        let product_tags = spawn_store(
            ResourceDescriptor::new("productTag", "productTags", PRODUCT_TAGS_NAMESPACE),
            &transport,
            config.buffer_size,
            &mut handles,
        );
        let product_categories = spawn_store(
            ResourceDescriptor::new(
                "productCategory",
                "productCategories",
                PRODUCT_CATEGORIES_NAMESPACE,
            ),
            &transport,
            config.buffer_size,
            &mut handles,
        );

        Self {
            products: ProductClient::new(products),
            product_tags: ProductTagClient::new(product_tags),
            product_categories: ProductCategoryClient::new(product_categories),
            handles,
        }
    }

    /// Gracefully shuts down every store.
    ///
    /// Dropping the clients closes the channels. A store exits once its channel is
    /// closed and its in-flight requests have reported back, so this waits for
    /// outstanding fetches rather than cutting them off. Clients cloned out of the
    /// system keep their store alive until they are dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog...");

        drop(self.products);
        drop(self.product_tags);
        drop(self.product_categories);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}

fn spawn_store<T: Resource>(
    descriptor: ResourceDescriptor,
    transport: &Arc<dyn Transport>,
    buffer_size: usize,
    handles: &mut Vec<JoinHandle<()>>,
) -> StoreClient<T> {
    let (store, client) = ResourceStore::<T>::new(descriptor, transport.clone(), buffer_size);
    handles.push(tokio::spawn(store.run()));
    client
}
