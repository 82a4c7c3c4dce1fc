use crate::framework::{CollectionState, ResolutionState, Resource, Selector, StoreClient, StoreError};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the resolution controls.
///
/// Named clients generated by [`resource_client!`](crate::resource_client) implement it
/// by handing out their inner [`StoreClient`].
#[async_trait]
pub trait ResourceClientExt<T: Resource>: Send + Sync {
    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Forget the resolution of one selector so the next read fetches again.
    #[tracing::instrument(skip(self))]
    async fn invalidate(&self, selector: Selector<T::Id>) -> Result<(), StoreError> {
        tracing::debug!("Sending request");
        self.inner().invalidate(selector).await
    }

    #[tracing::instrument(skip(self))]
    async fn invalidate_all(&self) -> Result<(), StoreError> {
        tracing::debug!("Sending request");
        self.inner().invalidate_all().await
    }

    async fn resolution_state(&self, selector: Selector<T::Id>) -> Result<ResolutionState, StoreError> {
        self.inner().resolution_state(selector).await
    }

    async fn snapshot(&self) -> Result<CollectionState<T>, StoreError> {
        self.inner().snapshot().await
    }
}
