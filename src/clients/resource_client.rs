/// Generates a named client around a [`StoreClient`](crate::framework::StoreClient).
///
/// `resource_client!(ProductClient, Product, product, products)` produces a
/// `ProductClient` with `get_product`, `resolve_product`, `get_products`,
/// `resolve_products`, `get_products_total_count`, `get_product_error`,
/// `get_products_error`, `get_create_product_error`, `get_update_product_error`,
/// `get_delete_product_error`, `create_product`, `update_product` and
/// `delete_product`, plus an implementation of
/// [`ResourceClientExt`](crate::clients::ResourceClientExt).
///
/// The calling crate needs `tracing` as a dependency.
#[macro_export]
macro_rules! resource_client {
    ($client:ident, $resource:ty, $name:ident, $plural:ident) => {
        $crate::__private::paste! {
            #[doc = "Client for the `" $name "` store."]
            #[derive(Clone)]
            pub struct $client {
                inner: $crate::framework::StoreClient<$resource>,
            }

            impl $client {
                pub fn new(inner: $crate::framework::StoreClient<$resource>) -> Self {
                    Self { inner }
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $name>](
                    &self,
                    id: <$resource as $crate::framework::Resource>::Id,
                ) -> Result<Option<$resource>, $crate::framework::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.get_item(id).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<resolve_ $name>](
                    &self,
                    id: <$resource as $crate::framework::Resource>::Id,
                ) -> Result<Option<$resource>, $crate::framework::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.resolve_item(id).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $plural>](
                    &self,
                    query: &$crate::framework::Query,
                ) -> Result<Vec<$resource>, $crate::framework::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.get_list(query).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<resolve_ $plural>](
                    &self,
                    query: &$crate::framework::Query,
                ) -> Result<Vec<$resource>, $crate::framework::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.resolve_list(query).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $plural _total_count>](
                    &self,
                    query: &$crate::framework::Query,
                ) -> Result<Option<usize>, $crate::framework::StoreError> {
                    self.inner.get_total_count(query).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<resolve_ $plural _total_count>](
                    &self,
                    query: &$crate::framework::Query,
                ) -> Result<Option<usize>, $crate::framework::StoreError> {
                    self.inner.resolve_total_count(query).await
                }

                pub async fn [<get_ $name _error>](
                    &self,
                    id: <$resource as $crate::framework::Resource>::Id,
                ) -> Result<Option<$crate::framework::RequestError>, $crate::framework::StoreError> {
                    self.inner.get_item_error(id).await
                }

                pub async fn [<get_ $plural _error>](
                    &self,
                    query: &$crate::framework::Query,
                ) -> Result<Option<$crate::framework::RequestError>, $crate::framework::StoreError> {
                    self.inner.get_list_error(query).await
                }

                pub async fn [<get_create_ $name _error>](
                    &self,
                ) -> Result<Option<$crate::framework::RequestError>, $crate::framework::StoreError> {
                    self.inner.get_error($crate::framework::ErrorKey::Create).await
                }

                pub async fn [<get_update_ $name _error>](
                    &self,
                    id: <$resource as $crate::framework::Resource>::Id,
                ) -> Result<Option<$crate::framework::RequestError>, $crate::framework::StoreError> {
                    self.inner.get_error($crate::framework::ErrorKey::Update(id)).await
                }

                pub async fn [<get_delete_ $name _error>](
                    &self,
                    id: <$resource as $crate::framework::Resource>::Id,
                ) -> Result<Option<$crate::framework::RequestError>, $crate::framework::StoreError> {
                    self.inner.get_error($crate::framework::ErrorKey::Delete(id)).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<create_ $name>](
                    &self,
                    params: <$resource as $crate::framework::Resource>::Create,
                ) -> Result<$resource, $crate::framework::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.create(params).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<update_ $name>](
                    &self,
                    id: <$resource as $crate::framework::Resource>::Id,
                    update: <$resource as $crate::framework::Resource>::Update,
                ) -> Result<$resource, $crate::framework::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.update(id, update).await
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<delete_ $name>](
                    &self,
                    id: <$resource as $crate::framework::Resource>::Id,
                    force: bool,
                ) -> Result<(), $crate::framework::StoreError> {
                    tracing::debug!("Sending request");
                    self.inner.delete(id, force).await
                }
            }

            impl $crate::clients::ResourceClientExt<$resource> for $client {
                fn inner(&self) -> &$crate::framework::StoreClient<$resource> {
                    &self.inner
                }
            }
        }
    };
}
