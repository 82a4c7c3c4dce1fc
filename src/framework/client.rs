//! # Store Client
//!
//! [`StoreClient<T>`] is the handle consumers use to read from and mutate a
//! [`ResourceStore<T>`](crate::framework::ResourceStore). It only holds a channel
//! sender, so cloning is cheap and clones can be passed to any task.
//!
//! * **Reads** (`get_*`) answer from the current state and start a fetch if the data
//!   was never resolved. Nothing is awaited on the network: a first call returns
//!   `None` or an empty list.
//! * **Resolving reads** (`resolve_*`) answer once the fetch has settled, whether it
//!   succeeded or not. Failures show up through the `*_error` reads.
//! * **Mutations** (`create`, `update`, `delete`) complete with the server's answer
//!   and fail with [`StoreError::Request`] when the server refused.

use crate::framework::message::Message;
use crate::framework::{
    CollectionState, ErrorKey, Query, RequestError, ResolutionState, Resource, ResourceDescriptor,
    Selector, StoreError, StoreRequest,
};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

#[derive(Clone)]
pub struct StoreClient<T: Resource> {
    sender: mpsc::Sender<Message<T>>,
    descriptor: Arc<ResourceDescriptor>,
}

impl<T: Resource> StoreClient<T> {
    pub(crate) fn new(sender: mpsc::Sender<Message<T>>, descriptor: Arc<ResourceDescriptor>) -> Self {
        Self { sender, descriptor }
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<R>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(Message::Request(build(respond_to)))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)
    }

    // --- Reads ---

    pub async fn get_item(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::GetItem { id, resolve: false, respond_to })
            .await
    }

    pub async fn resolve_item(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::GetItem { id, resolve: true, respond_to })
            .await
    }

    pub async fn get_list(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        let query = query.clone();
        self.request(|respond_to| StoreRequest::GetList { query, resolve: false, respond_to })
            .await
    }

    pub async fn resolve_list(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        let query = query.clone();
        self.request(|respond_to| StoreRequest::GetList { query, resolve: true, respond_to })
            .await
    }

    pub async fn get_total_count(&self, query: &Query) -> Result<Option<usize>, StoreError> {
        let query = query.clone();
        self.request(|respond_to| StoreRequest::GetTotalCount { query, resolve: false, respond_to })
            .await
    }

    pub async fn resolve_total_count(&self, query: &Query) -> Result<Option<usize>, StoreError> {
        let query = query.clone();
        self.request(|respond_to| StoreRequest::GetTotalCount { query, resolve: true, respond_to })
            .await
    }

    pub async fn get_error(&self, key: ErrorKey<T::Id>) -> Result<Option<RequestError>, StoreError> {
        self.request(|respond_to| StoreRequest::GetError { key, respond_to })
            .await
    }

    pub async fn get_item_error(&self, id: T::Id) -> Result<Option<RequestError>, StoreError> {
        self.get_error(ErrorKey::Item(id)).await
    }

    pub async fn get_list_error(&self, query: &Query) -> Result<Option<RequestError>, StoreError> {
        self.get_error(ErrorKey::List(query.key())).await
    }

    pub async fn resolution_state(
        &self,
        selector: Selector<T::Id>,
    ) -> Result<ResolutionState, StoreError> {
        self.request(|respond_to| StoreRequest::GetResolution { selector, respond_to })
            .await
    }

    /// A copy of the whole store state.
    pub async fn snapshot(&self) -> Result<CollectionState<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Snapshot { respond_to })
            .await
    }

    // --- Mutations ---

    pub async fn create(&self, params: T::Create) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Create { params, respond_to })
            .await?
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Update { id, update, respond_to })
            .await?
    }

    /// `force` skips the trash where the API supports one.
    pub async fn delete(&self, id: T::Id, force: bool) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, force, respond_to })
            .await?
    }

    // --- Resolution control ---

    pub async fn invalidate(&self, selector: Selector<T::Id>) -> Result<(), StoreError> {
        let selector = Some(selector);
        self.request(|respond_to| StoreRequest::Invalidate { selector, respond_to })
            .await
    }

    pub async fn invalidate_all(&self) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Invalidate { selector: None, respond_to })
            .await
    }
}
