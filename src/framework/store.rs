//! # Resource Store
//!
//! [`ResourceStore`] is the server half of a store: it owns the
//! [`CollectionState`] and the [`ResolutionCache`] for one resource collection and
//! applies every change to them inside a single task.
//!
//! **Concurrency Model**:
//! The loop never awaits the network. A read that needs data, or a mutation, spawns a
//! task that performs the request and sends a `Completion` back into the same channel.
//! State transitions are therefore applied one message at a time (no `Mutex`), while
//! any number of requests are in flight. Mutation responses are not ordered: whichever
//! arrives last is the one left in `data`. Fetches carry the generation they were
//! started under, and a fetch that lands after a newer one for the same selector is
//! dropped.
//!
//! **Shutdown**:
//! The store only keeps a weak sender. Spawned requests hold a strong one until they
//! report back, so the loop ends once every [`StoreClient`] is dropped and every
//! in-flight request has landed.
//!
//! # Usage Pattern
//!
//! ```rust
//! use resource_store::framework::{Query, ResourceDescriptor, ResourceStore};
//! use resource_store::model::ProductTag;
//! use resource_store::transport::MockTransport;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = MockTransport::new();
//!     transport
//!         .expect_get("/wc/v3/products/tags")
//!         .return_list(json!([{ "id": 1, "name": "sale", "slug": "sale" }]), 1);
//!
//!     let descriptor = ResourceDescriptor::new("productTag", "productTags", "/wc/v3/products/tags");
//!     let (store, client) = ResourceStore::<ProductTag>::new(descriptor, Arc::new(transport), 10);
//!     tokio::spawn(store.run());
//!
//!     let tags = client.resolve_list(&Query::new()).await.unwrap();
//!     assert_eq!(tags[0].name, "sale");
//! }
//! ```

use crate::framework::error::INVALID_JSON;
use crate::framework::message::{Completion, Message, Response};
use crate::framework::{
    CollectionState, ErrorKey, Generation, Query, RequestError, ResolutionCache, Resource,
    ResourceDescriptor, Selector, StoreClient, StoreError, StoreRequest, Waiter,
};
use crate::transport::{Method, Transport, TransportRequest, TransportResponse};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

fn decode<D: serde::de::DeserializeOwned>(body: Value) -> Result<D, RequestError> {
    serde_json::from_value(body)
        .map_err(|e| RequestError::new(INVALID_JSON, format!("Unexpected response shape: {}", e)))
}

pub struct ResourceStore<T: Resource> {
    descriptor: Arc<ResourceDescriptor>,
    transport: Arc<dyn Transport>,
    receiver: mpsc::Receiver<Message<T>>,
    sender: mpsc::WeakSender<Message<T>>,
    state: CollectionState<T>,
    resolution: ResolutionCache<T>,
}

impl<T: Resource> ResourceStore<T> {
    /// Creates a store and the client that talks to it.
    ///
    /// `buffer_size` is the capacity of the request channel (at least 1); callers wait
    /// when it is full.
    /// The store does nothing until [`run`](Self::run) is spawned.
    pub fn new(
        descriptor: ResourceDescriptor,
        transport: Arc<dyn Transport>,
        buffer_size: usize,
    ) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        let descriptor = Arc::new(descriptor);
        let store = Self {
            descriptor: descriptor.clone(),
            transport,
            receiver,
            sender: sender.downgrade(),
            state: CollectionState::new(),
            resolution: ResolutionCache::new(),
        };
        let client = StoreClient::new(sender, descriptor);
        (store, client)
    }

    /// Runs the store loop until every client is gone and all requests have landed.
    pub async fn run(mut self) {
        let resource = self.descriptor.resource_name.clone();
        info!(%resource, namespace = %self.descriptor.namespace, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                Message::Request(request) => self.handle_request(request),
                Message::Completion(completion) => self.handle_completion(completion),
            }
        }

        info!(%resource, size = self.state.data().len(), "Shutdown");
    }

    fn handle_request(&mut self, request: StoreRequest<T>) {
        let descriptor = self.descriptor.clone();
        let resource = descriptor.resource_name.as_str();
        match request {
            StoreRequest::GetItem { id, resolve, respond_to } => {
                debug!(resource, %id, resolve, "Get");
                self.resolve_item(&id);
                let read_id = id.clone();
                self.answer(
                    Selector::Item(id),
                    resolve,
                    Box::new(move |state| {
                        let _ = respond_to.send(state.item(&read_id).cloned());
                    }),
                );
            }
            StoreRequest::GetList { query, resolve, respond_to } => {
                let key = query.key();
                debug!(resource, %key, resolve, "List");
                self.resolve_list(&query);
                let read_key = key.clone();
                self.answer(
                    Selector::List(key),
                    resolve,
                    Box::new(move |state| {
                        let _ = respond_to.send(state.list(&read_key).unwrap_or_default());
                    }),
                );
            }
            StoreRequest::GetTotalCount { query, resolve, respond_to } => {
                let key = query.key();
                debug!(resource, %key, resolve, "Total count");
                self.resolve_list(&query);
                let read_key = key.clone();
                self.answer(
                    Selector::List(key),
                    resolve,
                    Box::new(move |state| {
                        let _ = respond_to.send(state.total_count(&read_key));
                    }),
                );
            }
            StoreRequest::GetError { key, respond_to } => {
                let _ = respond_to.send(self.state.error(&key).cloned());
            }
            StoreRequest::GetResolution { selector, respond_to } => {
                let _ = respond_to.send(self.resolution.state(&selector));
            }
            StoreRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(self.state.clone());
            }
            StoreRequest::Create { params, respond_to } => {
                debug!(resource, ?params, "Create");
                let Some((body, respond_to)) = self.encode(&params, respond_to) else {
                    return;
                };
                let request =
                    TransportRequest::new(Method::Post, self.descriptor.collection_path())
                        .with_body(body);
                self.spawn_request(request, move |result| Completion::Created {
                    result: result.and_then(|r| decode(r.body)),
                    respond_to,
                });
            }
            StoreRequest::Update { id, update, respond_to } => {
                debug!(resource, %id, ?update, "Update");
                let Some((body, respond_to)) = self.encode(&update, respond_to) else {
                    return;
                };
                let request = TransportRequest::new(Method::Put, self.descriptor.item_path(&id))
                    .with_body(body);
                self.spawn_request(request, move |result| Completion::Updated {
                    id,
                    result: result.and_then(|r| decode(r.body)),
                    respond_to,
                });
            }
            StoreRequest::Delete { id, force, respond_to } => {
                debug!(resource, %id, force, "Delete");
                let request = TransportRequest::new(Method::Delete, self.descriptor.item_path(&id))
                    .with_query(vec![("force".to_string(), force.to_string())]);
                self.spawn_request(request, move |result| Completion::Deleted {
                    id,
                    result: result.map(|_| ()),
                    respond_to,
                });
            }
            StoreRequest::Invalidate { selector, respond_to } => {
                match &selector {
                    Some(selector) => self.resolution.invalidate(selector),
                    None => self.resolution.invalidate_all(),
                }
                debug!(resource, ?selector, "Invalidated");
                let _ = respond_to.send(());
            }
        }
    }

    fn handle_completion(&mut self, completion: Completion<T>) {
        let descriptor = self.descriptor.clone();
        let resource = descriptor.resource_name.as_str();
        match completion {
            Completion::ItemFetched { id, generation, result } => {
                let selector = Selector::Item(id.clone());
                let succeeded = result.is_ok();
                if self.resolution.is_outdated(&selector, generation) {
                    debug!(resource, %id, "Outdated item response ignored");
                } else {
                    match result {
                        Ok(item) => {
                            self.state.receive_item(item);
                            self.state.clear_error(&ErrorKey::Item(id.clone()));
                            debug!(resource, %id, "Item resolved");
                        }
                        Err(error) => {
                            warn!(resource, %id, error = %error, not_found = error.is_not_found(), "Item fetch failed");
                            self.state.record_error(ErrorKey::Item(id), error);
                        }
                    }
                }
                self.settle(&selector, generation, succeeded);
            }
            Completion::ListFetched { key, generation, result } => {
                let selector = Selector::List(key.clone());
                let succeeded = result.is_ok();
                if self.resolution.is_outdated(&selector, generation) {
                    debug!(resource, %key, "Outdated list response ignored");
                } else {
                    match result {
                        Ok((items, total)) => {
                            let page = items.len();
                            self.state.receive_list(key.clone(), items, total);
                            self.state.clear_error(&ErrorKey::List(key.clone()));
                            debug!(resource, %key, page, ?total, "List resolved");
                        }
                        Err(error) => {
                            warn!(resource, %key, error = %error, "List fetch failed");
                            self.state.record_error(ErrorKey::List(key), error);
                        }
                    }
                }
                self.settle(&selector, generation, succeeded);
            }
            Completion::Created { result, respond_to } => match result {
                Ok(item) => {
                    let id = self.state.receive_item(item);
                    self.state.clear_error(&ErrorKey::Create);
                    self.resolution.mark_resolved(Selector::Item(id.clone()));
                    self.resolution.invalidate_lists();
                    info!(resource, %id, size = self.state.data().len(), "Created");
                    self.reply_item(&id, respond_to);
                }
                Err(error) => {
                    warn!(resource, error = %error, "Create failed");
                    self.state.record_error(ErrorKey::Create, error.clone());
                    let _ = respond_to.send(Err(StoreError::Request(error)));
                }
            },
            Completion::Updated { id, result, respond_to } => match result {
                Ok(item) => {
                    let stored = self.state.receive_item(item);
                    self.state.clear_error(&ErrorKey::Update(id.clone()));
                    info!(resource, %id, "Updated");
                    self.reply_item(&stored, respond_to);
                }
                Err(error) => {
                    warn!(resource, %id, error = %error, "Update failed");
                    self.state.record_error(ErrorKey::Update(id), error.clone());
                    let _ = respond_to.send(Err(StoreError::Request(error)));
                }
            },
            Completion::Deleted { id, result, respond_to } => match result {
                Ok(()) => {
                    self.state.remove_item(&id);
                    self.state.clear_error(&ErrorKey::Delete(id.clone()));
                    self.state.clear_error(&ErrorKey::Item(id.clone()));
                    self.resolution.mark_resolved(Selector::Item(id.clone()));
                    info!(resource, %id, size = self.state.data().len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                Err(error) => {
                    warn!(resource, %id, error = %error, "Delete failed");
                    self.state.record_error(ErrorKey::Delete(id), error.clone());
                    let _ = respond_to.send(Err(StoreError::Request(error)));
                }
            },
        }
    }

    /// Answers a read now, or parks it until its selector settles.
    fn answer(&mut self, selector: Selector<T::Id>, resolve: bool, read: Waiter<T>) {
        if !resolve {
            read(&self.state);
            return;
        }
        if let Err(read) = self.resolution.wait(&selector, read) {
            read(&self.state);
        }
    }

    fn settle(&mut self, selector: &Selector<T::Id>, generation: Generation, succeeded: bool) {
        for waiter in self.resolution.finish(selector, generation, succeeded) {
            waiter(&self.state);
        }
    }

    fn resolve_item(&mut self, id: &T::Id) {
        let selector = Selector::Item(id.clone());
        let Some(generation) = self.resolution.begin(&selector) else {
            return;
        };
        let fetch_id = id.clone();
        let request = TransportRequest::new(Method::Get, self.descriptor.item_path(id));
        if !self.spawn_request(request, move |result| Completion::ItemFetched {
            id: fetch_id,
            generation,
            result: result.and_then(|r| decode(r.body)),
        }) {
            self.settle(&selector, generation, false);
        }
    }

    fn resolve_list(&mut self, query: &Query) {
        let key = query.key();
        let selector = Selector::List(key.clone());
        let Some(generation) = self.resolution.begin(&selector) else {
            return;
        };
        let request = TransportRequest::new(Method::Get, self.descriptor.collection_path())
            .with_query(query.pairs());
        if !self.spawn_request(request, move |result| Completion::ListFetched {
            key,
            generation,
            result: result.and_then(|TransportResponse { body, total }| {
                decode::<Vec<T>>(body).map(|items| (items, total))
            }),
        }) {
            self.settle(&selector, generation, false);
        }
    }

    fn reply_item(&self, id: &T::Id, respond_to: Response<T>) {
        let reply = self
            .state
            .item(id)
            .cloned()
            .ok_or_else(|| {
                StoreError::Request(RequestError::new(INVALID_JSON, "Response carried no resource"))
            });
        let _ = respond_to.send(reply);
    }

    fn encode<P: serde::Serialize, R>(
        &self,
        params: &P,
        respond_to: Response<R>,
    ) -> Option<(Value, Response<R>)> {
        match serde_json::to_value(params) {
            Ok(body) => Some((body, respond_to)),
            Err(e) => {
                warn!(resource = %self.descriptor.resource_name, error = %e, "Failed to encode request body");
                let error = RequestError::new(INVALID_JSON, format!("Failed to encode request body: {}", e));
                let _ = respond_to.send(Err(StoreError::Request(error)));
                None
            }
        }
    }

    /// Runs `request` on a separate task and feeds the result back through the channel.
    /// Returns `false` when no client is left to receive anything.
    fn spawn_request<F>(&self, request: TransportRequest, complete: F) -> bool
    where
        F: FnOnce(Result<TransportResponse, RequestError>) -> Completion<T> + Send + 'static,
    {
        let Some(sender) = self.sender.upgrade() else {
            warn!(resource = %self.descriptor.resource_name, "No clients left, request dropped");
            return false;
        };
        let transport = self.transport.clone();
        tokio::spawn(async move {
            let result = transport.send(request).await;
            let _ = sender.send(Message::Completion(complete(result))).await;
        });
        true
    }
}
