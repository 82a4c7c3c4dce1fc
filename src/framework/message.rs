//! # Store Messages
//!
//! Everything a [`ResourceStore`](crate::framework::ResourceStore) does is triggered
//! by one message on its channel. Two families share that channel:
//!
//! - [`StoreRequest`]: the closed set of operations a
//!   [`StoreClient`](crate::framework::StoreClient) can ask for. Reads carry a
//!   `resolve` flag: `false` answers from the current state right away, `true`
//!   answers once the selector has settled.
//! - `Completion` (crate-private): the result of a network round-trip, sent back by
//!   the task that performed it so the state transition happens inside the store loop.

use crate::framework::{
    CollectionState, ErrorKey, Generation, Query, QueryKey, RequestError, ResolutionState, Resource,
    Selector, StoreError,
};
use tokio::sync::oneshot;

/// Reply channel for a mutation.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Reply channel for a read. Reads never fail inside the store.
pub type Reply<T> = oneshot::Sender<T>;

#[derive(Debug)]
pub enum StoreRequest<T: Resource> {
    GetItem {
        id: T::Id,
        resolve: bool,
        respond_to: Reply<Option<T>>,
    },
    GetList {
        query: Query,
        resolve: bool,
        respond_to: Reply<Vec<T>>,
    },
    GetTotalCount {
        query: Query,
        resolve: bool,
        respond_to: Reply<Option<usize>>,
    },
    GetError {
        key: ErrorKey<T::Id>,
        respond_to: Reply<Option<RequestError>>,
    },
    GetResolution {
        selector: Selector<T::Id>,
        respond_to: Reply<ResolutionState>,
    },
    Snapshot {
        respond_to: Reply<CollectionState<T>>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        force: bool,
        respond_to: Response<()>,
    },
    /// `None` invalidates every selector of the store.
    Invalidate {
        selector: Option<Selector<T::Id>>,
        respond_to: Reply<()>,
    },
}

#[derive(Debug)]
pub(crate) enum Completion<T: Resource> {
    ItemFetched {
        id: T::Id,
        generation: Generation,
        result: Result<T, RequestError>,
    },
    ListFetched {
        key: QueryKey,
        generation: Generation,
        result: Result<(Vec<T>, Option<usize>), RequestError>,
    },
    Created {
        result: Result<T, RequestError>,
        respond_to: Response<T>,
    },
    Updated {
        id: T::Id,
        result: Result<T, RequestError>,
        respond_to: Response<T>,
    },
    Deleted {
        id: T::Id,
        result: Result<(), RequestError>,
        respond_to: Response<()>,
    },
}

#[derive(Debug)]
pub(crate) enum Message<T: Resource> {
    Request(StoreRequest<T>),
    Completion(Completion<T>),
}
