//! Generic store framework for REST resource collections.
//!
//! This module provides the building blocks for mirroring any REST collection in a
//! client-side, normalized cache with single-flight resolution.
//!
//! # Main Components
//!
//! - [`Resource`] - Trait that mirrored resource types implement
//! - [`ResourceStore`] - Generic store task that owns the state for one collection
//! - [`StoreClient`] - Cloneable handle with one method per operation
//! - [`Query`] / [`QueryKey`] - List descriptors and their canonical cache keys
//! - [`CollectionState`] - The normalized `items` / `items_count` / `errors` / `data` maps
//! - [`ResolutionCache`] - Which selectors are resolved, resolving, or failed
//! - [`RequestError`] / [`StoreError`] - Error types
//!
//! # Testing
//!
//! See [`crate::transport::mock`] for a transport that answers from expectations.

pub mod client;
pub mod dynamic;
pub mod error;
pub mod message;
pub mod query;
pub mod resolution;
pub mod resource;
pub mod state;
pub mod store;

pub use client::StoreClient;
pub use dynamic::DynamicResource;
pub use error::{ErrorKind, RequestError, StoreError};
pub use message::{Reply, Response, StoreRequest};
pub use query::{Query, QueryKey};
pub use resolution::{Generation, ResolutionCache, ResolutionState, Selector, Waiter};
pub use resource::{Resource, ResourceDescriptor};
pub use state::{CollectionState, ErrorKey};
pub use store::ResourceStore;
