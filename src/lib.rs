#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Resource Store
//!
//! > **Client-side mirrors of REST collections, one actor per collection.**
//!
//! This crate keeps a normalized, typed cache of REST resources (products, tags,
//! categories, or any JSON collection) and fetches what a read needs exactly once,
//! no matter how many callers ask for it at the same time.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Why a store per collection?
//!
//! - **Normalization**: each object lives once in `data`, keyed by id. List queries only
//!   remember ordered ids, so an update is visible through every list that contains it.
//! - **Single-flight resolution**: concurrent readers of the same item or query share one
//!   request.
//! - **Sequential state**: the store task applies every transition one message at a
//!   time. Requests run on spawned tasks and report back through the same channel.
//!
//! ## 🚀 Core Concepts
//!
//! ### Generics: The Power of `T`
//! [`ResourceStore<T: Resource>`](framework::ResourceStore) is written once and mirrors any
//! collection whose type implements [`Resource`](framework::Resource). For collections only
//! known at runtime, [`DynamicResource`](framework::DynamicResource) stores raw JSON objects.
//!
//! ### Queries and keys
//! A [`Query`](framework::Query) is a set of parameters. Its [`QueryKey`](framework::QueryKey)
//! is canonical: the same parameters in any order share one cache entry and one request.
//!
//! ### Mocking: Testing without a Server
//! [`MockTransport`](transport::MockTransport) answers requests from expectations and can
//! delay individual responses. See the [`transport::mock`] module.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Errors are state
//! A failed fetch never fails a read. It is recorded under the key that caused it and read
//! back with the `*_error` methods. Mutations both record the error and return it.
//!
//! ### 2. Explicit handles
//! There is no global registry. [`CatalogSystem`](lifecycle::CatalogSystem) spawns the stores
//! and owns their handles; clients are cloned to wherever they are needed.
//!
//! ### 3. Observability
//! We use `tracing` everywhere with structured fields. See the [`lifecycle::tracing`] module.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Key items**: [`Resource`](framework::Resource), [`ResourceStore`](framework::ResourceStore),
//!   [`StoreClient`](framework::StoreClient).
//!
//! ### 2. The Wire ([`transport`], [`config`])
//! - **Key items**: [`Transport`](transport::Transport), [`HttpTransport`](transport::HttpTransport),
//!   [`StoreConfig`](config::StoreConfig).
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: named methods (`get_products`, `create_product`, ...) generated by
//!   [`resource_client!`].
//!
//! ### 4. The Catalog ([`model`], [`lifecycle`])
//! - **Role**: commerce resources and the container that runs their stores.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RESOURCE_STORE_BASE_URL=https://shop.example \
//! RESOURCE_STORE_CONSUMER_KEY=ck_... RESOURCE_STORE_CONSUMER_SECRET=cs_... \
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod transport;

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}
