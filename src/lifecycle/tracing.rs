//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Store Lifecycle**: `Store started` and `Shutdown` with the final number of cached objects
//! - **Reads**: `Get` / `List` / `Total count` at `debug`, with `resolve` telling
//!   `get_*` and `resolve_*` apart
//! - **Resolution**: `Item resolved` / `List resolved` at `debug`, fetch failures at `warn`
//! - **Mutations**: `Created` / `Updated` / `Deleted` at `info`, failures at `warn`
//! - **Client calls**: one span per named client method (`get_products`, `create_product`, ...)
//!
//! Every store event carries a `resource` field with the singular resource name, so
//! the module path is left out of the output (`with_target(false)`).
//!
//! ## Usage Examples
//!
//! ```bash
//! # Mutations and lifecycle only
//! RUST_LOG=info cargo run
//!
//! # Every read, with query keys and payloads
//! RUST_LOG=debug cargo run
//!
//! # Transport only
//! RUST_LOG=resource_store::transport=debug cargo run
//! ```
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! INFO Store started resource="product" namespace="/wc/v3/products"
//! DEBUG get_products: Sending request query=Query({"per_page": Number(5)})
//! DEBUG List resource="product" key=per_page=5 resolve=true
//! DEBUG Sending request method=GET url=https://shop.example/wp-json/wc/v3/products?per_page=5
//! DEBUG List resolved resource="product" key=per_page=5 page=5 total=Some(42)
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // stores log a `resource` field instead
        .compact()
        .init();
}
