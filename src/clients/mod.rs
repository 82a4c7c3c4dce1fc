//! Named clients wrapping [`StoreClient`](crate::framework::StoreClient).

pub mod client_ext;
pub mod product_category_client;
pub mod product_client;
pub mod product_tag_client;
mod resource_client;

pub use client_ext::*;
pub use product_category_client::*;
pub use product_client::*;
pub use product_tag_client::*;
