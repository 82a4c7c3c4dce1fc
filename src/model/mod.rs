//! Commerce resources implementing the [`Resource`](crate::framework::Resource) trait.

pub mod product;
pub mod product_category;
pub mod product_tag;

pub use product::*;
pub use product_category::*;
pub use product_tag::*;
