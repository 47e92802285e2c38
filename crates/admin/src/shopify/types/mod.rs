//! Domain types for the Shopify Admin REST API.
//!
//! Field layouts mirror the REST (2024-01) wire shapes so they
//! deserialize directly from response envelopes.

pub mod blog;
pub mod page;
pub mod product;
pub mod redirect;
pub mod theme;

// Re-export all types for convenience
pub use blog::*;
pub use page::*;
pub use product::*;
pub use redirect::*;
pub use theme::*;
