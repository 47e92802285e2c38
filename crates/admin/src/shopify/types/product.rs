//! Product types for the Admin REST API.

use serde::{Deserialize, Serialize};

/// A product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// Variant ID.
    pub id: i64,
    /// Variant title (combination of option values).
    pub title: String,
    /// Price as a decimal string (e.g. "24.99").
    pub price: String,
    /// SKU code.
    pub sku: Option<String>,
}

/// A product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: i64,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// HTML description.
    pub body_html: Option<String>,
    /// Vendor name.
    #[serde(default)]
    pub vendor: String,
    /// Comma-separated tags (REST returns tags as one string).
    #[serde(default)]
    pub tags: String,
    /// Product status: "active", "draft", or "archived".
    #[serde(default)]
    pub status: String,
    /// Product variants.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Tags split out of the comma-separated REST representation.
    #[must_use]
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Response envelope for `GET /products.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsResponse {
    /// Products in this batch.
    pub products: Vec<Product>,
}

/// Response envelope for single-product requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductResponse {
    /// The product.
    pub product: Product,
}
