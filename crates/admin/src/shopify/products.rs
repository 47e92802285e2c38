//! Product operations.

use serde::Serialize;
use tracing::{info, instrument};

use super::types::{Product, ProductResponse, ProductsResponse};
use super::{AdminClient, AdminError};

/// Partial product update.
///
/// All fields are optional - only provided fields will be updated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductUpdate {
    /// New product title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New HTML description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    /// New comma-separated tags (replaces existing tags).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl ProductUpdate {
    /// Whether the update would change anything at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.body_html.is_none() && self.tags.is_none()
    }
}

#[derive(Debug, Serialize)]
struct ProductWrite<'a> {
    id: i64,
    #[serde(flatten)]
    update: &'a ProductUpdate,
}

#[derive(Debug, Serialize)]
struct ProductWriteRequest<'a> {
    product: ProductWrite<'a>,
}

impl AdminClient {
    /// List products (up to 250).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, AdminError> {
        let response: ProductsResponse = self.get("/products.json?limit=250").await?;
        Ok(response.products)
    }

    /// Find products whose title contains `needle` (case-insensitive).
    ///
    /// Filters client-side over the first 250 products, which covers the
    /// whole catalog for this store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn find_products_by_title(&self, needle: &str) -> Result<Vec<Product>, AdminError> {
        let needle = needle.to_lowercase();
        let products = self.list_products().await?;
        Ok(products
            .into_iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .collect())
    }

    /// Apply a partial update to a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or Shopify rejects the body.
    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        id: i64,
        update: &ProductUpdate,
    ) -> Result<Product, AdminError> {
        let body = ProductWriteRequest {
            product: ProductWrite { id, update },
        };
        let path = format!("/products/{id}.json");
        let response: ProductResponse = self.put(&path, &body).await?;
        info!("Updated product {id}");
        Ok(response.product)
    }
}
