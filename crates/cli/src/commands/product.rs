//! Product catalog commands.

use std::path::Path;

use shelzys_admin::config::ConfigError;
use shelzys_admin::shopify::{AdminError, ProductUpdate};
use thiserror::Error;
use tracing::info;

/// Errors produced by product commands.
#[derive(Debug, Error)]
pub enum ProductError {
    /// Configuration could not be loaded from the environment.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The Admin API call failed.
    #[error("Admin API error: {0}")]
    Admin(#[from] AdminError),

    /// The body file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No fields were supplied to update.
    #[error("Nothing to update: pass at least one of --title, --body-file, --tags")]
    NothingToUpdate,
}

/// List products, optionally filtered by a case-insensitive title match.
pub async fn list(title_contains: Option<&str>) -> Result<(), ProductError> {
    let (_, client) = super::client()?;

    let products = match title_contains {
        Some(needle) => client.find_products_by_title(needle).await?,
        None => client.list_products().await?,
    };

    #[allow(clippy::print_stdout)]
    {
        for product in &products {
            println!(
                "{:>14} {:<10} {:<40} {}",
                product.id, product.status, product.handle, product.title
            );
        }
        println!("{} product(s)", products.len());
    }

    Ok(())
}

/// Update a product's title, body HTML, and/or tags by ID.
pub async fn update(
    id: i64,
    title: Option<String>,
    body_file: Option<&Path>,
    tags: Option<String>,
) -> Result<(), ProductError> {
    let (_, client) = super::client()?;

    let body_html = match body_file {
        Some(path) => Some(std::fs::read_to_string(path)?),
        None => None,
    };
    let update = ProductUpdate { title, body_html, tags };
    if update.is_empty() {
        return Err(ProductError::NothingToUpdate);
    }

    let product = client.update_product(id, &update).await?;
    info!("Updated product {} '{}'", product.id, product.title);

    Ok(())
}
