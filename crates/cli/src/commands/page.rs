//! Online Store page commands.

use std::path::Path;

use shelzys_admin::config::ConfigError;
use shelzys_admin::shopify::{AdminError, NewPage, PageUpsert};
use thiserror::Error;
use tracing::info;

/// Errors produced by page commands.
#[derive(Debug, Error)]
pub enum PageError {
    /// Configuration could not be loaded from the environment.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The Admin API call failed.
    #[error("Admin API error: {0}")]
    Admin(#[from] AdminError),

    /// The body file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// List all pages on the store.
pub async fn list() -> Result<(), PageError> {
    let (_, client) = super::client()?;
    let pages = client.list_pages().await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Pages on {}:", client.store());
        for page in &pages {
            let marker = if page.is_published() { " " } else { "d" };
            println!("{marker} {:>14}  /pages/{:<32} {}", page.id, page.handle, page.title);
        }
        println!("{} page(s)", pages.len());
    }

    Ok(())
}

/// Create or update a page by handle, with body HTML read from a file.
pub async fn upsert(
    handle: &str,
    title: &str,
    body_file: &Path,
    unpublished: bool,
) -> Result<(), PageError> {
    let (_, client) = super::client()?;

    let body_html = std::fs::read_to_string(body_file)?;
    let page = NewPage {
        title: title.to_string(),
        handle: handle.to_string(),
        body_html,
        published: !unpublished,
    };

    match client.upsert_page(&page).await? {
        PageUpsert::Created(p) => {
            info!("Created page '{}' at /pages/{} (id {})", p.title, p.handle, p.id);
        }
        PageUpsert::Updated(p) => {
            info!("Updated page '{}' at /pages/{} (id {})", p.title, p.handle, p.id);
        }
    }

    Ok(())
}
