//! Online Store page types for the Admin REST API.

use serde::{Deserialize, Serialize};

/// An Online Store page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Page ID.
    pub id: i64,
    /// Page title.
    pub title: String,
    /// URL handle (the page lives at `/pages/{handle}`).
    pub handle: String,
    /// HTML body.
    pub body_html: Option<String>,
    /// Publish timestamp; `None` means the page is hidden.
    pub published_at: Option<String>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

impl Page {
    /// Whether the page is visible on the storefront.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }
}

/// Response envelope for `GET /pages.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct PagesResponse {
    /// Pages in this batch.
    pub pages: Vec<Page>,
}

/// Response envelope for single-page requests.
#[derive(Debug, Clone, Deserialize)]
pub struct PageResponse {
    /// The page.
    pub page: Page,
}
