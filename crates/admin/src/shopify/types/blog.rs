//! Blog and article types for the Admin REST API.

use serde::{Deserialize, Serialize};

/// A blog (container for articles).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blog {
    /// Blog ID.
    pub id: i64,
    /// Blog title.
    pub title: String,
    /// URL handle (the blog lives at `/blogs/{handle}`).
    pub handle: String,
}

/// Response envelope for `GET /blogs.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlogsResponse {
    /// All blogs on the store.
    pub blogs: Vec<Blog>,
}

/// A blog article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Article ID.
    pub id: i64,
    /// Owning blog ID.
    pub blog_id: i64,
    /// Article title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// HTML body.
    pub body_html: Option<String>,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Publish timestamp; `None` means draft.
    pub published_at: Option<String>,
}

impl Article {
    /// Length of the HTML body in bytes (0 when empty).
    #[must_use]
    pub fn body_len(&self) -> usize {
        self.body_html.as_ref().map_or(0, String::len)
    }
}

/// Response envelope for `GET /blogs/{id}/articles.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticlesResponse {
    /// Articles in this batch.
    pub articles: Vec<Article>,
}
