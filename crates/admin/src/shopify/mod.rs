//! Shopify Admin API client (HIGH PRIVILEGE - full store access).
//!
//! # Security
//!
//! **CRITICAL: This module authenticates with the high-privilege Admin API token.**
//!
//! The token is loaded from the environment only and must never be committed
//! to the repository. With the scopes this project uses, the token can:
//! - Read and write theme assets (layout, snippets)
//! - Create and update pages, blog articles, redirects
//! - Update products and metafields
//!
//! # Architecture
//!
//! - REST Admin API (2024-01) for themes, pages, products, and blogs
//! - Raw GraphQL for URL redirects and metafield writes
//! - Every request retries up to 3 times with linear backoff
//! - Mutating loops pace themselves 300ms between calls (REST bucket is
//!   2 requests/second; pacing keeps well under it)
//!
//! # Example
//!
//! ```rust,ignore
//! use shelzys_admin::config::Config;
//! use shelzys_admin::shopify::AdminClient;
//!
//! let config = Config::from_env()?;
//! let client = AdminClient::new(&config);
//!
//! let theme = client.published_theme().await?;
//! let pages = client.list_pages().await?;
//! ```

mod blog;
mod client;
mod pages;
mod products;
mod redirects;
mod themes;
pub mod types;

pub use blog::{ArticleSummary, DuplicateGroup, LinkAudit, LinkFix, LinkFixReport};
pub use client::AdminClient;
pub use pages::{NewPage, PageUpsert};
pub use products::ProductUpdate;
pub use redirects::{RedirectOutcome, RedirectSummary};
pub use themes::{DEFAULT_LAYOUT_CANDIDATES, EjectStatus, InjectStatus, SnippetCheck};
pub use types::*;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when interacting with the Shopify Admin API.
#[derive(Debug, Error)]
pub enum AdminError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Token lacks a required access scope.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Shopify rejected the payload (HTTP 422).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unexpected HTTP status.
    #[error("Unexpected status {0}: {1}")]
    Status(u16, String),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    #[serde(default)]
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    #[serde(default)]
    pub line: i64,
    /// Column number (1-indexed).
    #[serde(default)]
    pub column: i64,
}

/// A user error returned inside a mutation payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UserError {
    /// Input field path the error refers to, if any.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    /// Error message.
    pub message: String,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Format mutation user errors as `field.path: message` joined with `; `.
pub(crate) fn format_user_errors(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| match &e.field {
            Some(field) if !field.is_empty() => format!("{}: {}", field.join("."), e.message),
            _ => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
