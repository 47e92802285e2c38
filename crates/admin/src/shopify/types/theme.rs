//! Theme and asset types for the Admin REST API.

use serde::{Deserialize, Serialize};

/// Role of the published theme.
pub const PUBLISHED_ROLE: &str = "main";

/// An installed theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Theme ID.
    pub id: i64,
    /// Theme name as shown in the admin.
    pub name: String,
    /// Theme role: "main" (published), "unpublished", or "demo".
    pub role: String,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

impl Theme {
    /// Whether this is the live storefront theme.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.role == PUBLISHED_ROLE
    }
}

/// Response envelope for `GET /themes.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemesResponse {
    /// All installed themes.
    pub themes: Vec<Theme>,
}

/// A theme asset (Liquid template, snippet, JSON config, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Asset key, e.g. `layout/theme.liquid` or `snippets/wishlist.liquid`.
    pub key: String,
    /// Text content. `None` for binary assets (images return `attachment`).
    pub value: Option<String>,
    /// MIME type reported by Shopify.
    pub content_type: Option<String>,
    /// Size in bytes.
    pub size: Option<i64>,
}

/// Response envelope for single-asset requests.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetResponse {
    /// The requested asset.
    pub asset: Asset,
}
