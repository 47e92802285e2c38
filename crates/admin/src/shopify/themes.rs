//! Theme and asset operations: snippet deploy, injection into the layout,
//! ejection, and presence checks.

use serde::Serialize;
use shelzys_core::liquid::{self, InjectOutcome, Placement};
use tracing::{info, instrument};
use urlencoding::encode;

use super::types::{Asset, AssetResponse, Theme, ThemesResponse};
use super::{AdminClient, AdminError};

/// Layout files tried, in order, when injecting a snippet reference.
pub const DEFAULT_LAYOUT_CANDIDATES: &[&str] = &["layout/theme.liquid"];

/// Outcome of injecting a snippet reference into the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectStatus {
    /// Reference written into the named asset.
    Injected {
        /// Asset key that was modified.
        key: String,
    },
    /// The layout already references the snippet; nothing written.
    AlreadyPresent {
        /// Asset key that already carries the reference.
        key: String,
    },
    /// The asset exists but the marker was not found in it.
    MarkerNotFound {
        /// Asset key that was searched.
        key: String,
    },
    /// None of the candidate layout assets exist on the theme.
    NoLayoutFound,
}

/// Outcome of removing a snippet reference from the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EjectStatus {
    /// References removed from the named assets.
    Removed {
        /// Asset keys that were modified.
        keys: Vec<String>,
    },
    /// No candidate asset references the snippet.
    NotPresent,
    /// None of the candidate layout assets exist on the theme.
    NoLayoutFound,
}

/// Deploy/reference state of one snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetCheck {
    /// Snippet name (without `snippets/` prefix or `.liquid` suffix).
    pub snippet: String,
    /// Whether `snippets/{name}.liquid` exists on the theme.
    pub deployed: bool,
    /// Whether the layout references the snippet with a render tag.
    pub referenced: bool,
}

#[derive(Debug, Serialize)]
struct AssetWrite<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct AssetWriteRequest<'a> {
    asset: AssetWrite<'a>,
}

fn snippet_key(name: &str) -> String {
    format!("snippets/{name}.liquid")
}

impl AdminClient {
    /// List all installed themes.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_themes(&self) -> Result<Vec<Theme>, AdminError> {
        let response: ThemesResponse = self.get("/themes.json").await?;
        Ok(response.themes)
    }

    /// Find the published (live) theme.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::NotFound` if no theme has the "main" role.
    #[instrument(skip(self))]
    pub async fn published_theme(&self) -> Result<Theme, AdminError> {
        let themes = self.list_themes().await?;
        themes
            .into_iter()
            .find(Theme::is_published)
            .ok_or_else(|| AdminError::NotFound("No published theme".to_string()))
    }

    /// Fetch a single asset by key. Returns `None` if the asset does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails for any reason other than 404.
    #[instrument(skip(self))]
    pub async fn get_asset(&self, theme_id: i64, key: &str) -> Result<Option<Asset>, AdminError> {
        let path = format!("/themes/{theme_id}/assets.json?asset[key]={}", encode(key));
        let response: Option<AssetResponse> = self.get_optional(&path).await?;
        Ok(response.map(|r| r.asset))
    }

    /// Create or overwrite a text asset.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or Shopify rejects the value.
    #[instrument(skip(self, value))]
    pub async fn put_asset(
        &self,
        theme_id: i64,
        key: &str,
        value: &str,
    ) -> Result<Asset, AdminError> {
        let path = format!("/themes/{theme_id}/assets.json");
        let body = AssetWriteRequest {
            asset: AssetWrite { key, value },
        };
        let response: AssetResponse = self.put(&path, &body).await?;
        info!("Wrote asset {key} ({} bytes)", value.len());
        Ok(response.asset)
    }

    /// Delete an asset by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the asset does not exist.
    #[instrument(skip(self))]
    pub async fn delete_asset(&self, theme_id: i64, key: &str) -> Result<(), AdminError> {
        let path = format!("/themes/{theme_id}/assets.json?asset[key]={}", encode(key));
        self.delete(&path).await?;
        info!("Deleted asset {key}");
        Ok(())
    }

    /// Upload snippet content as `snippets/{name}.liquid`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, content))]
    pub async fn deploy_snippet(
        &self,
        theme_id: i64,
        name: &str,
        content: &str,
    ) -> Result<Asset, AdminError> {
        self.put_asset(theme_id, &snippet_key(name), content).await
    }

    /// Inject a `{% render 'name' %}` reference into the first candidate
    /// layout asset that exists, anchored at `marker`.
    ///
    /// Idempotent: if the layout already references the snippet, nothing
    /// is written.
    ///
    /// # Errors
    ///
    /// Returns an error if an API request fails.
    #[instrument(skip(self))]
    pub async fn inject_snippet(
        &self,
        theme_id: i64,
        name: &str,
        marker: &str,
        placement: Placement,
        candidates: &[&str],
    ) -> Result<InjectStatus, AdminError> {
        for key in candidates {
            let Some(asset) = self.get_asset(theme_id, key).await? else {
                continue;
            };
            let Some(content) = asset.value else {
                continue;
            };

            return Ok(match liquid::inject(&content, marker, placement, name) {
                InjectOutcome::AlreadyPresent => InjectStatus::AlreadyPresent {
                    key: (*key).to_string(),
                },
                InjectOutcome::MarkerNotFound => InjectStatus::MarkerNotFound {
                    key: (*key).to_string(),
                },
                InjectOutcome::Injected(updated) => {
                    self.put_asset(theme_id, key, &updated).await?;
                    InjectStatus::Injected {
                        key: (*key).to_string(),
                    }
                }
            });
        }
        Ok(InjectStatus::NoLayoutFound)
    }

    /// Remove every `{% render 'name' %}` reference from each candidate
    /// layout asset that carries one. The snippet file itself is left in
    /// place; use [`AdminClient::delete_asset`] to remove it.
    ///
    /// # Errors
    ///
    /// Returns an error if an API request fails.
    #[instrument(skip(self))]
    pub async fn eject_snippet(
        &self,
        theme_id: i64,
        name: &str,
        candidates: &[&str],
    ) -> Result<EjectStatus, AdminError> {
        let mut found_layout = false;
        let mut removed = Vec::new();
        for key in candidates {
            let Some(asset) = self.get_asset(theme_id, key).await? else {
                continue;
            };
            let Some(content) = asset.value else {
                continue;
            };
            found_layout = true;

            if let Some(updated) = liquid::remove_render(&content, name) {
                self.put_asset(theme_id, key, &updated).await?;
                self.pace().await;
                removed.push((*key).to_string());
            }
        }
        if !removed.is_empty() {
            Ok(EjectStatus::Removed { keys: removed })
        } else if found_layout {
            Ok(EjectStatus::NotPresent)
        } else {
            Ok(EjectStatus::NoLayoutFound)
        }
    }

    /// Report deploy/reference state for each snippet name. A snippet
    /// counts as referenced when any existing candidate asset carries its
    /// render tag.
    ///
    /// # Errors
    ///
    /// Returns an error if an API request fails, or `AdminError::NotFound`
    /// if no candidate layout asset exists.
    #[instrument(skip(self, names))]
    pub async fn check_snippets(
        &self,
        theme_id: i64,
        names: &[String],
        candidates: &[&str],
    ) -> Result<Vec<SnippetCheck>, AdminError> {
        let mut layouts = Vec::new();
        for key in candidates {
            if let Some(asset) = self.get_asset(theme_id, key).await?
                && let Some(content) = asset.value
            {
                layouts.push(content);
            }
        }
        if layouts.is_empty() {
            return Err(AdminError::NotFound(
                "No candidate layout asset".to_string(),
            ));
        }

        let mut checks = Vec::with_capacity(names.len());
        for name in names {
            let deployed = self
                .get_asset(theme_id, &snippet_key(name))
                .await?
                .is_some();
            checks.push(SnippetCheck {
                snippet: name.clone(),
                deployed,
                referenced: layouts
                    .iter()
                    .any(|layout| liquid::contains_render(layout, name)),
            });
        }
        Ok(checks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_key() {
        assert_eq!(snippet_key("wishlist-button"), "snippets/wishlist-button.liquid");
    }

    #[test]
    fn test_default_layout_candidates() {
        assert_eq!(DEFAULT_LAYOUT_CANDIDATES, &["layout/theme.liquid"]);
    }
}
