//! URL redirect operations (GraphQL; the REST redirect endpoint is
//! deprecated in 2024-01).

use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::types::RedirectPair;
use super::{AdminClient, AdminError, UserError, format_user_errors};

const REDIRECT_EXISTS_QUERY: &str = r"
query RedirectExists($query: String!) {
  urlRedirects(first: 1, query: $query) {
    edges {
      node {
        id
        path
        target
      }
    }
  }
}";

const REDIRECT_CREATE_MUTATION: &str = r"
mutation RedirectCreate($redirect: UrlRedirectInput!) {
  urlRedirectCreate(urlRedirect: $redirect) {
    urlRedirect {
      id
      path
      target
    }
    userErrors {
      field
      message
    }
  }
}";

/// Outcome of a single redirect create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// Redirect created.
    Created,
    /// Redirect already exists; treated as success.
    Skipped(String),
    /// Shopify rejected the redirect (user errors other than duplicates).
    Failed(String),
}

/// Batch result of [`AdminClient::sync_redirects`].
#[derive(Debug, Clone, Default)]
pub struct RedirectSummary {
    /// Paths created.
    pub created: Vec<String>,
    /// Paths skipped, with the reason.
    pub skipped: Vec<(String, String)>,
    /// Paths that failed, with the error.
    pub failed: Vec<(String, String)>,
}

impl RedirectSummary {
    /// Whether any redirect in the batch failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Number of redirects processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.created.len() + self.skipped.len() + self.failed.len()
    }
}

/// A duplicate is a success for our purposes: the redirect is in place.
fn is_duplicate_error(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("already exists") || lower.contains("duplicate")
}

impl AdminClient {
    /// Check whether a redirect already exists for `path`.
    ///
    /// Deliberately tolerant: a lookup failure logs a warning and reports
    /// `false`, so the batch falls through to the create (which classifies
    /// duplicates itself).
    #[instrument(skip(self))]
    pub async fn redirect_exists(&self, path: &str) -> bool {
        let variables = json!({ "query": format!("path:{path}") });
        match self.graphql(REDIRECT_EXISTS_QUERY, variables).await {
            Ok(data) => data
                .get("urlRedirects")
                .and_then(|v| v.get("edges"))
                .and_then(Value::as_array)
                .is_some_and(|edges| !edges.is_empty()),
            Err(e) => {
                warn!("Redirect lookup for {path} failed, assuming absent: {e}");
                false
            }
        }
    }

    /// Create one redirect. Duplicate errors come back as
    /// [`RedirectOutcome::Skipped`], other user errors as
    /// [`RedirectOutcome::Failed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the API request itself fails.
    #[instrument(skip(self, pair), fields(path = %pair.path))]
    pub async fn create_redirect(
        &self,
        pair: &RedirectPair,
    ) -> Result<RedirectOutcome, AdminError> {
        let variables = json!({
            "redirect": {
                "path": pair.path,
                "target": pair.target,
            }
        });
        let data = self.graphql(REDIRECT_CREATE_MUTATION, variables).await?;

        let user_errors: Vec<UserError> = data
            .get("urlRedirectCreate")
            .and_then(|v| v.get("userErrors"))
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .unwrap_or_default();

        if user_errors.is_empty() {
            info!("Created redirect {} -> {}", pair.path, pair.target);
            return Ok(RedirectOutcome::Created);
        }

        let message = format_user_errors(&user_errors);
        if user_errors.iter().any(|e| is_duplicate_error(&e.message)) {
            Ok(RedirectOutcome::Skipped(message))
        } else {
            Ok(RedirectOutcome::Failed(message))
        }
    }

    /// Create a batch of redirects, skipping ones that already exist and
    /// collecting failures instead of aborting. Paces 300ms between calls.
    /// Per-item errors (including request failures) land in
    /// [`RedirectSummary::failed`]; the sweep itself always completes.
    #[instrument(skip(self, pairs), fields(count = pairs.len()))]
    pub async fn sync_redirects(&self, pairs: &[RedirectPair]) -> RedirectSummary {
        let mut summary = RedirectSummary::default();

        for pair in pairs {
            if self.redirect_exists(&pair.path).await {
                summary
                    .skipped
                    .push((pair.path.clone(), "already exists".to_string()));
                self.pace().await;
                continue;
            }

            match self.create_redirect(pair).await {
                Ok(RedirectOutcome::Created) => summary.created.push(pair.path.clone()),
                Ok(RedirectOutcome::Skipped(reason)) => {
                    summary.skipped.push((pair.path.clone(), reason));
                }
                Ok(RedirectOutcome::Failed(error)) => {
                    summary.failed.push((pair.path.clone(), error));
                }
                Err(e) => {
                    summary.failed.push((pair.path.clone(), e.to_string()));
                }
            }
            self.pace().await;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_duplicate_error() {
        assert!(is_duplicate_error("Path already exists"));
        assert!(is_duplicate_error("Duplicate redirect"));
        assert!(is_duplicate_error("path has ALREADY EXISTS somewhere"));
        assert!(!is_duplicate_error("Target is invalid"));
    }

    #[test]
    fn test_summary_counts() {
        let summary = RedirectSummary {
            created: vec!["/a".to_string()],
            skipped: vec![("/b".to_string(), "already exists".to_string())],
            failed: vec![],
        };
        assert_eq!(summary.total(), 2);
        assert!(!summary.has_failures());
    }
}
