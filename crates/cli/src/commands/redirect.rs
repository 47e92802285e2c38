//! URL redirect commands.
//!
//! `sync` reads a JSON array of `{path, target}` pairs, the same shape the
//! store's redirect manifests are kept in under version control.

use std::path::Path;

use shelzys_admin::config::ConfigError;
use shelzys_admin::shopify::{AdminError, RedirectOutcome, RedirectPair};
use thiserror::Error;
use tracing::info;

/// Errors produced by redirect commands.
#[derive(Debug, Error)]
pub enum RedirectError {
    /// Configuration could not be loaded from the environment.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The Admin API call failed.
    #[error("Admin API error: {0}")]
    Admin(#[from] AdminError),

    /// The manifest file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest file is not a valid JSON array of redirect pairs.
    #[error("Invalid redirect manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// The redirect was rejected by the Admin API.
    #[error("Redirect creation failed: {0}")]
    CreateFailed(String),

    /// One or more redirects in the batch failed.
    #[error("{0} redirect(s) failed to sync")]
    SyncFailed(usize),
}

/// Create a single redirect, skipping it if one already exists.
pub async fn create(path: &str, target: &str) -> Result<(), RedirectError> {
    let (_, client) = super::client()?;

    let pair = RedirectPair {
        path: path.to_string(),
        target: target.to_string(),
    };
    match client.create_redirect(&pair).await? {
        RedirectOutcome::Created => info!("Created redirect {path} -> {target}"),
        RedirectOutcome::Skipped(reason) => info!("Skipped {path}: {reason}"),
        RedirectOutcome::Failed(message) => return Err(RedirectError::CreateFailed(message)),
    }

    Ok(())
}

/// Sync a manifest of redirects, creating the ones that don't exist yet.
pub async fn sync(file: &Path) -> Result<(), RedirectError> {
    let (_, client) = super::client()?;

    let pairs: Vec<RedirectPair> = serde_json::from_str(&std::fs::read_to_string(file)?)?;
    info!("Syncing {} redirect(s) to {}", pairs.len(), client.store());

    let summary = client.sync_redirects(&pairs).await;

    #[allow(clippy::print_stdout)]
    {
        println!("Created: {}", summary.created.len());
        for path in &summary.created {
            println!("  + {path}");
        }
        println!("Skipped: {}", summary.skipped.len());
        for (path, reason) in &summary.skipped {
            println!("  = {path} ({reason})");
        }
        if summary.has_failures() {
            println!("Failed: {}", summary.failed.len());
            for (path, message) in &summary.failed {
                println!("  ! {path}: {message}");
            }
        }
    }

    if summary.has_failures() {
        return Err(RedirectError::SyncFailed(summary.failed.len()));
    }
    Ok(())
}
