//! Theme asset and snippet commands.
//!
//! Covers raw asset transfer (`pull`/`push`/`delete`), idempotent snippet
//! injection and ejection against the layout file, deployment of snippet
//! assets, and the `check` audit used as a release gate.

use std::path::Path;

use shelzys_admin::config::ConfigError;
use shelzys_admin::shopify::{
    AdminClient, AdminError, DEFAULT_LAYOUT_CANDIDATES, EjectStatus, InjectStatus,
};
use shelzys_core::liquid::Placement;
use thiserror::Error;
use tracing::{info, warn};

/// Errors produced by theme commands.
#[derive(Debug, Error)]
pub enum ThemeError {
    /// Configuration could not be loaded from the environment.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The Admin API call failed.
    #[error("Admin API error: {0}")]
    Admin(#[from] AdminError),

    /// A local file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested asset does not exist on the theme.
    #[error("Asset not found on theme: {0}")]
    AssetNotFound(String),

    /// None of the candidate layout files exist on the theme.
    #[error("No layout file found on the theme")]
    NoLayout,

    /// One or more snippets failed the deployment check.
    #[error("{0} snippet(s) missing or not referenced")]
    CheckFailed(usize),
}

/// List all themes on the store, marking the published one.
pub async fn list() -> Result<(), ThemeError> {
    let (_, client) = super::client()?;
    let themes = client.list_themes().await?;

    #[allow(clippy::print_stdout)]
    {
        println!("Themes on {}:", client.store());
        for theme in &themes {
            let marker = if theme.is_published() { "*" } else { " " };
            println!("{marker} {:>14}  {:<12} {}", theme.id, theme.role, theme.name);
        }
    }

    Ok(())
}

/// Download a single asset, printing it or writing it to a file.
pub async fn pull(key: &str, theme: Option<i64>, out: Option<&Path>) -> Result<(), ThemeError> {
    let (_, client) = super::client()?;
    let theme_id = super::resolve_theme(&client, theme).await?;

    let asset = client
        .get_asset(theme_id, key)
        .await?
        .ok_or_else(|| ThemeError::AssetNotFound(key.to_string()))?;
    let content = asset.value.unwrap_or_default();

    match out {
        Some(path) => {
            std::fs::write(path, &content)?;
            info!("Wrote {} bytes to {}", content.len(), path.display());
        }
        None => {
            #[allow(clippy::print_stdout)]
            {
                print!("{content}");
            }
        }
    }

    Ok(())
}

/// Upload a local file as a theme asset.
pub async fn push(key: &str, file: &Path, theme: Option<i64>) -> Result<(), ThemeError> {
    let (_, client) = super::client()?;
    let theme_id = super::resolve_theme(&client, theme).await?;

    let content = std::fs::read_to_string(file)?;
    let asset = client.put_asset(theme_id, key, &content).await?;
    info!("Pushed {} ({} bytes)", asset.key, content.len());

    Ok(())
}

/// Delete a theme asset.
pub async fn delete(key: &str, theme: Option<i64>) -> Result<(), ThemeError> {
    let (_, client) = super::client()?;
    let theme_id = super::resolve_theme(&client, theme).await?;

    client.delete_asset(theme_id, key).await?;
    info!("Deleted {key}");

    Ok(())
}

/// Inject a `{% render %}` tag for a snippet into the theme layout.
pub async fn inject(
    snippet: &str,
    marker: &str,
    placement: Placement,
    keys: &[String],
    theme: Option<i64>,
) -> Result<(), ThemeError> {
    let (_, client) = super::client()?;
    let theme_id = super::resolve_theme(&client, theme).await?;

    run_inject(&client, theme_id, snippet, marker, placement, &layout_candidates(keys)).await
}

/// Remove a snippet's `{% render %}` tag, optionally deleting the asset too.
pub async fn eject(
    snippet: &str,
    delete_asset: bool,
    keys: &[String],
    theme: Option<i64>,
) -> Result<(), ThemeError> {
    let (_, client) = super::client()?;
    let theme_id = super::resolve_theme(&client, theme).await?;

    let status = client
        .eject_snippet(theme_id, snippet, &layout_candidates(keys))
        .await?;
    match status {
        EjectStatus::Removed { keys } => {
            for key in &keys {
                info!("Removed '{snippet}' render tag from {key}");
            }
        }
        EjectStatus::NotPresent => {
            info!("'{snippet}' is not referenced in any layout, nothing to do");
        }
        EjectStatus::NoLayoutFound => return Err(ThemeError::NoLayout),
    }

    if delete_asset {
        client.pace().await;
        let key = format!("snippets/{snippet}.liquid");
        client.delete_asset(theme_id, &key).await?;
        info!("Deleted {key}");
    }

    Ok(())
}

/// Audit snippets for deployment: asset present and referenced in layout.
pub async fn check(
    snippets: &[String],
    keys: &[String],
    theme: Option<i64>,
) -> Result<(), ThemeError> {
    let (_, client) = super::client()?;
    let theme_id = super::resolve_theme(&client, theme).await?;

    let checks = client
        .check_snippets(theme_id, snippets, &layout_candidates(keys))
        .await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{:<28} {:>10} {:>12}", "SNIPPET", "DEPLOYED", "REFERENCED");
        for check in &checks {
            println!(
                "{:<28} {:>10} {:>12}",
                check.snippet,
                mark(check.deployed),
                mark(check.referenced)
            );
        }
    }

    let failing = checks
        .iter()
        .filter(|c| !c.deployed || !c.referenced)
        .count();
    if failing > 0 {
        return Err(ThemeError::CheckFailed(failing));
    }

    info!("All {} snippet(s) deployed and referenced", checks.len());
    Ok(())
}

/// Upload a snippet from a local file, optionally injecting its render tag.
pub async fn deploy(
    name: &str,
    file: &Path,
    inject_into: Option<&str>,
    marker: &str,
    placement: Placement,
    theme: Option<i64>,
) -> Result<(), ThemeError> {
    let (_, client) = super::client()?;
    let theme_id = super::resolve_theme(&client, theme).await?;

    let content = std::fs::read_to_string(file)?;
    let asset = client.deploy_snippet(theme_id, name, &content).await?;
    info!("Deployed {} ({} bytes)", asset.key, content.len());

    if let Some(key) = inject_into {
        client.pace().await;
        run_inject(&client, theme_id, name, marker, placement, &[key]).await?;
    }

    Ok(())
}

async fn run_inject(
    client: &AdminClient,
    theme_id: i64,
    snippet: &str,
    marker: &str,
    placement: Placement,
    candidates: &[&str],
) -> Result<(), ThemeError> {
    let status = client
        .inject_snippet(theme_id, snippet, marker, placement, candidates)
        .await?;
    match status {
        InjectStatus::Injected { key } => info!("Injected '{snippet}' render tag into {key}"),
        InjectStatus::AlreadyPresent { key } => {
            info!("'{snippet}' already referenced in {key}, skipping");
        }
        InjectStatus::MarkerNotFound { key } => {
            warn!("Marker '{marker}' not found in {key}, asset left unchanged");
        }
        InjectStatus::NoLayoutFound => return Err(ThemeError::NoLayout),
    }
    Ok(())
}

fn layout_candidates(keys: &[String]) -> Vec<&str> {
    if keys.is_empty() {
        DEFAULT_LAYOUT_CANDIDATES.to_vec()
    } else {
        keys.iter().map(String::as_str).collect()
    }
}

const fn mark(ok: bool) -> &'static str {
    if ok { "ok" } else { "MISSING" }
}
