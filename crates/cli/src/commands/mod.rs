//! Command implementations for the Shelzy's Designs CLI.
//!
//! Each submodule owns one top-level command, its error enum, and the
//! human-facing report it prints. Shared plumbing (environment config,
//! Admin API client, theme resolution) lives here.

pub mod blog;
pub mod comet;
pub mod page;
pub mod product;
pub mod redirect;
pub mod theme;

use shelzys_admin::config::{Config, ConfigError};
use shelzys_admin::shopify::{AdminClient, AdminError};

/// Load configuration from the environment and build an Admin API client.
///
/// Most commands start here; `comet` commands work on local files and
/// skip it entirely.
pub(crate) fn client() -> Result<(Config, AdminClient), ConfigError> {
    let config = Config::from_env()?;
    let client = AdminClient::new(&config);
    Ok((config, client))
}

/// Resolve an explicit `--theme` ID, falling back to the published theme.
pub(crate) async fn resolve_theme(
    client: &AdminClient,
    theme: Option<i64>,
) -> Result<i64, AdminError> {
    match theme {
        Some(id) => Ok(id),
        None => Ok(client.published_theme().await?.id),
    }
}
