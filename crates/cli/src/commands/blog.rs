//! Blog maintenance commands.
//!
//! These are audit-first tools: `audit-links` and `audit-duplicates` only
//! report, `fix-links` is the one that writes article bodies back.

use shelzys_admin::config::ConfigError;
use shelzys_admin::shopify::AdminError;
use thiserror::Error;
use tracing::info;

/// Errors produced by blog commands.
#[derive(Debug, Error)]
pub enum BlogError {
    /// Configuration could not be loaded from the environment.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The Admin API call failed.
    #[error("Admin API error: {0}")]
    Admin(#[from] AdminError),

    /// Some article bodies could not be written back.
    #[error("{0} article update(s) failed")]
    FixFailed(usize),
}

/// Report articles with bare or malformed Amazon links.
pub async fn audit_links() -> Result<(), BlogError> {
    let (_, client) = super::client()?;

    let audits = client.audit_links().await?;
    if audits.is_empty() {
        info!("No articles with bare or malformed Amazon links");
        return Ok(());
    }

    #[allow(clippy::print_stdout)]
    {
        for audit in &audits {
            println!(
                "[{}] {} (id {}): {} bare, {} malformed",
                audit.blog, audit.title, audit.article_id, audit.plain_links, audit.malformed_links
            );
        }
        println!("{} article(s) need fixing", audits.len());
    }

    Ok(())
}

/// Rewrite Amazon links in all articles to tagged affiliate form.
pub async fn fix_links(tag: Option<&str>) -> Result<(), BlogError> {
    let (config, client) = super::client()?;
    let tag = tag.unwrap_or(&config.amazon_associate_tag);

    info!("Fixing Amazon links with associate tag '{tag}'");
    let report = client.fix_links(tag).await?;
    if report.fixes.is_empty() && report.failed.is_empty() {
        info!("All Amazon links are already tagged ({} article(s) scanned)", report.scanned);
        return Ok(());
    }

    #[allow(clippy::print_stdout)]
    {
        for fix in &report.fixes {
            println!(
                "{} (id {}): wrapped {}, repaired {}",
                fix.title, fix.article_id, fix.links_wrapped, fix.malformed_fixed
            );
        }
        for (article_id, message) in &report.failed {
            println!("! article {article_id}: {message}");
        }
        println!(
            "{} article(s) scanned, {} updated",
            report.scanned,
            report.fixes.len()
        );
    }

    if !report.failed.is_empty() {
        return Err(BlogError::FixFailed(report.failed.len()));
    }

    Ok(())
}

/// Report groups of articles that appear to be duplicates of each other.
pub async fn audit_duplicates() -> Result<(), BlogError> {
    let (_, client) = super::client()?;

    let groups = client.audit_duplicates().await?;
    if groups.is_empty() {
        info!("No duplicate articles found");
        return Ok(());
    }

    #[allow(clippy::print_stdout)]
    {
        for group in &groups {
            println!(
                "Keep:   {} (id {}, {} bytes, created {})",
                group.keep.title, group.keep.id, group.keep.body_len, group.keep.created_at
            );
            for article in &group.remove {
                println!(
                    "Remove: {} (id {}, {} bytes, created {})",
                    article.title, article.id, article.body_len, article.created_at
                );
            }
            println!();
        }
        println!("{} duplicate group(s); no articles were deleted", groups.len());
    }

    Ok(())
}
