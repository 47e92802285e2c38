//! Comet campaign pack commands.
//!
//! Both commands work entirely on local files and never touch the Admin
//! API, so they run without any store credentials.

use std::path::Path;

use shelzys_admin::comet::{self, MetafieldMutation};
use thiserror::Error;
use tracing::info;

/// Errors produced by comet commands.
#[derive(Debug, Error)]
pub enum CometError {
    /// The campaign pack could not be read or parsed.
    #[error("Campaign pack error: {0}")]
    Pack(#[from] comet::CometError),

    /// The pack failed validation.
    #[error("Validation failed with {0} error(s)")]
    ValidationFailed(usize),
}

/// Validate a campaign pack's structure and report errors and warnings.
pub fn validate(slug: &str, packs_dir: &Path) -> Result<(), CometError> {
    let pack_dir = packs_dir.join(slug);
    let report = comet::validate_pack(&pack_dir)?;

    #[allow(clippy::print_stdout)]
    {
        println!("Validating campaign pack: {slug}");
        println!("{}", "=".repeat(60));
        println!(
            "{} product(s), {} collection(s), {} media file(s)",
            report.products, report.collections, report.media_files
        );

        if !report.errors.is_empty() {
            println!();
            println!("Errors ({}):", report.errors.len());
            for error in &report.errors {
                println!("  ! {error}");
            }
        }
        if !report.warnings.is_empty() {
            println!();
            println!("Warnings ({}):", report.warnings.len());
            for warning in &report.warnings {
                println!("  ? {warning}");
            }
        }

        println!();
        if report.clean() {
            println!("PASSED - campaign pack is ready to ingest");
        } else if report.passed() {
            println!("PASSED WITH WARNINGS - review before ingesting");
        } else {
            println!("FAILED - fix the errors above before ingesting");
        }
    }

    if !report.passed() {
        return Err(CometError::ValidationFailed(report.errors.len()));
    }
    Ok(())
}

/// Generate metafield mutations from a campaign pack.
pub fn ingest(slug: &str, packs_dir: &Path) -> Result<(), CometError> {
    let pack_dir = packs_dir.join(slug);
    let report = comet::ingest_pack(&pack_dir, slug)?;

    #[allow(clippy::print_stdout)]
    {
        println!("Ingested campaign: {}", report.campaign_name);
        println!("{}", "=".repeat(60));

        println!("Products ({}):", report.mutations.product_mutations.len());
        for product in &report.mutations.product_mutations {
            println!(
                "  - {}: selling_points ({}), badges ({})",
                product.handle,
                value_count(&product.mutations, "selling_points"),
                value_count(&product.mutations, "badges")
            );
        }

        println!("Collections ({}):", report.mutations.collection_mutations.len());
        for collection in &report.mutations.collection_mutations {
            let hero = collection
                .mutations
                .iter()
                .find_map(|m| m.file.as_deref())
                .unwrap_or("none");
            println!("  - {}: hero_image ({hero})", collection.handle);
        }

        match &report.announcement_bar {
            Some(text) => println!("Announcement bar: {text}"),
            None => println!("Announcement bar: (not set)"),
        }

        println!(
            "{} mutation(s) written to {}",
            report.mutations.summary.total_mutations,
            report.output_path.display()
        );
    }

    info!(
        "Campaign '{}' ingested: {} products, {} collections",
        report.campaign_name,
        report.mutations.summary.products,
        report.mutations.summary.collections
    );
    Ok(())
}

fn value_count(mutations: &[MetafieldMutation], kind: &str) -> usize {
    mutations
        .iter()
        .find(|m| m.kind == kind)
        .and_then(|m| m.values.as_ref())
        .map_or(0, Vec::len)
}
