//! Comet campaign pack processing.
//!
//! A campaign pack is a directory under `ops/comet_packs/{slug}/` holding
//! everything a seasonal storefront push needs:
//!
//! - `campaign.json` - slug, name, hero section, announcement bar
//! - `homepage.json` - section ordering and settings
//! - `products.csv` - per-product selling points and badges
//! - `collections.csv` - per-collection hero images
//! - `media/` - images referenced by the above
//!
//! [`validate_pack`] checks a pack for structural problems before anything
//! touches the store. [`ingest_pack`] turns the CSVs into Admin API
//! metafield mutations with placeholder IDs, written to
//! `generated-mutations.json` inside the pack for review before execution.

mod ingest;
mod validate;

pub use ingest::{
    GeneratedMutations, HandleMutations, IngestReport, MetafieldMutation, ingest_pack,
};
pub use validate::{ValidationReport, validate_pack};

use thiserror::Error;

/// Default location of campaign packs, relative to the working directory.
pub const DEFAULT_PACKS_DIR: &str = "ops/comet_packs";

/// Metafield namespace for all campaign data.
pub const METAFIELD_NAMESPACE: &str = "shelzys";

/// Errors from campaign pack processing.
#[derive(Debug, Error)]
pub enum CometError {
    /// The pack directory does not exist.
    #[error("Campaign pack not found: {0}")]
    PackNotFound(String),

    /// The pack has no campaign.json.
    #[error("campaign.json not found in {0}")]
    MissingCampaignFile(String),

    /// Filesystem error reading or writing pack files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A pack file holds invalid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
