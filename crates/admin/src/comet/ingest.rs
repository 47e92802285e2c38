//! Campaign pack ingestion: turn pack CSVs into Admin API metafield
//! mutations with placeholder IDs.
//!
//! The generated mutations reference products, collections, and media by
//! `*_ID_FOR_{handle}` placeholders. Resolving those against the live
//! store and executing the mutations stays a reviewed, manual step;
//! this module only prepares the batch.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shelzys_core::{CsvTable, handle};
use tracing::{info, instrument};

use super::{CometError, METAFIELD_NAMESPACE};

/// Output artifact file name, written into the pack directory.
const OUTPUT_FILE: &str = "generated-mutations.json";

/// One metafield mutation, ready for review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetafieldMutation {
    /// Metafield key this mutation sets.
    #[serde(rename = "type")]
    pub kind: String,
    /// GraphQL mutation text with placeholder IDs.
    pub query: String,
    /// Parsed list values (selling points, badges).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Referenced media file (hero images).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

/// All mutations for one product or collection handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandleMutations {
    /// Normalized handle.
    pub handle: String,
    /// Mutations to run for this handle.
    pub mutations: Vec<MetafieldMutation>,
}

/// Campaign identity echoed into the artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignInfo {
    /// Campaign slug.
    pub slug: String,
    /// Human-readable campaign name.
    pub name: String,
    /// When the artifact was generated (ISO 8601).
    pub generated_at: String,
}

/// Shop-level mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopMutations {
    /// Announcement bar metafield mutation.
    pub announcement_bar: String,
}

/// Mutation counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestSummary {
    /// Product rows ingested.
    pub products: usize,
    /// Collection rows ingested.
    pub collections: usize,
    /// Total mutations generated (2 per product, 1 per collection,
    /// 1 announcement bar).
    pub total_mutations: usize,
}

/// The full `generated-mutations.json` artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMutations {
    /// Campaign identity.
    pub campaign: CampaignInfo,
    /// Shop-level mutations.
    pub shop_mutations: ShopMutations,
    /// Per-product mutations.
    pub product_mutations: Vec<HandleMutations>,
    /// Per-collection mutations.
    pub collection_mutations: Vec<HandleMutations>,
    /// Counts.
    pub summary: IngestSummary,
}

/// What [`ingest_pack`] produced.
#[derive(Debug, Clone)]
pub struct IngestReport {
    /// Where the artifact was written.
    pub output_path: PathBuf,
    /// Campaign name from campaign.json.
    pub campaign_name: String,
    /// Announcement bar text, when it is a plain string.
    pub announcement_bar: Option<String>,
    /// The generated artifact.
    pub mutations: GeneratedMutations,
}

/// Ingest a campaign pack: parse its CSVs, generate metafield mutations,
/// and write `generated-mutations.json` into the pack directory.
///
/// # Errors
///
/// Returns an error if the pack or its campaign.json is missing, a file
/// cannot be read or written, or campaign.json is invalid JSON.
#[instrument]
pub fn ingest_pack(pack_dir: &Path, slug: &str) -> Result<IngestReport, CometError> {
    if !pack_dir.is_dir() {
        return Err(CometError::PackNotFound(pack_dir.display().to_string()));
    }

    let campaign_path = pack_dir.join("campaign.json");
    if !campaign_path.is_file() {
        return Err(CometError::MissingCampaignFile(
            pack_dir.display().to_string(),
        ));
    }
    let campaign: Value = serde_json::from_str(&fs::read_to_string(&campaign_path)?)?;
    let campaign_name = campaign
        .get("campaign_name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let products = read_csv(&pack_dir.join("products.csv"))?;
    let collections = read_csv(&pack_dir.join("collections.csv"))?;

    let product_mutations: Vec<HandleMutations> = products
        .as_ref()
        .map(|table| table.records().map(build_product_mutations).collect())
        .unwrap_or_default();
    let collection_mutations: Vec<HandleMutations> = collections
        .as_ref()
        .map(|table| table.records().map(build_collection_mutations).collect())
        .unwrap_or_default();

    let announcement = campaign
        .get("announcement_bar")
        .cloned()
        .unwrap_or(Value::Null);

    let product_count = product_mutations.len();
    let collection_count = collection_mutations.len();
    let output = GeneratedMutations {
        campaign: CampaignInfo {
            slug: slug.to_string(),
            name: campaign_name.clone(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        },
        shop_mutations: ShopMutations {
            announcement_bar: announcement_mutation(&announcement)?,
        },
        product_mutations,
        collection_mutations,
        summary: IngestSummary {
            products: product_count,
            collections: collection_count,
            total_mutations: product_count * 2 + collection_count + 1,
        },
    };

    let output_path = pack_dir.join(OUTPUT_FILE);
    fs::write(&output_path, serde_json::to_string_pretty(&output)?)?;
    info!(
        "Generated {} mutations into {}",
        output.summary.total_mutations,
        output_path.display()
    );

    Ok(IngestReport {
        output_path,
        campaign_name,
        announcement_bar: announcement.as_str().map(str::to_string),
        mutations: output,
    })
}

fn read_csv(path: &Path) -> Result<Option<CsvTable>, CometError> {
    if !path.is_file() {
        return Ok(None);
    }
    Ok(Some(CsvTable::parse(&fs::read_to_string(path)?)))
}

/// Split a delimited cell, dropping the whole list when the cell is empty.
fn split_list(cell: &str, separator: char) -> Vec<String> {
    if cell.is_empty() {
        return Vec::new();
    }
    cell.split(separator)
        .map(|part| part.trim().to_string())
        .collect()
}

fn build_product_mutations(record: shelzys_core::csv::Record<'_>) -> HandleMutations {
    let normalized = handle::normalize(record.get("Handle"));
    let selling_points = split_list(record.get("selling_points"), '|');
    let badges = split_list(record.get("badges"), ',');

    HandleMutations {
        mutations: vec![
            MetafieldMutation {
                kind: "selling_points".to_string(),
                query: product_metafield_query(
                    "SetProductSellingPoints",
                    &normalized,
                    "selling_points",
                    &selling_points,
                ),
                values: Some(selling_points),
                file: None,
            },
            MetafieldMutation {
                kind: "badges".to_string(),
                query: product_metafield_query("SetProductBadges", &normalized, "badges", &badges),
                values: Some(badges),
                file: None,
            },
        ],
        handle: normalized,
    }
}

fn build_collection_mutations(record: shelzys_core::csv::Record<'_>) -> HandleMutations {
    let normalized = handle::normalize(record.get("Handle"));
    let hero_image = record.get("hero_image").to_string();

    HandleMutations {
        mutations: vec![MetafieldMutation {
            kind: "hero_image".to_string(),
            query: collection_hero_query(&normalized, &hero_image),
            values: None,
            file: Some(hero_image),
        }],
        handle: normalized,
    }
}

/// List values are JSON-encoded twice: the metafield value is itself a
/// JSON array serialized into a GraphQL string literal.
fn double_encode(values: &[String]) -> String {
    let inner = serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string());
    serde_json::to_string(&inner).unwrap_or_else(|_| "\"[]\"".to_string())
}

fn product_metafield_query(
    mutation_name: &str,
    normalized: &str,
    key: &str,
    values: &[String],
) -> String {
    let value = double_encode(values);
    format!(
        r#"
mutation {mutation_name} {{
  productUpdate(input: {{
    id: "gid://shopify/Product/PRODUCT_ID_FOR_{normalized}"
    metafields: [{{
      namespace: "{METAFIELD_NAMESPACE}"
      key: "{key}"
      type: "list.single_line_text_field"
      value: {value}
    }}]
  }}) {{
    product {{ id title }}
    userErrors {{ field message }}
  }}
}}"#
    )
}

fn collection_hero_query(normalized: &str, hero_image: &str) -> String {
    format!(
        r#"
mutation SetCollectionHeroImage {{
  collectionUpdate(input: {{
    id: "gid://shopify/Collection/COLLECTION_ID_FOR_{normalized}"
    metafields: [{{
      namespace: "{METAFIELD_NAMESPACE}"
      key: "hero_image"
      type: "file_reference"
      value: "gid://shopify/MediaImage/MEDIA_ID_FOR_{hero_image}"
    }}]
  }}) {{
    collection {{ id title }}
    userErrors {{ field message }}
  }}
}}"#
    )
}

fn announcement_mutation(announcement: &Value) -> Result<String, CometError> {
    let value = serde_json::to_string(announcement)?;
    Ok(format!(
        r#"
mutation SetAnnouncementBar {{
  metafieldsSet(metafields: [{{
    namespace: "{METAFIELD_NAMESPACE}"
    key: "announcement_bar"
    ownerId: "gid://shopify/Shop/SHOP_ID"
    type: "single_line_text_field"
    value: {value}
  }}]) {{
    metafields {{ id key value }}
    userErrors {{ field message }}
  }}
}}"#
    ))
}
