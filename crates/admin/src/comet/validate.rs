//! Campaign pack validation.
//!
//! Structural problems (missing files, bad JSON, missing headers) are
//! errors; cosmetic or recoverable issues (empty media directory, odd
//! handles, missing hero copy) are warnings. A pack with warnings still
//! deploys; a pack with errors must not.

use std::fs;
use std::path::Path;

use serde_json::Value;
use shelzys_core::handle;
use tracing::instrument;

use super::CometError;

/// Files every pack must contain.
const REQUIRED_FILES: &[&str] = &[
    "campaign.json",
    "homepage.json",
    "products.csv",
    "collections.csv",
];

const PRODUCT_HEADERS: &[&str] = &["Handle", "Title", "selling_points", "badges"];
const COLLECTION_HEADERS: &[&str] = &["Handle", "Title", "hero_image"];

/// Result of validating one campaign pack.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Problems that block deployment.
    pub errors: Vec<String>,
    /// Problems worth fixing that do not block deployment.
    pub warnings: Vec<String>,
    /// Number of product rows found.
    pub products: usize,
    /// Number of collection rows found.
    pub collections: usize,
    /// Number of files in `media/` (dotfiles excluded).
    pub media_files: usize,
}

impl ValidationReport {
    /// Whether the pack can be deployed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the pack is fully clean.
    #[must_use]
    pub fn clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Mirrors loose truthiness: null, false, 0, and "" all count as missing.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn field_missing(object: &Value, field: &str) -> bool {
    object.get(field).is_none_or(is_falsy)
}

/// Validate a campaign pack directory.
///
/// # Errors
///
/// Returns `CometError::PackNotFound` if the directory itself is missing.
/// Everything else lands in the report.
#[instrument]
pub fn validate_pack(pack_dir: &Path) -> Result<ValidationReport, CometError> {
    if !pack_dir.is_dir() {
        return Err(CometError::PackNotFound(pack_dir.display().to_string()));
    }

    let mut report = ValidationReport::default();

    for file in REQUIRED_FILES {
        if !pack_dir.join(file).is_file() {
            report.errors.push(format!("Missing required file: {file}"));
        }
    }

    let media_files = check_media(pack_dir, &mut report);
    let campaign = check_campaign(pack_dir, &mut report)?;
    check_homepage(pack_dir, &mut report)?;
    check_products_csv(pack_dir, &mut report)?;
    check_collections_csv(pack_dir, &mut report)?;

    // Cross-check: the hero image must exist in media/ (placeholders exempt)
    if let (Some(campaign), Some(media_files)) = (campaign, media_files)
        && let Some(src) = campaign
            .get("hero")
            .and_then(|h| h.get("media"))
            .and_then(|m| m.get("src"))
            .and_then(Value::as_str)
    {
        let hero_file = src.to_lowercase();
        if !media_files.contains(&hero_file) && !hero_file.contains("placeholder") {
            report
                .warnings
                .push(format!("Hero image not found in media/: {src}"));
        }
    }

    Ok(report)
}

/// Returns the lowercased media file names, or `None` if media/ is missing.
fn check_media(pack_dir: &Path, report: &mut ValidationReport) -> Option<Vec<String>> {
    let media_dir = pack_dir.join("media");
    if !media_dir.is_dir() {
        report
            .warnings
            .push("media/ directory does not exist".to_string());
        return None;
    }

    let files: Vec<String> = fs::read_dir(&media_dir)
        .ok()?
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .map(|name| name.to_lowercase())
        .collect();

    report.media_files = files.len();
    if files.is_empty() {
        report
            .warnings
            .push("Media directory is empty - images need to be added".to_string());
    }
    Some(files)
}

/// Returns the parsed campaign.json, or `None` if missing or invalid.
fn check_campaign(
    pack_dir: &Path,
    report: &mut ValidationReport,
) -> Result<Option<Value>, CometError> {
    let path = pack_dir.join("campaign.json");
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path)?;
    let campaign: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            report
                .errors
                .push(format!("campaign.json is not valid JSON: {e}"));
            return Ok(None);
        }
    };

    for field in ["campaign_slug", "campaign_name", "hero", "announcement_bar"] {
        if field_missing(&campaign, field) {
            report
                .errors
                .push(format!("campaign.json missing required field: {field}"));
        }
    }

    if let Some(hero) = campaign.get("hero").filter(|h| !is_falsy(h)) {
        if field_missing(hero, "heading") {
            report.warnings.push("Hero section missing heading".to_string());
        }
        if field_missing(hero, "primary_cta") {
            report
                .warnings
                .push("Hero section missing primary CTA".to_string());
        }
    }

    Ok(Some(campaign))
}

fn check_homepage(pack_dir: &Path, report: &mut ValidationReport) -> Result<(), CometError> {
    let path = pack_dir.join("homepage.json");
    if !path.is_file() {
        return Ok(());
    }

    let content = fs::read_to_string(&path)?;
    let homepage: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            report
                .errors
                .push(format!("homepage.json is not valid JSON: {e}"));
            return Ok(());
        }
    };

    if !homepage.get("sections_order").is_some_and(Value::is_array) {
        report
            .errors
            .push("homepage.json missing sections_order array".to_string());
    }
    if field_missing(&homepage, "sections") {
        report
            .errors
            .push("homepage.json missing sections object".to_string());
    }

    Ok(())
}

fn check_products_csv(pack_dir: &Path, report: &mut ValidationReport) -> Result<(), CometError> {
    let path = pack_dir.join("products.csv");
    if !path.is_file() {
        return Ok(());
    }

    let content = fs::read_to_string(&path)?;
    let lines: Vec<&str> = content.trim().split('\n').collect();
    check_headers(&lines, PRODUCT_HEADERS, "products.csv", report);
    report.products = lines.len().saturating_sub(1);

    // Handle format check reads the raw first column, as the deploy
    // pipeline does
    for (i, line) in lines.iter().skip(1).enumerate() {
        let raw_handle = line.split(',').next().unwrap_or("");
        if !raw_handle.is_empty() && !handle::is_normalized(&raw_handle.to_lowercase()) {
            report.warnings.push(format!(
                "Product {} has non-standard handle: {raw_handle}",
                i + 1
            ));
        }
    }

    Ok(())
}

fn check_collections_csv(pack_dir: &Path, report: &mut ValidationReport) -> Result<(), CometError> {
    let path = pack_dir.join("collections.csv");
    if !path.is_file() {
        return Ok(());
    }

    let content = fs::read_to_string(&path)?;
    let lines: Vec<&str> = content.trim().split('\n').collect();
    check_headers(&lines, COLLECTION_HEADERS, "collections.csv", report);
    report.collections = lines.len().saturating_sub(1);

    Ok(())
}

fn check_headers(lines: &[&str], required: &[&str], file: &str, report: &mut ValidationReport) {
    let headers: Vec<&str> = lines
        .first()
        .map(|line| line.split(',').map(str::trim).collect())
        .unwrap_or_default();

    for header in required {
        if !headers.contains(header) {
            report
                .errors
                .push(format!("{file} missing required header: {header}"));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_valid_pack(dir: &Path) {
        fs::write(
            dir.join("campaign.json"),
            r#"{
                "campaign_slug": "spring-2025",
                "campaign_name": "Spring 2025",
                "hero": {
                    "heading": "Fresh for Spring",
                    "primary_cta": {"label": "Shop now", "url": "/collections/spring"},
                    "media": {"src": "spring-hero.jpg"}
                },
                "announcement_bar": "Free shipping over $35"
            }"#,
        )
        .unwrap();
        fs::write(
            dir.join("homepage.json"),
            r#"{"sections_order": ["hero", "featured"], "sections": {"hero": {}}}"#,
        )
        .unwrap();
        fs::write(
            dir.join("products.csv"),
            "Handle,Title,selling_points,badges\nspring-tumbler,Spring Tumbler,Vinyl|Dishwasher safe,New\n",
        )
        .unwrap();
        fs::write(
            dir.join("collections.csv"),
            "Handle,Title,hero_image\nspring,Spring,spring-hero.jpg\n",
        )
        .unwrap();
        fs::create_dir(dir.join("media")).unwrap();
        fs::write(dir.join("media").join("spring-hero.jpg"), [0u8; 4]).unwrap();
    }

    #[test]
    fn test_missing_pack_dir() {
        let tmp = TempDir::new().unwrap();
        let result = validate_pack(&tmp.path().join("nope"));
        assert!(matches!(result, Err(CometError::PackNotFound(_))));
    }

    #[test]
    fn test_valid_pack_is_clean() {
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());

        let report = validate_pack(tmp.path()).unwrap();
        assert!(report.passed(), "errors: {:?}", report.errors);
        assert!(report.clean(), "warnings: {:?}", report.warnings);
        assert_eq!(report.products, 1);
        assert_eq!(report.collections, 1);
        assert_eq!(report.media_files, 1);
    }

    #[test]
    fn test_missing_files_are_errors() {
        let tmp = TempDir::new().unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(!report.passed());
        assert!(report
            .errors
            .contains(&"Missing required file: campaign.json".to_string()));
        assert!(report
            .errors
            .contains(&"Missing required file: collections.csv".to_string()));
    }

    #[test]
    fn test_invalid_campaign_json() {
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());
        fs::write(tmp.path().join("campaign.json"), "{not json").unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(report
            .errors
            .iter()
            .any(|e| e.starts_with("campaign.json is not valid JSON")));
    }

    #[test]
    fn test_empty_required_field_is_error() {
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());
        fs::write(
            tmp.path().join("campaign.json"),
            r#"{"campaign_slug": "", "campaign_name": "X", "hero": {"heading": "H", "primary_cta": "Shop"}, "announcement_bar": "Y"}"#,
        )
        .unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(report
            .errors
            .contains(&"campaign.json missing required field: campaign_slug".to_string()));
    }

    #[test]
    fn test_hero_warnings() {
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());
        fs::write(
            tmp.path().join("campaign.json"),
            r#"{"campaign_slug": "x", "campaign_name": "X", "hero": {"media": {"src": "spring-hero.jpg"}}, "announcement_bar": "Y"}"#,
        )
        .unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(report.passed());
        assert!(report
            .warnings
            .contains(&"Hero section missing heading".to_string()));
        assert!(report
            .warnings
            .contains(&"Hero section missing primary CTA".to_string()));
    }

    #[test]
    fn test_missing_csv_header_is_error() {
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());
        fs::write(
            tmp.path().join("products.csv"),
            "Handle,Title\nspring-tumbler,Spring Tumbler\n",
        )
        .unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(report
            .errors
            .contains(&"products.csv missing required header: selling_points".to_string()));
        assert!(report
            .errors
            .contains(&"products.csv missing required header: badges".to_string()));
    }

    #[test]
    fn test_non_standard_handle_is_warning() {
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());
        fs::write(
            tmp.path().join("products.csv"),
            "Handle,Title,selling_points,badges\nMy Product!,Spring Tumbler,Vinyl,New\n",
        )
        .unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(report.passed());
        assert!(report
            .warnings
            .contains(&"Product 1 has non-standard handle: My Product!".to_string()));
    }

    #[test]
    fn test_uppercase_handle_is_accepted() {
        // Handles are lowercased before the format check
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());
        fs::write(
            tmp.path().join("products.csv"),
            "Handle,Title,selling_points,badges\nSpring-Tumbler,Spring Tumbler,Vinyl,New\n",
        )
        .unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(report.clean(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn test_empty_media_dir_is_warning() {
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());
        fs::remove_file(tmp.path().join("media").join("spring-hero.jpg")).unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(report
            .warnings
            .contains(&"Media directory is empty - images need to be added".to_string()));
    }

    #[test]
    fn test_missing_hero_image_is_warning() {
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());
        fs::remove_file(tmp.path().join("media").join("spring-hero.jpg")).unwrap();
        fs::write(tmp.path().join("media").join("other.jpg"), [0u8; 4]).unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(report
            .warnings
            .contains(&"Hero image not found in media/: spring-hero.jpg".to_string()));
    }

    #[test]
    fn test_placeholder_hero_image_is_exempt() {
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());
        fs::write(
            tmp.path().join("campaign.json"),
            r#"{
                "campaign_slug": "x", "campaign_name": "X",
                "hero": {"heading": "H", "primary_cta": "Shop", "media": {"src": "PLACEHOLDER-hero.jpg"}},
                "announcement_bar": "Y"
            }"#,
        )
        .unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(!report
            .warnings
            .iter()
            .any(|w| w.starts_with("Hero image not found")));
    }

    #[test]
    fn test_homepage_missing_sections_order() {
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());
        fs::write(tmp.path().join("homepage.json"), r#"{"sections_order": "hero"}"#).unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(report
            .errors
            .contains(&"homepage.json missing sections_order array".to_string()));
        assert!(report
            .errors
            .contains(&"homepage.json missing sections object".to_string()));
    }

    #[test]
    fn test_homepage_empty_sections_object_is_fine() {
        let tmp = TempDir::new().unwrap();
        write_valid_pack(tmp.path());
        fs::write(
            tmp.path().join("homepage.json"),
            r#"{"sections_order": [], "sections": {}}"#,
        )
        .unwrap();

        let report = validate_pack(tmp.path()).unwrap();
        assert!(report.passed(), "errors: {:?}", report.errors);
    }
}
