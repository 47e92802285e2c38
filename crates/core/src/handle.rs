//! Shopify handle normalization.
//!
//! Campaign CSVs are edited by hand, so handles arrive with stray case,
//! spaces, and punctuation. Shopify handles are lowercase alphanumerics
//! and dashes.

use std::sync::LazyLock;

use regex::Regex;

static INVALID_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("Invalid regex"));
static DASH_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("Invalid regex"));
static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("Invalid regex"));

/// Normalize a handle to Shopify form: lowercase, invalid characters
/// replaced by dashes, dash runs collapsed, leading/trailing dashes trimmed.
#[must_use]
pub fn normalize(handle: &str) -> String {
    let lowered = handle.to_lowercase();
    let dashed = INVALID_CHARS_RE.replace_all(&lowered, "-");
    let collapsed = DASH_RUN_RE.replace_all(&dashed, "-");
    collapsed.trim_matches('-').to_owned()
}

/// Whether the handle is already in normalized form.
#[must_use]
pub fn is_normalized(handle: &str) -> bool {
    HANDLE_RE.is_match(handle)
}
