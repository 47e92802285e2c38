//! Integration tests for the Shelzy's Designs storefront toolkit.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shelzys-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `theme_snippet_wiring` - Snippet injection and ejection against a
//!   realistic theme layout
//! - `comet_pipeline` - Campaign pack validation and ingestion end to end
//! - `affiliate_links` - Amazon link auditing and rewriting over blog HTML
//! - `admin_payloads` - Admin REST response parsing against 2024-01 fixtures
//!
//! All tests run offline against fixtures. Nothing here talks to a live
//! store, so no credentials are required.
