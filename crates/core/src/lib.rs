//! Shelzy's Core - Pure text operations for storefront automation.
//!
//! This crate provides the text-level logic shared by the Shelzy's Designs
//! automation tools:
//! - `admin` - Shopify Admin API client and operation services
//! - `cli` - The `sz-cli` command-line tool
//!
//! # Architecture
//!
//! The core crate contains only string and data transforms - no I/O, no HTTP
//! clients. Everything here is deterministic and testable offline.
//!
//! # Modules
//!
//! - [`liquid`] - Idempotent render-tag injection into theme assets
//! - [`links`] - Amazon affiliate link rewriting for blog content
//! - [`similarity`] - Duplicate blog post title heuristics
//! - [`handle`] - Shopify handle normalization
//! - [`csv`] - Minimal quote-aware CSV parsing for campaign packs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod csv;
pub mod handle;
pub mod links;
pub mod liquid;
pub mod similarity;

pub use csv::CsvTable;
pub use liquid::{InjectOutcome, Placement};
