//! Shelzy's Designs admin library.
//!
//! Shopify Admin API client plus the operation services the CLI drives:
//! theme snippet management, page upserts, redirect syncing, product
//! updates, blog link repair, and Comet campaign pack processing.
//!
//! # Security
//!
//! This crate authenticates with the HIGH PRIVILEGE Admin API token.
//! The token is read from the environment only; never commit it. If a
//! token leaks, rotate it in the Shopify admin immediately.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod comet;
pub mod config;
pub mod shopify;

pub use config::{Config, ConfigError};
pub use shopify::AdminClient;
