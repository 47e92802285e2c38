//! URL redirect types.

use serde::{Deserialize, Serialize};

/// A redirect to create: `path` is the old URL, `target` the new one.
///
/// Deserializes from the JSON input file passed to `redirect sync`:
/// `[{"path": "/collections/retired", "target": "/collections/all"}, ...]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectPair {
    /// Old path, relative to the store root (e.g. `/collections/retired`).
    pub path: String,
    /// Destination path or absolute URL.
    pub target: String,
}
