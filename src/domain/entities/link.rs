//! Link record entity as stored in the key-value link store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key prefix under which link records are stored.
pub const LINK_KEY_PREFIX: &str = "link:";

/// The resolved target of a slug.
///
/// Only `url` is interpreted by the redirect path. Every other field written
/// by the management side (comments, timestamps, titles, ...) is kept in
/// `metadata` and passed through to the access log untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl LinkRecord {
    /// Creates a record without metadata.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            metadata: Map::new(),
        }
    }

    /// Returns the store key for a slug, with the slug's casing kept as-is.
    pub fn storage_key(slug: &str) -> String {
        format!("{LINK_KEY_PREFIX}{slug}")
    }
}
