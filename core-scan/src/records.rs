//! Discovered Audio File Records

use bridge_traits::storage::EntryMetadata;
use serde::{Deserialize, Serialize};

/// Display name used when the source provides none.
pub const UNNAMED_FALLBACK: &str = "(unknown)";

/// One audio file discovered by a scan.
///
/// Immutable. Created only for entries classified as audio at scan time; a
/// scan result never contains two records with the same location token.
/// Ownership transfers to the caller with the delivered result batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFileRecord {
    /// Display name, never empty.
    pub name: String,
    /// Opaque token sufficient to reopen the file later through the same
    /// tree source.
    pub location_token: String,
    /// Size in bytes as reported by the source.
    pub size_bytes: u64,
}

impl AudioFileRecord {
    /// Build a record from an entry's resolved metadata.
    pub fn from_entry(location_token: impl Into<String>, metadata: &EntryMetadata) -> Self {
        let name = if metadata.name.is_empty() {
            UNNAMED_FALLBACK.to_string()
        } else {
            metadata.name.clone()
        };

        Self {
            name,
            location_token: location_token.into(),
            size_bytes: metadata.size_bytes,
        }
    }
}
