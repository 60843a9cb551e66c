use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DOCUMENT_TTL;

/// A completed download kept in the ledger.
///
/// Serialized as `{name, url, expiry}` with `expiry` in epoch milliseconds,
/// which is the layout stored under the `documents` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub name: String,
    pub url: String,
    pub expiry: i64,
}

impl DocumentRecord {
    /// Create a record expiring `DOCUMENT_TTL` after `created_at_ms`.
    pub fn new(name: impl Into<String>, url: impl Into<String>, created_at_ms: i64) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            expiry: created_at_ms + DOCUMENT_TTL.as_millis() as i64,
        }
    }

    /// A record is valid strictly before its expiry instant.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expiry <= now_ms
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.expiry).single()
    }
}
