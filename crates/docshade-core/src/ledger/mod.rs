//! Persistent document ledger
//!
//! Bounded, expiring, most-recent-first list of completed downloads stored as a
//! JSON array under the `documents` key.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::sync::Arc;

use chrono::Utc;

use crate::constants::{LEDGER_CAPACITY, LEDGER_KEY};
use crate::error::ClientResult;
use crate::models::DocumentRecord;

#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn KeyValueStore>,
}

impl Ledger {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load valid records, pruning expired ones from storage.
    pub fn load(&self) -> Vec<DocumentRecord> {
        self.load_at(Utc::now().timestamp_millis())
    }

    /// Load with an explicit clock reading (epoch millis).
    ///
    /// Absent or corrupt data yields an empty list. The filtered list is
    /// written back immediately, so a corrupt value is replaced by `[]`.
    pub fn load_at(&self, now_ms: i64) -> Vec<DocumentRecord> {
        let stored = self.read();
        let total = stored.len();

        let mut valid: Vec<DocumentRecord> = stored
            .into_iter()
            .filter(|doc| !doc.is_expired(now_ms))
            .collect();
        valid.truncate(LEDGER_CAPACITY);

        if valid.len() != total {
            tracing::debug!(
                purged = total - valid.len(),
                remaining = valid.len(),
                "Pruned expired ledger entries"
            );
        }

        if let Err(e) = self.write(&valid) {
            tracing::warn!(error = %e, "Failed to persist pruned ledger");
        }

        valid
    }

    /// Prepend `entry`, keep the most recent `LEDGER_CAPACITY`, persist.
    pub fn record(&self, entry: DocumentRecord) -> ClientResult<Vec<DocumentRecord>> {
        let mut documents = self.read();
        documents.insert(0, entry);
        documents.truncate(LEDGER_CAPACITY);
        self.write(&documents)?;

        tracing::info!(
            name = %documents[0].name,
            entries = documents.len(),
            "Recorded document in ledger"
        );
        Ok(documents)
    }

    fn read(&self) -> Vec<DocumentRecord> {
        let raw = match self.store.get(LEDGER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read ledger, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<DocumentRecord>>(&raw) {
            Ok(documents) => documents,
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt ledger data, treating as empty");
                Vec::new()
            }
        }
    }

    fn write(&self, documents: &[DocumentRecord]) -> ClientResult<()> {
        let raw = serde_json::to_string(documents)?;
        self.store.set(LEDGER_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn ledger() -> (Ledger, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (Ledger::new(store.clone()), store)
    }

    fn stored(store: &MemoryStore) -> Vec<DocumentRecord> {
        serde_json::from_str(&store.get(LEDGER_KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_load_empty_when_absent() {
        let (ledger, _) = ledger();
        assert!(ledger.load_at(NOW).is_empty());
    }

    #[test]
    fn test_load_purges_expired_and_persists() {
        let (ledger, store) = ledger();
        let fresh = DocumentRecord {
            name: "fresh.pdf".into(),
            url: "/minio/fresh.pdf".into(),
            expiry: NOW + 1,
        };
        let stale = DocumentRecord {
            name: "stale.pdf".into(),
            url: "/minio/stale.pdf".into(),
            expiry: NOW,
        };
        store
            .set(LEDGER_KEY, &serde_json::to_string(&[fresh.clone(), stale]).unwrap())
            .unwrap();

        let loaded = ledger.load_at(NOW);
        assert_eq!(loaded, vec![fresh.clone()]);
        assert!(loaded.iter().all(|d| d.expiry > NOW));
        assert_eq!(stored(&store), vec![fresh]);
    }

    #[test]
    fn test_corrupt_data_is_treated_as_empty_and_repaired() {
        let (ledger, store) = ledger();
        store.set(LEDGER_KEY, "{not json").unwrap();

        assert!(ledger.load_at(NOW).is_empty());
        assert_eq!(store.get(LEDGER_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_record_prepends() {
        let (ledger, store) = ledger();
        ledger.record(DocumentRecord::new("a.pdf", "/a", NOW)).unwrap();
        ledger.record(DocumentRecord::new("b.pdf", "/b", NOW)).unwrap();

        let names: Vec<String> = stored(&store).into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["b.pdf", "a.pdf"]);
    }

    #[test]
    fn test_record_caps_at_ten_most_recent_first() {
        let (ledger, store) = ledger();
        for i in 0..11 {
            let documents = ledger
                .record(DocumentRecord::new(format!("{}.pdf", i), format!("/{}", i), NOW))
                .unwrap();
            assert!(documents.len() <= LEDGER_CAPACITY);
        }

        let persisted = stored(&store);
        assert_eq!(persisted.len(), LEDGER_CAPACITY);
        assert_eq!(persisted[0].name, "10.pdf");
        assert_eq!(persisted[9].name, "1.pdf");
        assert!(!persisted.iter().any(|d| d.name == "0.pdf"));
    }

    #[test]
    fn test_record_over_corrupt_data_starts_fresh() {
        let (ledger, store) = ledger();
        store.set(LEDGER_KEY, "42").unwrap();
        let documents = ledger.record(DocumentRecord::new("a.pdf", "/a", NOW)).unwrap();
        assert_eq!(documents.len(), 1);
    }

    #[test]
    fn test_order_is_insertion_not_expiry() {
        let (ledger, _) = ledger();
        ledger.record(DocumentRecord::new("late.pdf", "/l", NOW + 5_000)).unwrap();
        ledger.record(DocumentRecord::new("early.pdf", "/e", NOW)).unwrap();

        let loaded = ledger.load_at(NOW);
        assert_eq!(loaded[0].name, "early.pdf");
        assert_eq!(loaded[1].name, "late.pdf");
    }
}
