//! Result accumulation
//!
//! Completed analyses accumulate in a [`DetectionStore`]: an ordered,
//! append-only collection keyed by (target id, sector), most recent first.
//! There is no dedup policy — re-analyzing a target adds a second entry and
//! `get` resolves to the newest one — and no removal path; records live for
//! the session.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use exosift_domain::{DetectionRecord, DetectionStatus};

use crate::error::{CoreError, Result};

/// Aggregate counts over the accumulated records, by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSummary {
    pub exoplanets: usize,
    pub candidates: usize,
    pub false_positives: usize,
    pub total: usize,
}

impl DetectionSummary {
    /// Tally a set of records.
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a DetectionRecord>) -> Self {
        let mut summary = DetectionSummary::default();
        for record in records {
            match record.status {
                DetectionStatus::Exoplanet => summary.exoplanets += 1,
                DetectionStatus::Candidate => summary.candidates += 1,
                DetectionStatus::FalsePositive => summary.false_positives += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// Ordered accumulator of detection records.
///
/// Guarantees:
/// - `insert` prepends: `list()` returns records most-recent-first.
/// - Duplicate keys accumulate; `get` resolves to the newest entry.
/// - Inserts are serialized, so insertion order is deterministic even with
///   concurrent writers.
#[async_trait]
pub trait DetectionStore: Send + Sync {
    /// Prepend a completed analysis.
    async fn insert(&self, record: DetectionRecord) -> Result<()>;

    /// Most recent record for a key, or `CoreError::NotFound`.
    async fn get(&self, target_id: &str, sector: u32) -> Result<DetectionRecord>;

    /// All records, most-recent-first.
    async fn list(&self) -> Result<Vec<DetectionRecord>>;

    /// Status counts over all records.
    async fn summary(&self) -> Result<DetectionSummary>;

    /// Number of accumulated records.
    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

/// In-memory store backed by a `Mutex<Vec<DetectionRecord>>`.
#[derive(Debug, Default)]
pub struct MemoryDetectionStore {
    records: Mutex<Vec<DetectionRecord>>,
}

impl MemoryDetectionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DetectionStore for MemoryDetectionStore {
    async fn insert(&self, record: DetectionRecord) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        records.insert(0, record);
        Ok(())
    }

    async fn get(&self, target_id: &str, sector: u32) -> Result<DetectionRecord> {
        let records = self.records.lock().unwrap();
        records
            .iter()
            .find(|r| r.target_id == target_id && r.sector == sector)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                target_id: target_id.to_string(),
                sector,
            })
    }

    async fn list(&self) -> Result<Vec<DetectionRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records.clone())
    }

    async fn summary(&self) -> Result<DetectionSummary> {
        let records = self.records.lock().unwrap();
        Ok(DetectionSummary::tally(records.iter()))
    }

    async fn len(&self) -> Result<usize> {
        let records = self.records.lock().unwrap();
        Ok(records.len())
    }
}
