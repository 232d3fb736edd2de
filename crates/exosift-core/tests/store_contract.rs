//! Behavioral contract tests for the detection store.
//!
//! Any conforming `DetectionStore` implementation must pass these; they
//! run against the in-memory store.

use std::sync::Arc;

use exosift_core::{
    CoreError, DetectionGenerator, DetectionStore, GeneratorConfig, MemoryDetectionStore,
};
use exosift_domain::DetectionRecord;

async fn record(seed: u64, target: &str, sector: u32) -> DetectionRecord {
    DetectionGenerator::with_seed(GeneratorConfig::instant(), seed)
        .generate(target, sector, None)
        .await
        .unwrap()
}

// ===========================================================================
// Ordering and lookup
// ===========================================================================

#[tokio::test]
async fn list_is_most_recent_first() {
    let store = MemoryDetectionStore::new();
    let first = record(1, "TIC 100", 1).await;
    let second = record(2, "TIC 200", 1).await;

    store.insert(first.clone()).await.unwrap();
    store.insert(second.clone()).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn get_returns_record_for_key() {
    let store = MemoryDetectionStore::new();
    let rec = record(3, "TIC 300", 7).await;
    store.insert(rec.clone()).await.unwrap();

    let found = store.get("TIC 300", 7).await.unwrap();
    assert_eq!(found.id, rec.id);
}

#[tokio::test]
async fn get_unknown_key_is_not_found() {
    let store = MemoryDetectionStore::new();
    let err = store.get("TIC 404", 1).await.unwrap_err();
    assert!(matches!(
        err,
        CoreError::NotFound { target_id, sector: 1 } if target_id == "TIC 404"
    ));
}

#[tokio::test]
async fn duplicate_keys_accumulate_and_get_resolves_newest() {
    let store = MemoryDetectionStore::new();
    let older = record(4, "TIC 500", 2).await;
    let newer = record(5, "TIC 500", 2).await;

    store.insert(older.clone()).await.unwrap();
    store.insert(newer.clone()).await.unwrap();

    // Re-analysis appends rather than merging.
    assert_eq!(store.len().await.unwrap(), 2);
    let found = store.get("TIC 500", 2).await.unwrap();
    assert_eq!(found.id, newer.id);
}

#[tokio::test]
async fn same_target_different_sector_are_distinct_keys() {
    let store = MemoryDetectionStore::new();
    store.insert(record(6, "TIC 600", 1).await).await.unwrap();
    store.insert(record(7, "TIC 600", 2).await).await.unwrap();

    let sector_one = store.get("TIC 600", 1).await.unwrap();
    let sector_two = store.get("TIC 600", 2).await.unwrap();
    assert_eq!(sector_one.sector, 1);
    assert_eq!(sector_two.sector, 2);
    assert_ne!(sector_one.id, sector_two.id);
}

// ===========================================================================
// Aggregation and concurrency
// ===========================================================================

#[tokio::test]
async fn summary_totals_track_inserts() {
    let store = MemoryDetectionStore::new();
    for seed in 0..12 {
        store
            .insert(record(seed, &format!("TIC {}", seed), 1).await)
            .await
            .unwrap();
    }

    let summary = store.summary().await.unwrap();
    assert_eq!(summary.total, 12);
    assert_eq!(
        summary.exoplanets + summary.candidates + summary.false_positives,
        summary.total
    );
}

#[tokio::test]
async fn concurrent_inserts_all_land() {
    let store = Arc::new(MemoryDetectionStore::new());

    let mut handles = Vec::new();
    for seed in 0..16u64 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            let rec = record(seed, &format!("TIC {}", seed), 1).await;
            store.insert(rec).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.len().await.unwrap(), 16);
    // Every inserted key is retrievable.
    for seed in 0..16u64 {
        store.get(&format!("TIC {}", seed), 1).await.unwrap();
    }
}
