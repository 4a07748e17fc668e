//! Contract Test: Append-Only Store
//!
//! Verifies the durable store behaves as an append-only ledger:
//! - A fresh store starts at identifier 1 and grows monotonically
//! - Rows survive reopening the file from a fresh store instance
//! - The CSV-backed and in-memory stores expose identical observable
//!   behavior through the RecordStore seam
//!
//! If this test fails, the two store implementations have drifted apart or
//! durability is broken.

mod common;

use common::*;
use chrono::NaiveDateTime;
use roster_core::record::TIMESTAMP_FORMAT;
use roster_core::store::{CsvRecordStore, MemoryRecordStore};
use roster_core::traits::{Conflict, RecordStore};
use roster_core::Registrar;
use tempfile::tempdir;

#[tokio::test]
async fn fresh_store_bob_scenario() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("users.csv");

    let registrar = Registrar::new(Box::new(CsvRecordStore::new(&path)));
    registrar.init().await.unwrap();

    let before = chrono::Local::now().naive_local() - chrono::Duration::seconds(1);
    let stored = registrar
        .register(candidate("bob", "bob@x.com"))
        .await
        .unwrap();
    let after = chrono::Local::now().naive_local() + chrono::Duration::seconds(1);

    assert_eq!(stored.id, 1);
    assert!(stored.registered_at >= before && stored.registered_at <= after);

    // A completely fresh instance over the same file sees the row.
    let reopened = Registrar::new(Box::new(CsvRecordStore::new(&path)));
    let rows = reopened.list().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username, "bob");
    assert_eq!(rows[0].password, "pw1");
    assert_eq!(rows[0].registered_at, stored.registered_at);
}

#[tokio::test]
async fn identifiers_survive_reopening() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("users.csv");

    {
        let registrar = Registrar::new(Box::new(CsvRecordStore::new(&path)));
        registrar.init().await.unwrap();
        for i in 1..=3 {
            registrar
                .register(candidate(&format!("user{i}"), &format!("u{i}@x.com")))
                .await
                .unwrap();
        }
    }

    // Fresh instance, no intervening append: next_id still reflects the file.
    let store = CsvRecordStore::new(&path);
    assert_eq!(store.next_id().await.unwrap(), 4);
    assert_eq!(store.next_id().await.unwrap(), 4);

    let ids: Vec<u64> = store.load_all().await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn csv_and_memory_stores_agree() {
    let dir = tempdir().unwrap();
    let csv_store = CsvRecordStore::new(dir.path().join("users.csv"));
    let mem_store = MemoryRecordStore::new();

    let stamp = NaiveDateTime::parse_from_str("2025-06-01 12:00:00", TIMESTAMP_FORMAT).unwrap();

    for store in [&csv_store as &dyn RecordStore, &mem_store as &dyn RecordStore] {
        store.ensure_initialized().await.unwrap();
        assert_eq!(store.next_id().await.unwrap(), 1);
        assert_eq!(store.find_conflict("bob", "bob@x.com").await.unwrap(), None);
    }

    // Same appends against both.
    let registrar_rows = [
        candidate("bob", "bob@x.com"),
        candidate("alice", "alice@x.com"),
    ];
    for (i, c) in registrar_rows.iter().enumerate() {
        let record = {
            // Promote via the registrar path to keep field handling identical.
            let registrar = Registrar::new(Box::new(MemoryRecordStore::new()));
            let mut r = registrar.register(c.clone()).await.unwrap();
            r.id = (i + 1) as u64;
            r.registered_at = stamp;
            r
        };
        csv_store.append(&record).await.unwrap();
        mem_store.append(&record).await.unwrap();
    }

    for store in [&csv_store as &dyn RecordStore, &mem_store as &dyn RecordStore] {
        assert_eq!(store.next_id().await.unwrap(), 3);
        assert_eq!(
            store.find_conflict("alice", "fresh@x.com").await.unwrap(),
            Some(Conflict::Username("alice".to_string()))
        );
        assert_eq!(
            store.find_conflict("fresh", "bob@x.com").await.unwrap(),
            Some(Conflict::Email("bob@x.com".to_string()))
        );
    }

    assert_eq!(
        csv_store.load_all().await.unwrap(),
        mem_store.load_all().await.unwrap()
    );
}
