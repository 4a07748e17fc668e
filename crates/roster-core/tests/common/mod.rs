//! Test doubles and common utilities for contract tests
//!
//! Provides a call-counting store wrapper so tests can assert not just
//! outcomes but whether persistence was attempted at all.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use roster_core::error::Result;
use roster_core::record::NewRegistration;
use roster_core::store::MemoryRecordStore;
use roster_core::traits::{Conflict, RecordStore};
use roster_core::Registration;

/// A store double that tracks calls and delegates to a memory store
pub struct CountingStore {
    inner: MemoryRecordStore,
    append_calls: Arc<AtomicUsize>,
    conflict_calls: Arc<AtomicUsize>,
    next_id_calls: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryRecordStore::new(),
            append_calls: Arc::new(AtomicUsize::new(0)),
            conflict_calls: Arc::new(AtomicUsize::new(0)),
            next_id_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times append() was called
    pub fn append_call_count(&self) -> usize {
        self.append_calls.load(Ordering::SeqCst)
    }

    /// Get the number of times find_conflict() was called
    pub fn conflict_call_count(&self) -> usize {
        self.conflict_calls.load(Ordering::SeqCst)
    }

    /// Get the number of times next_id() was called
    pub fn next_id_call_count(&self) -> usize {
        self.next_id_calls.load(Ordering::SeqCst)
    }

    /// Create a new CountingStore that shares rows and counters with an
    /// existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            inner: other.inner.clone(),
            append_calls: Arc::clone(&other.append_calls),
            conflict_calls: Arc::clone(&other.conflict_calls),
            next_id_calls: Arc::clone(&other.next_id_calls),
        }
    }
}

#[async_trait]
impl RecordStore for CountingStore {
    async fn ensure_initialized(&self) -> Result<()> {
        self.inner.ensure_initialized().await
    }

    async fn next_id(&self) -> Result<u64> {
        self.next_id_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.next_id().await
    }

    async fn find_conflict(&self, username: &str, email: &str) -> Result<Option<Conflict>> {
        self.conflict_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_conflict(username, email).await
    }

    async fn append(&self, record: &Registration) -> Result<()> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.append(record).await
    }

    async fn load_all(&self) -> Result<Vec<Registration>> {
        self.inner.load_all().await
    }
}

/// Helper to create a well-formed candidate for testing
pub fn candidate(username: &str, email: &str) -> NewRegistration {
    NewRegistration::new(username, "pw1", email, "Bob")
        .with_birthdate(NaiveDate::from_ymd_opt(1990, 3, 14).unwrap())
}
