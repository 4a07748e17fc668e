// # Memory Record Store
//
// In-memory implementation of RecordStore.
//
// ## Purpose
//
// Provides a simple store that doesn't persist across restarts. Useful for
// tests and for driving the registrar without touching the filesystem.
//
// ## Crash Behavior
//
// All rows are lost on restart; identifiers restart at 1.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::record::Registration;
use crate::traits::record_store::{Conflict, RecordStore};

/// In-memory record store implementation
///
/// Rows live in a `Vec` behind a `RwLock`, in append order, mirroring the
/// row order of the file-backed store.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    rows: Arc<RwLock<Vec<Registration>>>,
}

impl MemoryRecordStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows in the store
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Check if the store is empty
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn ensure_initialized(&self) -> Result<()> {
        // Nothing to create; the header exists only in the file format.
        Ok(())
    }

    async fn next_id(&self) -> Result<u64> {
        let rows = self.rows.read().await;
        Ok(rows.iter().map(|r| r.id).max().unwrap_or(0) + 1)
    }

    async fn find_conflict(&self, username: &str, email: &str) -> Result<Option<Conflict>> {
        let rows = self.rows.read().await;
        for row in rows.iter() {
            if row.username == username {
                return Ok(Some(Conflict::Username(username.to_string())));
            }
            if row.email == email {
                return Ok(Some(Conflict::Email(email.to_string())));
            }
        }
        Ok(None)
    }

    async fn append(&self, record: &Registration) -> Result<()> {
        let mut rows = self.rows.write().await;
        rows.push(record.clone());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Registration>> {
        let rows = self.rows.read().await;
        Ok(rows.clone())
    }
}
