//! Core registration flow
//!
//! The Registrar is responsible for:
//! - Validating candidate records (presence, formats, birthdate)
//! - Checking username/email uniqueness against the store
//! - Assigning the next identifier
//! - Stamping the registration time and appending the record
//!
//! ## Control Flow
//!
//! ```text
//! front-end ── NewRegistration ──▶ Registrar
//!                                     │ validate
//!                                     │ find_conflict ──▶ RecordStore
//!                                     │ next_id       ──▶ RecordStore
//!                                     │ append        ──▶ RecordStore
//!                                     ▼
//!                              Registration (with id + timestamp)
//! ```
//!
//! Every step runs to completion within the calling task; there is no
//! background work and no retry. A failed submission is surfaced to the
//! user, who re-submits. No transactional isolation exists between the
//! uniqueness check and the append; the sequence runs within one user
//! action and concurrent access is out of scope.

use tracing::{debug, info, warn};

use crate::config::{RosterConfig, StoreConfig};
use crate::error::{Error, Result};
use crate::record::{NewRegistration, Registration};
use crate::store::{CsvRecordStore, MemoryRecordStore};
use crate::traits::record_store::{Conflict, RecordStore};
use crate::validate;

/// Orchestrates validation, uniqueness checks, and the append
///
/// Owns its store behind the [`RecordStore`] seam, so the same flow runs
/// over the CSV file in production and over a memory store in tests.
pub struct Registrar {
    store: Box<dyn RecordStore>,
}

impl Registrar {
    /// Create a registrar over an existing store
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Create a registrar from configuration
    pub fn from_config(config: &RosterConfig) -> Result<Self> {
        config.validate()?;
        let store: Box<dyn RecordStore> = match &config.store {
            StoreConfig::Csv { path } => Box::new(CsvRecordStore::new(path)),
            StoreConfig::Memory => Box::new(MemoryRecordStore::new()),
        };
        Ok(Self::new(store))
    }

    /// Initialize the backing store
    ///
    /// Creates the store resource with its header row when absent.
    /// Idempotent; meant to run once at startup.
    pub async fn init(&self) -> Result<()> {
        self.store.ensure_initialized().await
    }

    /// Register a candidate record
    ///
    /// Runs the full submit flow: validation, uniqueness check, identifier
    /// assignment, timestamping, append. Nothing is persisted unless every
    /// check passes.
    ///
    /// # Returns
    ///
    /// - `Ok(Registration)`: The stored record, with its assigned id and
    ///   registration timestamp
    /// - `Err(Error)`: The specific rejection or store failure
    pub async fn register(&self, candidate: NewRegistration) -> Result<Registration> {
        let candidate = candidate.trimmed();

        if let Err(e) = validate::validate(&candidate) {
            warn!(username = %candidate.username, "registration rejected: {}", e);
            return Err(e);
        }

        self.store.ensure_initialized().await?;

        match self
            .store
            .find_conflict(&candidate.username, &candidate.email)
            .await?
        {
            Some(Conflict::Username(username)) => {
                warn!(%username, "registration rejected: username taken");
                return Err(Error::DuplicateUsername(username));
            }
            Some(Conflict::Email(email)) => {
                warn!(%email, "registration rejected: email taken");
                return Err(Error::DuplicateEmail(email));
            }
            None => {}
        }

        let id = self.store.next_id().await?;
        debug!(id, "assigning identifier");

        let registered_at = chrono::Local::now().naive_local();
        let record = candidate.into_registration(id, registered_at);
        self.store.append(&record).await?;

        info!(id = record.id, username = %record.username, "registered");
        Ok(record)
    }

    /// All records on file, in registration order
    pub async fn list(&self) -> Result<Vec<Registration>> {
        self.store.load_all().await
    }
}
