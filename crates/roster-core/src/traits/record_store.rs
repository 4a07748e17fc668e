// # Record Store Trait
//
// Defines the interface for the append-only registration store.
//
// ## Purpose
//
// The store is durable, append-only, tabular storage with linear-scan
// queries. It knows nothing about validation or identifier policy; those
// belong to the registrar.
//
// ## Implementations
//
// - CSV file: one row per record under a fixed 11-column header
// - Memory: `Vec` behind a lock, for tests and ephemeral use
//
// ## Lifecycle
//
// Records are created only by `append` and are never updated or deleted.
// No transactional isolation exists between `find_conflict`/`next_id` and
// `append`; callers run the sequence within a single user action.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::Registration;

/// A pre-existing record sharing username or email with a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// An existing row already carries this username
    Username(String),
    /// An existing row already carries this email
    Email(String),
}

/// Trait for registration store implementations
///
/// Implementations must be usable across async tasks. File-backed stores
/// open, fully read or append, and close the backing resource within each
/// operation; nothing is held open across calls, so two operations never
/// contend over a shared handle.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create the backing resource with exactly the fixed header row when
    /// it does not exist yet
    ///
    /// Idempotent: an existing resource (and its rows) is left untouched.
    async fn ensure_initialized(&self) -> Result<()>;

    /// Next identifier to assign: `1 + max(ID)` over all data rows
    ///
    /// # Returns
    ///
    /// - `Ok(1)`: The resource is empty or does not exist
    /// - `Ok(n)`: One more than the largest identifier on record
    /// - `Err(Error)`: The resource exists but could not be read
    async fn next_id(&self) -> Result<u64>;

    /// Scan all rows for a username or email collision
    ///
    /// Rows are visited in file order; within a row the username is
    /// compared before the email. The first conflicting row wins.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Conflict))`: A collision, with the offending value
    /// - `Ok(None)`: Neither value is taken
    /// - `Err(Error)`: The resource exists but could not be read
    async fn find_conflict(&self, username: &str, email: &str) -> Result<Option<Conflict>>;

    /// Append one record, persisted immediately
    ///
    /// No buffering and no batching: when this returns `Ok`, the row is on
    /// disk (or the in-memory equivalent).
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The row was written
    /// - `Err(Error)`: The resource was missing, locked, or unwritable
    async fn append(&self, record: &Registration) -> Result<()>;

    /// Every data row, in append order
    ///
    /// A missing resource reads as the empty sequence; initialization is
    /// the caller's concern. Passwords come back unmasked — masking is a
    /// presentation concern of the consumer.
    async fn load_all(&self) -> Result<Vec<Registration>>;
}
