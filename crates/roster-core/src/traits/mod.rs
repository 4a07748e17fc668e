// # Core Traits
//
// Trait seam between the registrar and its storage backend.
//
// The registrar owns all business rules (validation, conflict policy,
// identifier assignment); implementations of [`RecordStore`] only move
// rows in and out of the backing resource.

pub mod record_store;

pub use record_store::{Conflict, RecordStore};
