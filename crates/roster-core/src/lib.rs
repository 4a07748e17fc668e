// # roster-core
//
// Core library for the roster registration system.
//
// ## Architecture Overview
//
// This library provides everything behind the form front-end:
// - **Validator**: required-field and format checks on candidate records
// - **RecordStore**: trait for append-only tabular storage
// - **CsvRecordStore / MemoryRecordStore**: store implementations
// - **Registrar**: drives validate → uniqueness check → assign id → append
//
// ## Design Principles
//
// 1. **Separation of Concerns**: business rules live in the registrar and
//    validator; stores only move rows
// 2. **Append-Only**: no record is ever updated or deleted
// 3. **Library-First**: any front-end (CLI, GUI, tests) drives the same API
// 4. **Recoverable Errors**: every failure maps to a user-facing message;
//    nothing is fatal to the process

pub mod config;
pub mod error;
pub mod record;
pub mod registrar;
pub mod store;
pub mod traits;
pub mod validate;

// Re-export core types for convenience
pub use config::{RosterConfig, StoreConfig};
pub use error::{Error, Result};
pub use record::{Gender, NewRegistration, Registration};
pub use registrar::Registrar;
pub use store::{CsvRecordStore, MemoryRecordStore};
pub use traits::{Conflict, RecordStore};
