// # Record Store Implementations
//
// This module provides implementations of the RecordStore trait for
// different persistence strategies.

pub mod file;
pub mod memory;

pub use file::CsvRecordStore;
pub use memory::MemoryRecordStore;
