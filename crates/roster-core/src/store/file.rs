// # CSV Record Store
//
// File-based implementation of RecordStore.
//
// ## Purpose
//
// Persists registration records as rows of a single CSV file with a fixed
// 11-column header, the makeshift record store the front-end reads back
// for display.
//
// ## Resource Discipline
//
// Every operation opens the file, fully reads or appends, and closes it.
// No handle and no cached state outlives an operation, so a fresh store
// instance and a long-lived one always observe the same file. Nothing
// guards against a second *process* interleaving its own read-modify-append
// sequence; that limitation is acknowledged, not solved here.
//
// ## File Format
//
// ```text
// ID,Username,Password,Email,Lastname,Firstname,Middlename,Birthdate,Phone,Gender,Registration Date
// 1,bob,pw1,bob@x.com,,Bob,,14.03.1990,,Male,2025-06-01 12:00:00
// ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::record::{COLUMNS, Registration};
use crate::traits::record_store::{Conflict, RecordStore};

// Cell positions within a row, fixed by the header.
const ID_IDX: usize = 0;
const USERNAME_IDX: usize = 1;
const EMAIL_IDX: usize = 3;

/// File-based record store over a single CSV file
///
/// # Example
///
/// ```rust,no_run
/// use roster_core::store::CsvRecordStore;
/// use roster_core::traits::RecordStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = CsvRecordStore::new("users_registration.csv");
///     store.ensure_initialized().await?;
///
///     assert_eq!(store.next_id().await?, 1);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CsvRecordStore {
    path: PathBuf,
}

impl CsvRecordStore {
    /// Create a store over the given file path
    ///
    /// Cheap: nothing is opened until an operation runs. Call
    /// [`RecordStore::ensure_initialized`] once at startup to lay down the
    /// header row.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the raw rows of the file, header excluded
    ///
    /// # Returns
    ///
    /// - `Ok(None)`: The file does not exist (explicit outcome, left to the
    ///   caller to interpret; initialization handles it, queries treat it
    ///   as empty)
    /// - `Ok(Some(rows))`: All data rows in file order
    /// - `Err(Error)`: The file exists but could not be read, or its header
    ///   does not match the fixed column list
    async fn read_raw_rows(&self) -> Result<Option<Vec<csv::StringRecord>>> {
        if !self.path.exists() {
            tracing::debug!("store file does not exist: {}", self.path.display());
            return Ok(None);
        }

        let content = fs::read(&self.path).await.map_err(|e| {
            Error::load(format!(
                "failed to read store file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_slice());

        let headers = reader.headers().map_err(|e| {
            Error::load(format!(
                "failed to read header of {}: {}",
                self.path.display(),
                e
            ))
        })?;
        if headers.iter().ne(COLUMNS) {
            return Err(Error::load(format!(
                "store file {} has an unexpected header row",
                self.path.display()
            )));
        }

        let mut rows = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| {
                Error::load(format!(
                    "failed to read row of {}: {}",
                    self.path.display(),
                    e
                ))
            })?;
            rows.push(row);
        }
        Ok(Some(rows))
    }
}

#[async_trait]
impl RecordStore for CsvRecordStore {
    async fn ensure_initialized(&self) -> Result<()> {
        if self.path.exists() {
            tracing::debug!("store file already exists: {}", self.path.display());
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::storage(format!(
                        "failed to create store directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(COLUMNS)?;
        let header = writer
            .into_inner()
            .map_err(|e| Error::storage(format!("failed to encode header row: {}", e)))?;

        fs::write(&self.path, header).await.map_err(|e| {
            Error::storage(format!(
                "failed to create store file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::info!("created store file: {}", self.path.display());
        Ok(())
    }

    async fn next_id(&self) -> Result<u64> {
        let Some(rows) = self.read_raw_rows().await? else {
            return Ok(1);
        };

        // Cells that do not parse as identifiers (external edits) are
        // skipped rather than failing the scan.
        let max_id = rows
            .iter()
            .filter_map(|row| row.get(ID_IDX))
            .filter_map(|cell| cell.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Ok(max_id + 1)
    }

    async fn find_conflict(&self, username: &str, email: &str) -> Result<Option<Conflict>> {
        let Some(rows) = self.read_raw_rows().await? else {
            return Ok(None);
        };

        for row in &rows {
            if row.get(USERNAME_IDX) == Some(username) {
                return Ok(Some(Conflict::Username(username.to_string())));
            }
            if row.get(EMAIL_IDX) == Some(email) {
                return Ok(Some(Conflict::Email(email.to_string())));
            }
        }
        Ok(None)
    }

    async fn append(&self, record: &Registration) -> Result<()> {
        if !self.path.exists() {
            return Err(Error::storage(format!(
                "store file {} does not exist; initialize the store first",
                self.path.display()
            )));
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.serialize(record)?;
        let row = writer
            .into_inner()
            .map_err(|e| Error::storage(format!("failed to encode row: {}", e)))?;

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                Error::storage(format!(
                    "failed to open store file {} for append: {}",
                    self.path.display(),
                    e
                ))
            })?;

        file.write_all(&row).await.map_err(|e| {
            Error::storage(format!(
                "failed to append to store file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        file.flush().await.map_err(|e| {
            Error::storage(format!(
                "failed to flush store file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!(id = record.id, "row appended to {}", self.path.display());
        Ok(())
    }

    async fn load_all(&self) -> Result<Vec<Registration>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read(&self.path).await.map_err(|e| {
            Error::load(format!(
                "failed to read store file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(content.as_slice());

        let mut records = Vec::new();
        for row in reader.deserialize::<Registration>() {
            let record = row.map_err(|e| {
                Error::load(format!(
                    "failed to decode row of {}: {}",
                    self.path.display(),
                    e
                ))
            })?;
            records.push(record);
        }

        tracing::debug!("loaded {} record(s) from {}", records.len(), self.path.display());
        Ok(records)
    }
}
