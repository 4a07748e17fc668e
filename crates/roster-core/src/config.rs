//! Configuration types for the roster registration system
//!
//! The original record store lived at a hard-coded file name; here the
//! location is an explicit configuration value handed to the store at
//! construction time. The old fixed name survives only as the default.

use serde::{Deserialize, Serialize};

/// Default backing file, resolved relative to the working directory
pub const DEFAULT_STORE_PATH: &str = "users_registration.csv";

/// Main roster configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Record store configuration
    pub store: StoreConfig,
}

impl RosterConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            store: StoreConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.store.validate()
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// CSV-file-backed store
    Csv {
        /// Path to the store file
        path: String,
    },

    /// In-memory store (not persistent)
    Memory,
}

impl StoreConfig {
    /// Validate the store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            StoreConfig::Csv { path } => {
                if path.is_empty() {
                    return Err(crate::Error::config("store path cannot be empty"));
                }
                Ok(())
            }
            StoreConfig::Memory => Ok(()),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Csv {
            path: DEFAULT_STORE_PATH.to_string(),
        }
    }
}
