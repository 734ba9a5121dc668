/// Storage layer for persisting the routine state
///
/// The core treats storage as a key-value capability: one serialized
/// AppState per profile, written whole after every successful mutation and
/// read back at startup.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use crate::domain::AppState;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the durable store for AppState records
///
/// Implementations must round-trip a state exactly: whatever `save_state`
/// wrote, `load_state` returns.
pub trait StateStore {
    /// Load the state for a profile, or a fresh default state if none exists
    fn load_state(&self, profile: &str) -> Result<AppState, StorageError>;

    /// Replace the stored state for a profile
    fn save_state(&self, profile: &str, state: &AppState) -> Result<(), StorageError>;

    /// Whether a state has ever been saved for this profile
    fn has_state(&self, profile: &str) -> Result<bool, StorageError>;
}
