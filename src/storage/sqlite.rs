/// SQLite implementation of the state store
///
/// Each profile is one row holding the JSON encoding of its AppState.

use std::path::PathBuf;
use rusqlite::{Connection, OptionalExtension, params};
use chrono::Utc;

use crate::domain::AppState;
use crate::storage::{StorageError, StateStore, migrations};

/// SQLite-based storage implementation
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database file and bring its schema up to date
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    /// Profiles that have a saved state, alphabetically
    pub fn profiles(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT profile FROM app_state ORDER BY profile")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut profiles = Vec::new();
        for profile in rows {
            profiles.push(profile?);
        }
        Ok(profiles)
    }
}

impl StateStore for SqliteStorage {
    fn load_state(&self, profile: &str) -> Result<AppState, StorageError> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT state_json FROM app_state WHERE profile = ?1",
                params![profile],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(json) => {
                let state = serde_json::from_str(&json)?;
                tracing::debug!("Loaded state for profile '{}'", profile);
                Ok(state)
            }
            None => {
                tracing::debug!("No state for profile '{}', starting fresh", profile);
                Ok(AppState::default())
            }
        }
    }

    fn save_state(&self, profile: &str, state: &AppState) -> Result<(), StorageError> {
        let json = serde_json::to_string(state)?;

        self.conn.execute(
            "INSERT INTO app_state (profile, state_json, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(profile) DO UPDATE SET
                state_json = excluded.state_json,
                updated_at = excluded.updated_at",
            params![profile, json, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!("Saved state for profile '{}'", profile);
        Ok(())
    }

    fn has_state(&self, profile: &str) -> Result<bool, StorageError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM app_state WHERE profile = ?1",
            params![profile],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
