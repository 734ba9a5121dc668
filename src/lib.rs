/// Public library interface for the Morning Routine MCP server
///
/// This module exports the server together with the routine, streak and
/// storage types so other applications and tests can drive them directly.

use std::path::PathBuf;
use thiserror::Error;

mod domain;
mod storage;
mod analytics;
pub mod session;
pub mod tools;
pub mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{SqliteStorage, StateStore, StorageError};
pub use analytics::{motivational_message, StatsSummary};
pub use session::{CompletionNotifier, DayCompleted, LogNotifier, RoutineSession, ToggleOutcome};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("{0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main routine server behind the MCP protocol
///
/// Owns the SQLite store, the profile whose state every tool works on, the
/// clock that decides what "today" is and the completion notifier.
pub struct MorningRoutineServer {
    storage: SqliteStorage,
    profile: String,
    clock: Box<dyn Clock + Send + Sync>,
    notifier: Box<dyn CompletionNotifier + Send + Sync>,
}

impl MorningRoutineServer {
    /// Create a server backed by the database at `db_path`
    ///
    /// The schema is created or migrated on open.
    pub async fn new(db_path: PathBuf, profile: impl Into<String>) -> Result<Self, ServerError> {
        tracing::info!("Initializing Morning Routine server with database: {:?}", db_path);
        let storage = SqliteStorage::new(db_path)?;
        Ok(Self::with_storage(storage, profile))
    }

    /// Create a server over an already opened store
    pub fn with_storage(storage: SqliteStorage, profile: impl Into<String>) -> Self {
        Self {
            storage,
            profile: profile.into(),
            clock: Box::new(SystemClock),
            notifier: Box::new(LogNotifier),
        }
    }

    /// Replace the clock (tests pin the date with a FixedClock)
    pub fn with_clock(mut self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_notifier(mut self, notifier: impl CompletionNotifier + Send + Sync + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// Blocks until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        // Touch the database before accepting requests
        let state = self.storage.load_state(&self.profile)?;
        tracing::info!(
            "Server started for profile '{}': {} tasks, current streak {}",
            self.profile,
            state.routine.len(),
            state.ledger.current_streak()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Tool context for the configured profile and clock
    pub fn context(&self) -> tools::ToolContext<'_, SqliteStorage> {
        tools::ToolContext::new(&self.storage, &self.profile, self.clock.as_ref())
    }

    pub fn notifier(&self) -> &dyn CompletionNotifier {
        self.notifier.as_ref()
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }
}
