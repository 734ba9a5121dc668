/// MCP tools for the morning routine
///
/// Each tool loads the profile's state, opens a session for today, applies
/// one operation and persists the result. Tool functions are plain
/// synchronous functions so they can be tested without the JSON-RPC layer.

pub mod calendar;
pub mod complete;
pub mod edit;
pub mod list;
pub mod recover;
pub mod settings;
pub mod status;
pub mod toggle;

// Re-export tool functions for easy access
pub use calendar::*;
pub use complete::*;
pub use edit::*;
pub use list::*;
pub use recover::*;
pub use settings::*;
pub use status::*;
pub use toggle::*;

use crate::domain::{Clock, DomainError};
use crate::session::RoutineSession;
use crate::storage::StateStore;
use crate::ServerError;

/// Everything a tool needs to reach the state for "today"
pub struct ToolContext<'a, S: StateStore> {
    pub storage: &'a S,
    pub profile: &'a str,
    pub clock: &'a dyn Clock,
}

impl<'a, S: StateStore> ToolContext<'a, S> {
    pub fn new(storage: &'a S, profile: &'a str, clock: &'a dyn Clock) -> Self {
        Self { storage, profile, clock }
    }

    /// Run `op` against a session opened for today and persist any change
    ///
    /// Domain operations leave the state untouched when they fail, so the
    /// only thing saved after an error is the day rollover done on open.
    pub fn with_session<T, F>(&self, op: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut RoutineSession<'_>) -> Result<T, DomainError>,
    {
        let mut state = self.storage.load_state(self.profile)?;
        let before = state.clone();
        let today = self.clock.today();

        let result = {
            let mut session = RoutineSession::open(&mut state, today);
            op(&mut session)
        };

        if state != before {
            self.storage.save_state(self.profile, &state)?;
        }

        Ok(result?)
    }
}

/// Plural suffix for day counts in messages
pub(crate) fn days(n: u32) -> &'static str {
    if n == 1 { "day" } else { "days" }
}
