/// Domain module containing the routine checklist and the streak ledger
///
/// This module defines the core entities (Task, RoutineState, StreakLedger)
/// and the persisted AppState record that bundles them. Nothing in here does
/// I/O; "today" always arrives as an argument or through a Clock.

pub mod clock;
pub mod ledger;
pub mod routine;
pub mod state;
pub mod task;
pub mod types;

// Re-export public types for easy access
pub use clock::*;
pub use ledger::*;
pub use routine::*;
pub use state::*;
pub use task::*;
pub use types::*;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during domain operations
///
/// Every variant is raised before any state is touched, so a caller that
/// receives one can simply surface it and carry on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid task title: {0}")]
    InvalidTaskTitle(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Day {date} is already recorded as {recorded}, cannot record it as {requested}")]
    ConflictingOutcome {
        date: NaiveDate,
        recorded: DayOutcome,
        requested: DayOutcome,
    },

    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: String },

    #[error("No outcome recorded for {date}")]
    DayNotFound { date: NaiveDate },

    #[error("Not allowed: {message}")]
    PreconditionDenied { message: String },
}

/// Coarse error taxonomy the caller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; show it to the user
    Validation,
    /// Referenced task or day does not exist
    NotFound,
    /// Entitlement missing or quota used up; redirect to the paywall
    PreconditionDenied,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::Validation { .. }
            | DomainError::InvalidTaskTitle(_)
            | DomainError::InvalidDate(_)
            | DomainError::ConflictingOutcome { .. } => ErrorKind::Validation,
            DomainError::TaskNotFound { .. } | DomainError::DayNotFound { .. } => {
                ErrorKind::NotFound
            }
            DomainError::PreconditionDenied { .. } => ErrorKind::PreconditionDenied,
        }
    }
}

/// Parse a civil date in `YYYY-MM-DD` form and reject dates after `today`
///
/// Tool arguments arrive as strings; this is the single place they become
/// dates.
pub fn parse_civil_date(input: &str, today: NaiveDate) -> Result<NaiveDate, DomainError> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date", input)))?;
    ensure_not_future(date, today)?;
    Ok(date)
}

/// Reject dates that lie after `today`
pub(crate) fn ensure_not_future(date: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
    if date > today {
        return Err(DomainError::InvalidDate(format!(
            "{} is in the future (today is {})",
            date, today
        )));
    }
    Ok(())
}
