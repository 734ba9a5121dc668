/// Core types shared across the routine and ledger
///
/// This module defines the identifier and outcome types that RoutineState,
/// StreakLedger and the session layer pass between each other.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a routine task
///
/// Wraps a UUID so a task id can't be confused with any other string the
/// tools accept. Ids are generated once and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub Uuid);

impl TaskId {
    /// Generate a new random task ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a task ID from its string form (tool arguments)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }

    /// First eight characters, enough to tell tasks apart in messages
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome recorded for a resolved day
///
/// Only these two values are ever written to history. A day with no entry
/// is "unresolved", see [`DayStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOutcome {
    /// Every task of the routine was checked off and the day was committed
    Completed,
    /// The day was explicitly recorded as missed
    Missed,
}

impl DayOutcome {
    pub fn display_name(&self) -> &'static str {
        match self {
            DayOutcome::Completed => "completed",
            DayOutcome::Missed => "missed",
        }
    }
}

impl fmt::Display for DayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Read-time classification of a calendar day
///
/// `Unresolved` is derived from a missing history entry and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Completed,
    Missed,
    Unresolved,
}

impl From<Option<DayOutcome>> for DayStatus {
    fn from(outcome: Option<DayOutcome>) -> Self {
        match outcome {
            Some(DayOutcome::Completed) => DayStatus::Completed,
            Some(DayOutcome::Missed) => DayStatus::Missed,
            None => DayStatus::Unresolved,
        }
    }
}

/// Subscription entitlement supplied by the caller
///
/// The core never resolves this itself; billing lives outside the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entitlement {
    Active,
    Inactive,
}

impl Entitlement {
    pub fn is_active(&self) -> bool {
        matches!(self, Entitlement::Active)
    }
}

impl From<bool> for Entitlement {
    fn from(active: bool) -> Self {
        if active {
            Entitlement::Active
        } else {
            Entitlement::Inactive
        }
    }
}
