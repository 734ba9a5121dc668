/// The persisted application record
///
/// AppState is what the storage layer saves after every mutation and loads
/// at startup. It is passed around explicitly; there is no global store.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::{RoutineState, StreakLedger};

/// Everything the tracker remembers for one profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub routine: RoutineState,
    pub ledger: StreakLedger,
    #[serde(default)]
    pub settings: ReminderSettings,
    /// Civil date the checklist ticks belong to
    #[serde(default)]
    pub checklist_date: Option<NaiveDate>,
}

/// Daily reminder preferences
///
/// Delivery is someone else's job; the core only stores the preference and
/// works out when the next reminder is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub reminder_time: NaiveTime,
    pub reminder_enabled: bool,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            reminder_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
            reminder_enabled: true,
        }
    }
}

impl ReminderSettings {
    /// Next moment the reminder should fire, strictly after `now`
    ///
    /// Today at the reminder time if that is still ahead, otherwise the same
    /// time tomorrow. `None` when reminders are disabled.
    pub fn next_reminder_after(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        if !self.reminder_enabled {
            return None;
        }
        let today_at = now.date().and_time(self.reminder_time);
        if today_at > now {
            Some(today_at)
        } else {
            Some(today_at + Duration::days(1))
        }
    }

    /// Parse an `HH:MM` reminder time
    pub fn parse_time(input: &str) -> Result<NaiveTime, crate::domain::DomainError> {
        NaiveTime::parse_from_str(input.trim(), "%H:%M").map_err(|_| {
            crate::domain::DomainError::Validation {
                message: format!("'{}' is not a valid HH:MM time", input),
            }
        })
    }
}
