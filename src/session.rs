/// Session: the caller that composes RoutineState and StreakLedger
///
/// RoutineState and StreakLedger never talk to each other. A session opens
/// an AppState for a given civil date, resets the checklist when a new day
/// has begun, and turns "all tasks done" into a ledger commit.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::analytics::StatsSummary;
use crate::domain::{
    AppState, CalendarView, DayOutcome, DomainError, Entitlement, ReminderSettings, StreakUpdate,
    TaskDraft, TaskId,
};

/// Signal emitted when a morning is won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCompleted {
    pub date: NaiveDate,
    pub current_streak: u32,
    pub best_streak: u32,
    /// False when today had already been completed
    pub newly_completed: bool,
}

/// Consumer of the day-completed signal (push notification, analytics event)
pub trait CompletionNotifier {
    fn day_completed(&self, signal: &DayCompleted);
}

/// Notifier that only writes the signal to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl CompletionNotifier for LogNotifier {
    fn day_completed(&self, signal: &DayCompleted) {
        tracing::info!(
            "Morning won on {}! Current streak: {} days (best {})",
            signal.date, signal.current_streak, signal.best_streak
        );
    }
}

/// Result of tapping a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Toggled { completed: bool },
    /// Id not in the routine; nothing changed
    UnknownTask,
    /// Today is already won, the checklist is locked until tomorrow
    AlreadyCompletedToday,
    /// Today was recorded as missed, the checklist is locked until tomorrow
    AlreadyMissedToday,
}

/// One unit of work against an AppState on a given day
pub struct RoutineSession<'a> {
    state: &'a mut AppState,
    today: NaiveDate,
    rolled_over: bool,
}

impl<'a> RoutineSession<'a> {
    /// Open the state for `today`, resetting yesterday's ticks if needed
    ///
    /// An unresolved yesterday is left unresolved; recording it as missed
    /// is an explicit `miss_day` call.
    pub fn open(state: &'a mut AppState, today: NaiveDate) -> Self {
        let rolled_over = match state.checklist_date {
            Some(day) => day != today,
            // Records written before the checklist date existed
            None => state.ledger.detect_rollover(today),
        };

        if rolled_over {
            state.routine.reset_day();
            tracing::info!("New day {}: checklist reset", today);
        }
        state.checklist_date = Some(today);

        Self {
            state,
            today,
            rolled_over,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Whether opening this session reset the checklist
    pub fn rolled_over(&self) -> bool {
        self.rolled_over
    }

    pub fn state(&self) -> &AppState {
        &*self.state
    }

    pub fn completed_today(&self) -> bool {
        self.state.ledger.outcome_on(self.today) == Some(DayOutcome::Completed)
    }

    pub fn toggle_task(&mut self, id: &TaskId) -> ToggleOutcome {
        match self.state.ledger.outcome_on(self.today) {
            Some(DayOutcome::Completed) => return ToggleOutcome::AlreadyCompletedToday,
            Some(DayOutcome::Missed) => return ToggleOutcome::AlreadyMissedToday,
            None => {}
        }
        if !self.state.routine.toggle_task(id) {
            return ToggleOutcome::UnknownTask;
        }
        // Found above, so the lookup can't fail
        let completed = self
            .state
            .routine
            .task(id)
            .map(|t| t.completed)
            .unwrap_or(false);
        ToggleOutcome::Toggled { completed }
    }

    /// Commit today as completed and clear the checklist
    ///
    /// Repeating the call on a day that is already won returns the same
    /// counters with `newly_completed = false`.
    pub fn complete_day(&mut self) -> Result<DayCompleted, DomainError> {
        match self.state.ledger.outcome_on(self.today) {
            Some(DayOutcome::Completed) => return Ok(self.signal(false)),
            Some(DayOutcome::Missed) => {
                return Err(DomainError::ConflictingOutcome {
                    date: self.today,
                    recorded: DayOutcome::Missed,
                    requested: DayOutcome::Completed,
                })
            }
            None => {}
        }

        let routine = &self.state.routine;
        if !routine.is_complete() {
            return Err(DomainError::Validation {
                message: format!(
                    "Routine not finished yet: {}/{} done",
                    routine.completed_count(),
                    routine.len()
                ),
            });
        }

        self.state
            .ledger
            .commit_day(self.today, DayOutcome::Completed, self.today)?;
        self.state.routine.reset_day();

        Ok(self.signal(true))
    }

    /// Record a day as missed
    ///
    /// Missing today also clears the checklist.
    pub fn miss_day(&mut self, date: NaiveDate) -> Result<StreakUpdate, DomainError> {
        let update = self
            .state
            .ledger
            .commit_day(date, DayOutcome::Missed, self.today)?;
        if date == self.today && update.changed {
            self.state.routine.reset_day();
        }
        Ok(update)
    }

    pub fn recover_day(
        &mut self,
        date: NaiveDate,
        entitlement: Entitlement,
    ) -> Result<StreakUpdate, DomainError> {
        self.state.ledger.recover_day(date, entitlement, self.today)
    }

    /// Calendar of the current month, subscribers only
    pub fn calendar_view(&self, entitlement: Entitlement) -> Result<CalendarView, DomainError> {
        if !entitlement.is_active() {
            return Err(DomainError::PreconditionDenied {
                message: "The history calendar requires an active subscription".to_string(),
            });
        }
        Ok(self.state.ledger.calendar_view(self.today))
    }

    pub fn replace_tasks(&mut self, drafts: Vec<TaskDraft>) -> Result<(), DomainError> {
        self.state.routine.replace_tasks(drafts)
    }

    pub fn rename_task(&mut self, id: &TaskId, title: &str) -> Result<(), DomainError> {
        self.state.routine.rename_task(id, title)
    }

    /// Change the reminder preferences; `None` leaves a field as it is
    pub fn update_settings(
        &mut self,
        reminder_time: Option<NaiveTime>,
        reminder_enabled: Option<bool>,
    ) -> ReminderSettings {
        let settings = &mut self.state.settings;
        if let Some(time) = reminder_time {
            settings.reminder_time = time;
        }
        if let Some(enabled) = reminder_enabled {
            settings.reminder_enabled = enabled;
        }
        *settings
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary::from_ledger(&self.state.ledger, self.today)
    }

    fn signal(&self, newly_completed: bool) -> DayCompleted {
        DayCompleted {
            date: self.today,
            current_streak: self.state.ledger.current_streak(),
            best_streak: self.state.ledger.best_streak(),
            newly_completed,
        }
    }
}
