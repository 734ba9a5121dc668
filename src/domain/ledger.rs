/// Streak ledger: day outcomes, streak arithmetic and derived statistics
///
/// The ledger is the only durable record of how the user did. It is mutated
/// by `commit_day` (the normal path) and `recover_day` (the paid correction
/// path). Everything else here is a read-only projection of `history`.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{ensure_not_future, DayOutcome, DayStatus, DomainError, Entitlement};

/// Streak counters after a ledger mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakUpdate {
    pub current_streak: u32,
    pub best_streak: u32,
    /// False when the call was an idempotent repeat
    pub changed: bool,
}

/// Durable history of resolved days plus the running streak
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakLedger {
    /// Resolved days only; a missing date is "unresolved", not "missed"
    history: BTreeMap<NaiveDate, DayOutcome>,
    current_streak: u32,
    best_streak: u32,
    last_completed_date: Option<NaiveDate>,
    /// Dates on which a missed day was recovered
    #[serde(default)]
    recoveries: BTreeSet<NaiveDate>,
}

impl StreakLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &BTreeMap<NaiveDate, DayOutcome> {
        &self.history
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn last_completed_date(&self) -> Option<NaiveDate> {
        self.last_completed_date
    }

    pub fn recoveries(&self) -> &BTreeSet<NaiveDate> {
        &self.recoveries
    }

    pub fn outcome_on(&self, date: NaiveDate) -> Option<DayOutcome> {
        self.history.get(&date).copied()
    }

    pub fn status_on(&self, date: NaiveDate) -> DayStatus {
        DayStatus::from(self.outcome_on(date))
    }

    /// Number of days ever recorded as completed
    pub fn total_completions(&self) -> u32 {
        self.history
            .values()
            .filter(|o| **o == DayOutcome::Completed)
            .count() as u32
    }

    /// Record the outcome of a day and update the streak
    ///
    /// Re-committing the outcome a day already has is a no-op (double taps);
    /// committing a different one is rejected. Nothing is mutated on error.
    pub fn commit_day(
        &mut self,
        date: NaiveDate,
        outcome: DayOutcome,
        today: NaiveDate,
    ) -> Result<StreakUpdate, DomainError> {
        ensure_not_future(date, today)?;

        if let Some(recorded) = self.outcome_on(date) {
            if recorded == outcome {
                tracing::debug!("{} already recorded as {}, nothing to do", date, outcome);
                return Ok(self.snapshot(false));
            }
            return Err(DomainError::ConflictingOutcome {
                date,
                recorded,
                requested: outcome,
            });
        }

        self.history.insert(date, outcome);
        match outcome {
            // Any completion that doesn't directly follow the last one, earlier
            // dates included, starts a new run and becomes the last completion
            DayOutcome::Completed => {
                self.current_streak = next_streak(self.current_streak, self.last_completed_date, date);
                self.best_streak = self.best_streak.max(self.current_streak);
                self.last_completed_date = Some(date);
            }
            DayOutcome::Missed => {
                self.current_streak = 0;
            }
        }

        tracing::info!(
            "Recorded {} as {} (streak {}, best {})",
            date, outcome, self.current_streak, self.best_streak
        );
        Ok(self.snapshot(true))
    }

    /// True when a new civil day has started since the last completion
    ///
    /// The caller resets the checklist when this returns true.
    pub fn detect_rollover(&self, today: NaiveDate) -> bool {
        match self.last_completed_date {
            Some(last) => last != today && !self.history.contains_key(&today),
            None => false,
        }
    }

    /// Streak to display on `today`
    ///
    /// The stored counter only changes on commits, so a run whose last
    /// completion is older than yesterday has quietly lapsed and reads as 0.
    pub fn streak_as_of(&self, today: NaiveDate) -> u32 {
        match self.last_completed_date {
            Some(last) if (today - last).num_days() <= 1 => self.current_streak,
            _ => 0,
        }
    }

    /// Completion percentage of today's month over resolved days only
    ///
    /// Days 1 through `today` that have a recorded outcome form the
    /// denominator; unresolved days don't count against the user.
    pub fn monthly_completion_percentage(&self, today: NaiveDate) -> u32 {
        let (completed, resolved) = self.month_counts(today);
        rounded_percentage(completed, resolved)
    }

    /// Completion percentage of today's month over every elapsed day
    ///
    /// Stricter variant: unresolved days count as not completed.
    pub fn elapsed_completion_percentage(&self, today: NaiveDate) -> u32 {
        let (completed, _) = self.month_counts(today);
        rounded_percentage(completed, today.day())
    }

    /// Month grid for the month containing `today`
    ///
    /// Weeks start on Sunday; the leading padding aligns day 1 under its
    /// weekday.
    pub fn calendar_view(&self, today: NaiveDate) -> CalendarView {
        let first = first_of_month(today);
        let padding = first.weekday().num_days_from_sunday() as usize;
        let days = days_in_month(today.year(), today.month());

        let mut cells = Vec::with_capacity(padding + days as usize);
        cells.extend(std::iter::repeat(CalendarCell::OutOfMonthPadding).take(padding));
        for date in first.iter_days().take(days as usize) {
            cells.push(CalendarCell::Day {
                date,
                status: self.status_on(date),
            });
        }

        CalendarView {
            year: today.year(),
            month: today.month(),
            cells,
        }
    }

    /// Rewrite a missed day as completed and replay the streak
    ///
    /// Paid feature, limited to one recovery per calendar month. Streak
    /// arithmetic depends on order, so counters are rebuilt by replaying
    /// the full history oldest first; the best streak never goes down.
    pub fn recover_day(
        &mut self,
        date: NaiveDate,
        entitlement: Entitlement,
        today: NaiveDate,
    ) -> Result<StreakUpdate, DomainError> {
        if !entitlement.is_active() {
            return Err(DomainError::PreconditionDenied {
                message: "Recovering a missed day requires an active subscription".to_string(),
            });
        }
        ensure_not_future(date, today)?;

        match self.outcome_on(date) {
            None => Err(DomainError::DayNotFound { date }),
            Some(DayOutcome::Completed) => Ok(self.snapshot(false)),
            Some(DayOutcome::Missed) => {
                if self.recovered_in_month_of(today) {
                    return Err(DomainError::PreconditionDenied {
                        message: "Only one missed day can be recovered per month".to_string(),
                    });
                }

                self.history.insert(date, DayOutcome::Completed);
                self.recoveries.insert(today);
                self.replay();

                tracing::info!(
                    "Recovered {} (streak {}, best {})",
                    date, self.current_streak, self.best_streak
                );
                Ok(self.snapshot(true))
            }
        }
    }

    /// Rebuild the counters from history; the best streak never goes down
    fn replay(&mut self) {
        let replayed = Replay::run(&self.history);
        self.current_streak = replayed.current_streak;
        self.best_streak = self.best_streak.max(replayed.best_streak);
        self.last_completed_date = replayed.last_completed_date;
    }

    fn recovered_in_month_of(&self, today: NaiveDate) -> bool {
        self.recoveries
            .iter()
            .any(|d| d.year() == today.year() && d.month() == today.month())
    }

    /// Completed and resolved day counts for days 1..=today of today's month
    fn month_counts(&self, today: NaiveDate) -> (u32, u32) {
        self.history
            .range(first_of_month(today)..=today)
            .fold((0, 0), |(completed, resolved), (_, outcome)| match outcome {
                DayOutcome::Completed => (completed + 1, resolved + 1),
                DayOutcome::Missed => (completed, resolved + 1),
            })
    }

    fn snapshot(&self, changed: bool) -> StreakUpdate {
        StreakUpdate {
            current_streak: self.current_streak,
            best_streak: self.best_streak,
            changed,
        }
    }
}

/// Streak after completing `date`, given the previous completion
fn next_streak(current: u32, last_completed: Option<NaiveDate>, date: NaiveDate) -> u32 {
    match last_completed {
        None => current.saturating_add(1),
        Some(last) if last.succ_opt() == Some(date) => current.saturating_add(1),
        // Gap or out-of-order date: this completion starts a new run
        Some(_) => 1,
    }
}

/// Counters rebuilt from scratch by walking history oldest first
struct Replay {
    current_streak: u32,
    best_streak: u32,
    last_completed_date: Option<NaiveDate>,
}

impl Replay {
    fn run(history: &BTreeMap<NaiveDate, DayOutcome>) -> Self {
        let mut replay = Replay {
            current_streak: 0,
            best_streak: 0,
            last_completed_date: None,
        };

        for (date, outcome) in history {
            match outcome {
                DayOutcome::Completed => {
                    replay.current_streak =
                        next_streak(replay.current_streak, replay.last_completed_date, *date);
                    replay.best_streak = replay.best_streak.max(replay.current_streak);
                    replay.last_completed_date = Some(*date);
                }
                DayOutcome::Missed => replay.current_streak = 0,
            }
        }

        replay
    }
}

/// One slot of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarCell {
    /// Blank slot before day 1
    OutOfMonthPadding,
    Day { date: NaiveDate, status: DayStatus },
}

/// Calendar projection of the ledger for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarView {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl CalendarView {
    /// Number of leading padding cells
    pub fn padding(&self) -> usize {
        self.cells
            .iter()
            .take_while(|c| matches!(c, CalendarCell::OutOfMonthPadding))
            .count()
    }

    /// Status of a given day of the month (1-based)
    pub fn status_of_day(&self, day: u32) -> Option<DayStatus> {
        self.cells.iter().find_map(|cell| match cell {
            CalendarCell::Day { date, status } if date.day() == day => Some(*status),
            _ => None,
        })
    }

    /// Rows of seven cells, Sunday first
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Length of a month in days
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

/// `round(100 * part / whole)` with halves rounded up, 0 when `whole` is 0
fn rounded_percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let (part, whole) = (part as u64, whole as u64);
    ((200 * part + whole) / (2 * whole)) as u32
}
