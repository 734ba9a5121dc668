/// Analytics for the stats screen
///
/// Turns a StreakLedger into the numbers and the short coaching line the
/// stats view shows. Pure functions over the ledger; nothing is stored.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::StreakLedger;

/// Headline statistics for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub date: NaiveDate,
    /// Streak as it stands today (0 once a run has lapsed)
    pub current_streak: u32,
    pub best_streak: u32,
    /// Completion % of this month over resolved days
    pub monthly_percentage: u32,
    /// Completion % of this month over every elapsed day
    pub elapsed_percentage: u32,
    pub total_completions: u32,
    pub last_completed: Option<NaiveDate>,
    pub message: String,
}

impl StatsSummary {
    /// Compute the summary of `ledger` as seen on `today`
    pub fn from_ledger(ledger: &StreakLedger, today: NaiveDate) -> Self {
        let current_streak = ledger.streak_as_of(today);
        Self {
            date: today,
            current_streak,
            best_streak: ledger.best_streak(),
            monthly_percentage: ledger.monthly_completion_percentage(today),
            elapsed_percentage: ledger.elapsed_completion_percentage(today),
            total_completions: ledger.total_completions(),
            last_completed: ledger.last_completed_date(),
            message: motivational_message(current_streak),
        }
    }

    /// Multi-line text for the stats tool
    pub fn render(&self) -> String {
        let mut text = format!(
            "🔥 {} day streak (best {})\n📊 This month: {}% of mornings completed ({}% of days so far)\n✅ Total mornings won: {}",
            self.current_streak,
            self.best_streak,
            self.monthly_percentage,
            self.elapsed_percentage,
            self.total_completions,
        );
        if let Some(last) = self.last_completed {
            text.push_str(&format!("\n📅 Last completed: {}", last));
        }
        text.push_str(&format!("\n\n{}", self.message));
        text
    }
}

/// Encouragement picked by streak length
///
/// Local stand-in for generated coaching text.
pub fn motivational_message(streak: u32) -> String {
    match streak {
        0 => "Today is day one. Win this morning and the streak starts.".to_string(),
        1 => "Great start! One morning down, keep the momentum going.".to_string(),
        2..=6 => format!("{} mornings in a row. That's consistency! 🔥 Keep going.", streak),
        7..=29 => format!("{} mornings. Not an accident, that's discipline. 💪", streak),
        _ => format!("{} MORNINGS. 👑 This is who you are now. What's the next challenge?", streak),
    }
}
