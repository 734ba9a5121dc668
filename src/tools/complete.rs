/// Tools for resolving a day
///
/// This module implements the routine_complete and routine_miss MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::parse_civil_date;
use crate::session::CompletionNotifier;
use crate::storage::StateStore;
use crate::tools::{days, ToolContext};
use crate::ServerError;

/// Parameters for completing today (none needed)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CompleteDayParams {}

/// Response from completing today
#[derive(Debug, Serialize)]
pub struct CompleteDayResponse {
    pub newly_completed: bool,
    pub current_streak: u32,
    pub best_streak: u32,
    pub message: String,
}

/// Commit today as won once every task is checked
///
/// The notifier hears about the completion only the first time and only
/// when reminders are enabled.
pub fn complete_day<S: StateStore>(
    ctx: &ToolContext<'_, S>,
    notifier: &dyn CompletionNotifier,
    _params: CompleteDayParams,
) -> Result<CompleteDayResponse, ServerError> {
    let (signal, notify) = ctx.with_session(|session| {
        let signal = session.complete_day()?;
        Ok((signal, session.state().settings.reminder_enabled))
    })?;

    if signal.newly_completed && notify {
        notifier.day_completed(&signal);
    }

    let message = if signal.newly_completed {
        format!(
            "🎉 Morning won! Current streak: {} {} 🔥 (best {})",
            signal.current_streak,
            days(signal.current_streak),
            signal.best_streak
        )
    } else {
        format!(
            "You already won this morning. Streak: {} {}. Come back tomorrow!",
            signal.current_streak,
            days(signal.current_streak)
        )
    };

    Ok(CompleteDayResponse {
        newly_completed: signal.newly_completed,
        current_streak: signal.current_streak,
        best_streak: signal.best_streak,
        message,
    })
}

/// Parameters for recording a missed day
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct MissDayParams {
    /// Day to record as missed (YYYY-MM-DD, optional - defaults to yesterday)
    pub date: Option<String>,
}

/// Response from recording a missed day
#[derive(Debug, Serialize)]
pub struct MissDayResponse {
    pub date: String,
    pub changed: bool,
    pub current_streak: u32,
    pub best_streak: u32,
    pub message: String,
}

/// Record a day as missed
///
/// Days left unresolved stay unresolved until this is called for them.
pub fn miss_day<S: StateStore>(
    ctx: &ToolContext<'_, S>,
    params: MissDayParams,
) -> Result<MissDayResponse, ServerError> {
    let today = ctx.clock.today();
    let date = match params.date {
        Some(ref input) => parse_civil_date(input, today)?,
        None => today.pred_opt().unwrap_or(today),
    };

    let update = ctx.with_session(|session| session.miss_day(date))?;

    let message = if update.changed {
        format!(
            "Recorded {} as missed. Streak reset to 0 (best stays {}).",
            date, update.best_streak
        )
    } else {
        format!("{} was already recorded as missed.", date)
    };

    Ok(MissDayResponse {
        date: date.to_string(),
        changed: update.changed,
        current_streak: update.current_streak,
        best_streak: update.best_streak,
        message,
    })
}
