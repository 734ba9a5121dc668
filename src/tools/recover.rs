/// Tool for recovering a missed day
///
/// This module implements the routine_recover MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{parse_civil_date, Entitlement};
use crate::storage::StateStore;
use crate::tools::{days, ToolContext};
use crate::ServerError;

/// Parameters for recovering a missed day
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RecoverDayParams {
    /// Missed day to turn into a completed one (YYYY-MM-DD)
    pub date: String,
    /// Whether the user has an active subscription
    #[serde(default)]
    pub entitled: bool,
}

/// Response from recovering a day
#[derive(Debug, Serialize)]
pub struct RecoverDayResponse {
    pub date: String,
    pub changed: bool,
    pub current_streak: u32,
    pub best_streak: u32,
    pub message: String,
}

/// Rewrite a missed day as completed and rebuild the streak
pub fn recover_day<S: StateStore>(
    ctx: &ToolContext<'_, S>,
    params: RecoverDayParams,
) -> Result<RecoverDayResponse, ServerError> {
    let date = parse_civil_date(&params.date, ctx.clock.today())?;
    let entitlement = Entitlement::from(params.entitled);

    let update = ctx.with_session(|session| session.recover_day(date, entitlement))?;

    let message = if update.changed {
        format!(
            "🛟 {} recovered. Current streak: {} {} (best {})",
            date,
            update.current_streak,
            days(update.current_streak),
            update.best_streak
        )
    } else {
        format!("{} is already a completed day; nothing to recover.", date)
    };

    Ok(RecoverDayResponse {
        date: date.to_string(),
        changed: update.changed,
        current_streak: update.current_streak,
        best_streak: update.best_streak,
        message,
    })
}
