/// Tool for checking streaks and monthly progress
///
/// This module implements the routine_stats MCP tool.

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::StatsSummary;
use crate::storage::StateStore;
use crate::tools::ToolContext;
use crate::ServerError;

/// Parameters for the stats tool (none needed)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatsParams {}

/// Response from the stats tool
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stats: StatsSummary,
    pub next_reminder: Option<NaiveDateTime>,
    pub message: String,
}

/// Current streak, best streak and this month's completion rate
pub fn get_stats<S: StateStore>(
    ctx: &ToolContext<'_, S>,
    _params: StatsParams,
) -> Result<StatsResponse, ServerError> {
    let now = ctx.clock.now();
    let (stats, next_reminder) = ctx.with_session(|session| {
        Ok((
            session.summary(),
            session.state().settings.next_reminder_after(now),
        ))
    })?;

    let mut message = stats.render();
    if let Some(at) = next_reminder {
        message.push_str(&format!("\n⏰ Next reminder: {}", at.format("%Y-%m-%d %H:%M")));
    }

    Ok(StatsResponse {
        stats,
        next_reminder,
        message,
    })
}
