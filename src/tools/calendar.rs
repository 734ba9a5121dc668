/// Tool for the month calendar
///
/// This module implements the routine_calendar MCP tool. The calendar is a
/// subscriber feature, so the caller passes the entitlement flag along.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{CalendarCell, CalendarView, DayStatus, Entitlement};
use crate::storage::StateStore;
use crate::tools::ToolContext;
use crate::ServerError;

/// Parameters for the calendar tool
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct CalendarParams {
    /// Whether the user has an active subscription
    #[serde(default)]
    pub entitled: bool,
}

/// Response from the calendar tool
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub calendar: CalendarView,
    pub message: String,
}

/// Calendar of the current month with each day's status
pub fn get_calendar<S: StateStore>(
    ctx: &ToolContext<'_, S>,
    params: CalendarParams,
) -> Result<CalendarResponse, ServerError> {
    let entitlement = Entitlement::from(params.entitled);
    let calendar = ctx.with_session(|session| session.calendar_view(entitlement))?;
    let message = render_calendar(&calendar);
    Ok(CalendarResponse { calendar, message })
}

/// Text grid: ✅ completed, ❌ missed, · unresolved
pub fn render_calendar(view: &CalendarView) -> String {
    let mut text = format!("📅 {}-{:02}\n Su  Mo  Tu  We  Th  Fr  Sa", view.year, view.month);
    for week in view.weeks() {
        text.push('\n');
        let row = week
            .iter()
            .map(|cell| match cell {
                CalendarCell::OutOfMonthPadding => "   ".to_string(),
                CalendarCell::Day { date, status } => {
                    use chrono::Datelike;
                    let mark = match status {
                        DayStatus::Completed => '✅',
                        DayStatus::Missed => '❌',
                        DayStatus::Unresolved => '·',
                    };
                    format!("{:>2}{}", date.day(), mark)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        text.push_str(&row);
    }
    text
}
