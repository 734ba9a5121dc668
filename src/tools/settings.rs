/// Tool for reminder preferences
///
/// This module implements the routine_settings MCP tool. Called with no
/// arguments it just reports the current settings.

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::ReminderSettings;
use crate::storage::StateStore;
use crate::tools::ToolContext;
use crate::ServerError;

/// Parameters for updating reminder settings
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct SettingsParams {
    /// Daily reminder time (HH:MM, optional)
    pub reminder_time: Option<String>,
    /// Turn the daily reminder on or off (optional)
    pub reminder_enabled: Option<bool>,
}

/// Response from the settings tool
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub settings: ReminderSettings,
    pub next_reminder: Option<NaiveDateTime>,
    pub message: String,
}

/// Read or update the reminder settings
pub fn update_settings<S: StateStore>(
    ctx: &ToolContext<'_, S>,
    params: SettingsParams,
) -> Result<SettingsResponse, ServerError> {
    let reminder_time = params
        .reminder_time
        .as_deref()
        .map(ReminderSettings::parse_time)
        .transpose()?;

    let settings = ctx.with_session(|session| {
        Ok(session.update_settings(reminder_time, params.reminder_enabled))
    })?;
    let next_reminder = settings.next_reminder_after(ctx.clock.now());

    let message = match next_reminder {
        Some(at) => format!(
            "⏰ Daily reminder at {}. Next one: {}",
            settings.reminder_time.format("%H:%M"),
            at.format("%Y-%m-%d %H:%M")
        ),
        None => "🔕 Daily reminder is off.".to_string(),
    };

    Ok(SettingsResponse {
        settings,
        next_reminder,
        message,
    })
}
