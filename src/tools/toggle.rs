/// Tool for checking and unchecking a task
///
/// This module implements the routine_toggle MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, TaskId};
use crate::session::ToggleOutcome;
use crate::storage::StateStore;
use crate::tools::ToolContext;
use crate::ServerError;

/// Parameters for toggling a task
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleTaskParams {
    /// ID of the task to check or uncheck
    pub task_id: String,
}

/// Response from toggling a task
#[derive(Debug, Serialize)]
pub struct ToggleTaskResponse {
    pub changed: bool,
    pub completed: Option<bool>,
    pub routine_complete: bool,
    pub message: String,
}

/// Flip one task of today's checklist
///
/// An id that isn't in the routine is reported but is not an error.
pub fn toggle_task<S: StateStore>(
    ctx: &ToolContext<'_, S>,
    params: ToggleTaskParams,
) -> Result<ToggleTaskResponse, ServerError> {
    let task_id = TaskId::from_string(&params.task_id).map_err(|_| DomainError::Validation {
        message: format!("'{}' is not a valid task id", params.task_id),
    })?;

    ctx.with_session(|session| {
        let outcome = session.toggle_task(&task_id);
        let routine = &session.state().routine;
        let routine_complete = routine.is_complete();

        let (changed, completed, message) = match outcome {
            ToggleOutcome::Toggled { completed } => {
                let progress = format!("{}/{} done", routine.completed_count(), routine.len());
                let message = if routine_complete {
                    format!("✓ {}. Everything is checked, complete your morning!", progress)
                } else if completed {
                    format!("✓ Checked. {}", progress)
                } else {
                    format!("Unchecked. {}", progress)
                };
                (true, Some(completed), message)
            }
            ToggleOutcome::UnknownTask => (
                false,
                None,
                "That task is no longer in your routine; nothing changed.".to_string(),
            ),
            ToggleOutcome::AlreadyCompletedToday => (
                false,
                None,
                "🎉 You already won this morning. Come back tomorrow!".to_string(),
            ),
            ToggleOutcome::AlreadyMissedToday => (
                false,
                None,
                "Today is already recorded as missed, so the checklist is locked. A fresh start tomorrow!"
                    .to_string(),
            ),
        };

        Ok(ToggleTaskResponse {
            changed,
            completed,
            routine_complete,
            message,
        })
    })
}
