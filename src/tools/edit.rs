/// Tools for editing the routine
///
/// This module implements the routine_edit and routine_rename MCP tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, TaskDraft, TaskId};
use crate::storage::StateStore;
use crate::tools::ToolContext;
use crate::ServerError;

/// One task of the edited routine
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EditTaskItem {
    /// Existing task ID to keep (omit for a new task)
    pub task_id: Option<String>,
    /// Task title
    pub title: String,
}

/// Parameters for replacing the routine
#[derive(Debug, Deserialize, JsonSchema)]
pub struct EditRoutineParams {
    /// The complete new routine, in display order
    pub tasks: Vec<EditTaskItem>,
}

/// Response from replacing the routine
#[derive(Debug, Serialize)]
pub struct EditRoutineResponse {
    pub total: usize,
    pub message: String,
}

/// Replace the whole routine
///
/// Order follows the list; every task starts unchecked.
pub fn edit_routine<S: StateStore>(
    ctx: &ToolContext<'_, S>,
    params: EditRoutineParams,
) -> Result<EditRoutineResponse, ServerError> {
    let drafts = params
        .tasks
        .into_iter()
        .map(|item| -> Result<TaskDraft, DomainError> {
            let id = item.task_id.as_deref().map(parse_task_id).transpose()?;
            Ok(TaskDraft { id, title: item.title })
        })
        .collect::<Result<Vec<_>, _>>()?;

    ctx.with_session(|session| {
        session.replace_tasks(drafts)?;
        let routine = &session.state().routine;
        let titles = routine
            .tasks()
            .iter()
            .map(|t| format!("{}. {}", t.order, t.title))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(EditRoutineResponse {
            total: routine.len(),
            message: format!("✅ Your routine has been updated:\n{}", titles),
        })
    })
}

/// Parameters for renaming one task
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RenameTaskParams {
    /// ID of the task to rename
    pub task_id: String,
    /// New title
    pub title: String,
}

/// Response from renaming a task
#[derive(Debug, Serialize)]
pub struct RenameTaskResponse {
    pub message: String,
}

/// Change the title of an existing task
pub fn rename_task<S: StateStore>(
    ctx: &ToolContext<'_, S>,
    params: RenameTaskParams,
) -> Result<RenameTaskResponse, ServerError> {
    let task_id = parse_task_id(&params.task_id)?;

    ctx.with_session(|session| {
        session.rename_task(&task_id, &params.title)?;
        let title = session.state().routine.task(&task_id)?.title.clone();
        Ok(RenameTaskResponse {
            message: format!("✏️ Renamed task to '{}'", title),
        })
    })
}

fn parse_task_id(input: &str) -> Result<TaskId, DomainError> {
    TaskId::from_string(input).map_err(|_| DomainError::Validation {
        message: format!("'{}' is not a valid task id", input),
    })
}
