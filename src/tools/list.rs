/// Tool for showing today's checklist
///
/// This module implements the routine_tasks MCP tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::StateStore;
use crate::tools::ToolContext;
use crate::ServerError;

/// Parameters for listing tasks (none needed)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListTasksParams {}

/// One checklist line
#[derive(Debug, Serialize)]
pub struct TaskLine {
    pub task_id: String,
    pub title: String,
    pub completed: bool,
    pub order: u32,
}

/// Response from listing tasks
#[derive(Debug, Serialize)]
pub struct ListTasksResponse {
    pub date: String,
    pub tasks: Vec<TaskLine>,
    pub done: usize,
    pub total: usize,
    pub completed_today: bool,
    pub message: String,
}

/// List today's tasks with their checked state
pub fn list_tasks<S: StateStore>(
    ctx: &ToolContext<'_, S>,
    _params: ListTasksParams,
) -> Result<ListTasksResponse, ServerError> {
    ctx.with_session(|session| {
        let routine = &session.state().routine;
        let tasks: Vec<TaskLine> = routine
            .tasks()
            .iter()
            .map(|t| TaskLine {
                task_id: t.id.to_string(),
                title: t.title.clone(),
                completed: t.completed,
                order: t.order,
            })
            .collect();

        let done = routine.completed_count();
        let total = routine.len();
        let completed_today = session.completed_today();

        let header = if completed_today {
            format!("🎉 {}: morning already won!", session.today())
        } else if routine.is_complete() {
            format!("{}: all {} done, ready to complete the morning", session.today(), total)
        } else {
            format!("{}: {}/{} done", session.today(), done, total)
        };
        let lines = tasks
            .iter()
            .map(|t| {
                format!(
                    "{}. [{}] {} ({})",
                    t.order,
                    if t.completed { "x" } else { " " },
                    t.title,
                    t.task_id
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(ListTasksResponse {
            date: session.today().to_string(),
            message: format!("{}\n\n{}", header, lines),
            tasks,
            done,
            total,
            completed_today,
        })
    })
}
