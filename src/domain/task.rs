/// Task entity for the daily checklist
///
/// A task is one line of the morning routine ("Make bed", "Drink water").
/// Its `completed` flag only means something for the current, uncommitted day.

use serde::{Deserialize, Serialize};
use crate::domain::{DomainError, TaskId};

/// Longest title accepted for a task
pub const MAX_TITLE_LEN: usize = 100;

/// One item of the morning routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned at creation
    pub id: TaskId,
    /// Display label (e.g., "Move body (5 min)")
    pub title: String,
    /// Checked off today
    pub completed: bool,
    /// 1-based position within the routine
    pub order: u32,
}

impl Task {
    /// Create a new, unchecked task with a fresh id
    pub fn new(title: impl Into<String>, order: u32) -> Result<Self, DomainError> {
        Self::with_id(TaskId::new(), title, order)
    }

    /// Create an unchecked task keeping an existing id (routine editing)
    pub fn with_id(id: TaskId, title: impl Into<String>, order: u32) -> Result<Self, DomainError> {
        let title = Self::validate_title(&title.into())?;
        Ok(Self {
            id,
            title,
            completed: false,
            order,
        })
    }

    /// Change the title, validating it first
    pub fn rename(&mut self, title: &str) -> Result<(), DomainError> {
        self.title = Self::validate_title(title)?;
        Ok(())
    }

    /// Check a title and return its trimmed form
    pub(crate) fn validate_title(title: &str) -> Result<String, DomainError> {
        let trimmed = title.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidTaskTitle(
                "Task title cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::InvalidTaskTitle(format!(
                "Task title cannot be longer than {} characters",
                MAX_TITLE_LEN
            )));
        }

        Ok(trimmed.to_string())
    }
}

/// A task as submitted by the routine editor
///
/// `id` is `None` for tasks added during the edit; existing tasks keep theirs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub id: Option<TaskId>,
    pub title: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self { id: None, title: title.into() }
    }

    pub fn existing(id: TaskId, title: impl Into<String>) -> Self {
        Self { id: Some(id), title: title.into() }
    }
}
