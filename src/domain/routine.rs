/// Today's checklist
///
/// RoutineState knows nothing about streaks or dates. It holds the ordered
/// task list and answers one question: is everything checked off?

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use crate::domain::{DomainError, Task, TaskDraft, TaskId};

/// Titles of the routine a fresh install starts with
pub const DEFAULT_TASK_TITLES: [&str; 5] = [
    "Wake up (on time)",
    "Make bed",
    "Drink water",
    "Move body (5 min)",
    "No phone (10 min)",
];

/// The ordered task list for the current day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineState {
    tasks: Vec<Task>,
}

impl RoutineState {
    /// Build a routine from titles, in the given order
    pub fn new<I, S>(titles: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let drafts = titles.into_iter().map(TaskDraft::new).collect();
        Ok(Self { tasks: Self::build_tasks(&HashSet::new(), drafts)? })
    }

    /// All tasks in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks checked off so far today
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Look up a task by id
    pub fn task(&self, id: &TaskId) -> Result<&Task, DomainError> {
        self.tasks
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| DomainError::TaskNotFound { task_id: id.to_string() })
    }

    /// Flip the completed flag of a task
    ///
    /// An unknown id is a no-op and returns `false`: a tap can land just
    /// after the routine was edited or reset, and that must not fail.
    pub fn toggle_task(&mut self, id: &TaskId) -> bool {
        match self.tasks.iter_mut().find(|t| &t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => {
                tracing::debug!("Ignoring toggle for unknown task {}", id);
                false
            }
        }
    }

    /// True iff the list is non-empty and every task is checked off
    pub fn is_complete(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| t.completed)
    }

    /// Uncheck every task. Idempotent.
    pub fn reset_day(&mut self) {
        for task in &mut self.tasks {
            task.completed = false;
        }
    }

    /// Replace the whole task list (routine editor)
    ///
    /// `order` follows the position in `drafts`, drafts without an id get a
    /// fresh one and every task starts unchecked. A draft id must belong to
    /// a task of the current routine. On error the current list is left as
    /// it was.
    pub fn replace_tasks(&mut self, drafts: Vec<TaskDraft>) -> Result<(), DomainError> {
        let known: HashSet<TaskId> = self.tasks.iter().map(|t| t.id.clone()).collect();
        let tasks = Self::build_tasks(&known, drafts)?;
        tracing::debug!("Routine replaced with {} tasks", tasks.len());
        self.tasks = tasks;
        Ok(())
    }

    /// Change the title of one task
    pub fn rename_task(&mut self, id: &TaskId, title: &str) -> Result<(), DomainError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| DomainError::TaskNotFound { task_id: id.to_string() })?;
        task.rename(title)
    }

    /// Ids are never reused: a draft may only keep an id from `known`
    fn build_tasks(known: &HashSet<TaskId>, drafts: Vec<TaskDraft>) -> Result<Vec<Task>, DomainError> {
        if drafts.is_empty() {
            return Err(DomainError::Validation {
                message: "A routine needs at least one task".to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(drafts.len());
        for (index, draft) in drafts.into_iter().enumerate() {
            let id = match draft.id {
                Some(id) if !known.contains(&id) => {
                    return Err(DomainError::TaskNotFound { task_id: id.to_string() });
                }
                Some(id) => id,
                None => TaskId::new(),
            };
            if !seen.insert(id.clone()) {
                return Err(DomainError::Validation {
                    message: format!("Task id {} appears more than once", id),
                });
            }
            tasks.push(Task::with_id(id, draft.title, index as u32 + 1)?);
        }

        Ok(tasks)
    }
}

impl Default for RoutineState {
    fn default() -> Self {
        let tasks = DEFAULT_TASK_TITLES
            .iter()
            .enumerate()
            .map(|(index, title)| Task {
                id: TaskId::new(),
                title: (*title).to_string(),
                completed: false,
                order: index as u32 + 1,
            })
            .collect();
        Self { tasks }
    }
}
