//! Read-only projections returned by store queries.

use super::{StageGroup, Task, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a task as exposed to consumers.
///
/// Views are plain copies constructed per query; mutating a view has no
/// effect on the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Unique task identifier.
    pub id: TaskId,
    /// Task title, unique across the board.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Persona the task is aimed at.
    pub persona: String,
    /// Stage group the task belongs to.
    pub group: StageGroup,
    /// Whether the task has been completed.
    pub completed: bool,
    /// Whether the task occupies an in-progress slot.
    pub assigned: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            persona: task.persona().to_owned(),
            group: task.group(),
            completed: task.is_completed(),
            assigned: task.is_assigned(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Tally of tasks per board column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCounts {
    /// Tasks neither completed nor assigned.
    pub todo: usize,
    /// Tasks currently assigned as in progress.
    pub in_progress: usize,
    /// Completed tasks.
    pub completed: usize,
}
