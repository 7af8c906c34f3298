//! In-memory task store with stage gating and slot assignment.
//!
//! The store is the sole authority mutating task state. Every mutating
//! operation recomputes the assignment marker before it returns, so reads
//! never observe a stale `assigned` flag. Failed operations leave the
//! collection unchanged.

use std::collections::BTreeSet;

use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{
    BoardCounts, NewTask, StageGroup, Task, TaskDomainError, TaskId, TaskPatch, TaskView,
    validated_title,
};
use crate::seed::SeedTask;

/// Number of in-progress slots in the active stage.
const ASSIGNMENT_SLOTS: usize = 2;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Errors returned by task store operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskStoreError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// No task carries the given identifier.
    #[error("no task with id {0}")]
    NotFound(TaskId),

    /// No task carries the given title.
    #[error("no task titled \"{0}\"")]
    UnknownTitle(String),

    /// Another task already carries the given title.
    #[error("a task titled \"{0}\" already exists")]
    DuplicateTitle(String),

    /// A lower stage still holds incomplete tasks.
    #[error("stage {group} is gated: all tasks in lower stages must be completed first")]
    GatingViolation {
        /// Stage the rejected operation targeted.
        group: StageGroup,
    },
}

/// In-memory task collection and assignment authority.
///
/// The store is an explicitly owned value meant to be held by a single
/// caller; all operations are synchronous and run to completion.
#[derive(Debug)]
pub struct TaskStore<C> {
    tasks: Vec<Task>,
    next_id: u64,
    clock: C,
}

impl<C> TaskStore<C>
where
    C: Clock,
{
    /// Creates an empty store using the given clock.
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            clock,
        }
    }

    /// Replaces the collection with the given seed list.
    ///
    /// Seeded tasks receive identifiers `1..=n` in seed order and start
    /// uncompleted; assignment is recomputed for the new collection. The
    /// seed is trusted input, so there are no error conditions.
    pub fn initialize<I>(&mut self, seed: I)
    where
        I: IntoIterator<Item = SeedTask>,
    {
        self.tasks.clear();
        self.next_id = 1;
        for record in seed {
            let id = self.allocate_id();
            let task = Task::from_seed(id, record, &self.clock);
            self.tasks.push(task);
        }
        self.assign_tasks();
        info!(count = self.tasks.len(), "task collection initialised");
    }

    /// Returns a snapshot of every task, in collection order.
    #[must_use]
    pub fn get_all(&self) -> Vec<TaskView> {
        self.tasks.iter().map(TaskView::from).collect()
    }

    /// Returns the tasks currently assigned and not completed.
    #[must_use]
    pub fn get_active(&self) -> Vec<TaskView> {
        self.tasks
            .iter()
            .filter(|task| !task.is_completed() && task.is_assigned())
            .map(TaskView::from)
            .collect()
    }

    /// Returns the completed tasks.
    #[must_use]
    pub fn get_completed(&self) -> Vec<TaskView> {
        self.tasks
            .iter()
            .filter(|task| task.is_completed())
            .map(TaskView::from)
            .collect()
    }

    /// Tallies the three board columns.
    #[must_use]
    pub fn counts(&self) -> BoardCounts {
        let mut counts = BoardCounts::default();
        for task in &self.tasks {
            if task.is_completed() {
                counts.completed += 1;
            } else if task.is_assigned() {
                counts.in_progress += 1;
            } else {
                counts.todo += 1;
            }
        }
        counts
    }

    /// Adds a new task to the board and returns its snapshot.
    ///
    /// Creation into stage 1 is never gated; creation into a higher stage
    /// requires every task in lower stages to be completed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::GatingViolation`] when a lower stage
    /// still holds incomplete tasks and [`TaskStoreError::DuplicateTitle`]
    /// when the title is already taken. The collection is unchanged on
    /// failure.
    pub fn create(&mut self, draft: NewTask) -> TaskStoreResult<TaskView> {
        let group = draft.group();
        if group > StageGroup::FIRST && !self.lower_stages_completed(group) {
            warn!(%group, "task creation rejected: lower stages incomplete");
            return Err(TaskStoreError::GatingViolation { group });
        }
        self.ensure_title_free(draft.title(), None)?;

        let id = self.allocate_id();
        let task = Task::new(id, draft, &self.clock);
        debug!(%id, %group, title = task.title(), "task created");
        self.tasks.push(task);
        self.assign_tasks();
        self.view_of(id)
    }

    /// Merges the patch into the task with the given identifier and
    /// returns the updated snapshot.
    ///
    /// A patch may set `completed` directly; stage gating binds
    /// [`complete`](Self::complete), not updates.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the identifier is
    /// unknown, [`TaskDomainError::EmptyTitle`] (wrapped) when the
    /// patched title is blank, and [`TaskStoreError::DuplicateTitle`]
    /// when the patched title collides with another task. The collection
    /// is unchanged on failure.
    pub fn update(&mut self, id: TaskId, mut patch: TaskPatch) -> TaskStoreResult<TaskView> {
        if !self.tasks.iter().any(|task| task.id() == id) {
            warn!(%id, "task update rejected: unknown id");
            return Err(TaskStoreError::NotFound(id));
        }

        if let Some(raw) = patch.title.take() {
            let title = validated_title(&raw)?;
            self.ensure_title_free(&title, Some(id))?;
            patch.title = Some(title);
        }

        if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) {
            task.apply(patch, &self.clock);
        }
        debug!(%id, "task updated");
        self.assign_tasks();
        self.view_of(id)
    }

    /// Marks the task with the given title as completed and returns its
    /// snapshot.
    ///
    /// Completing an already-completed task succeeds without change.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::UnknownTitle`] when no task carries the
    /// title and [`TaskStoreError::GatingViolation`] when a lower stage
    /// still holds incomplete tasks. The task is unchanged in both cases.
    pub fn complete(&mut self, title: &str) -> TaskStoreResult<TaskView> {
        let Some((id, group)) = self
            .tasks
            .iter()
            .find(|task| task.title() == title)
            .map(|task| (task.id(), task.group()))
        else {
            warn!(title, "task completion rejected: unknown title");
            return Err(TaskStoreError::UnknownTitle(title.to_owned()));
        };

        if !self.lower_stages_completed(group) {
            warn!(title, %group, "task completion rejected: lower stages incomplete");
            return Err(TaskStoreError::GatingViolation { group });
        }

        if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == id) {
            task.mark_completed(&self.clock);
        }
        debug!(%id, title, "task completed");
        self.assign_tasks();
        self.view_of(id)
    }

    /// Removes the task with the given identifier.
    ///
    /// Deleting an unknown identifier is a silent no-op. Assignment is
    /// recomputed either way, so a freed slot passes to the next
    /// incomplete task of the active stage.
    pub fn delete(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        if self.tasks.len() == before {
            debug!(%id, "task delete ignored: unknown id");
        } else {
            debug!(%id, "task deleted");
        }
        self.assign_tasks();
    }

    /// Hands out the next identifier; identifiers are never reused.
    const fn allocate_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Rejects a title already carried by a task other than `exempt`.
    fn ensure_title_free(&self, title: &str, exempt: Option<TaskId>) -> TaskStoreResult<()> {
        let taken = self
            .tasks
            .iter()
            .any(|task| Some(task.id()) != exempt && task.title() == title);
        if taken {
            warn!(title, "title rejected: already in use");
            return Err(TaskStoreError::DuplicateTitle(title.to_owned()));
        }
        Ok(())
    }

    /// Snapshot of the task with the given identifier.
    fn view_of(&self, id: TaskId) -> TaskStoreResult<TaskView> {
        self.tasks
            .iter()
            .find(|task| task.id() == id)
            .map(TaskView::from)
            .ok_or(TaskStoreError::NotFound(id))
    }

    /// Recomputes the in-progress marker for the whole collection.
    ///
    /// The lowest stage holding incomplete tasks receives up to
    /// [`ASSIGNMENT_SLOTS`] assigned tasks in collection order; every
    /// other task ends up unassigned. A fully completed board assigns
    /// nothing.
    fn assign_tasks(&mut self) {
        for task in &mut self.tasks {
            task.set_assigned(false);
        }

        let groups: BTreeSet<StageGroup> = self.tasks.iter().map(Task::group).collect();
        let Some(active) = groups
            .into_iter()
            .find(|group| !self.stage_completed(*group))
        else {
            return;
        };

        for task in self
            .tasks
            .iter_mut()
            .filter(|task| task.group() == active && !task.is_completed())
            .take(ASSIGNMENT_SLOTS)
        {
            task.set_assigned(true);
        }
    }

    /// Whether every task of the given stage is completed.
    fn stage_completed(&self, group: StageGroup) -> bool {
        self.tasks
            .iter()
            .filter(|task| task.group() == group)
            .all(Task::is_completed)
    }

    /// Whether every task in stages strictly below the given one is
    /// completed.
    fn lower_stages_completed(&self, group: StageGroup) -> bool {
        self.tasks
            .iter()
            .filter(|task| task.group() < group)
            .all(Task::is_completed)
    }
}
