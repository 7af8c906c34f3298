//! Task aggregate and its creation and update parameter objects.

use super::{StageGroup, TaskDomainError, TaskId};
use crate::seed::SeedTask;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A single task on the board.
///
/// Fields are private; consumers read tasks through
/// [`TaskView`](super::TaskView) snapshots and mutate them only through
/// the store, which keeps the assignment marker from ever going stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    persona: String,
    group: StageGroup,
    completed: bool,
    assigned: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task from a validated draft.
    pub(crate) fn new(id: TaskId, draft: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            title: draft.title,
            description: draft.description,
            persona: draft.persona,
            group: draft.group,
            completed: false,
            assigned: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Builds a task from a trusted seed record.
    pub(crate) fn from_seed(id: TaskId, record: SeedTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            title: record.title,
            description: record.description,
            persona: record.persona,
            group: record.group,
            completed: false,
            assigned: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the persona the task is aimed at.
    #[must_use]
    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Returns the stage group the task belongs to.
    #[must_use]
    pub const fn group(&self) -> StageGroup {
        self.group
    }

    /// Whether the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the task currently occupies an in-progress slot.
    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.assigned
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Marks the task completed.
    pub(crate) fn mark_completed(&mut self, clock: &impl Clock) {
        self.completed = true;
        self.touch(clock);
    }

    /// Sets the transient in-progress marker.
    ///
    /// Only the store's assignment recompute calls this; the marker is
    /// derived state, never caller input.
    pub(crate) const fn set_assigned(&mut self, assigned: bool) {
        self.assigned = assigned;
    }

    /// Merges the patch fields into the task.
    ///
    /// The patch title must already be validated and normalised.
    pub(crate) fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(persona) = patch.persona {
            self.persona = persona;
        }
        if let Some(group) = patch.group {
            self.group = group;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Validates and normalises a task title.
pub(crate) fn validated_title(raw: &str) -> Result<String, TaskDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

/// Validated draft for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    persona: String,
    group: StageGroup,
}

impl NewTask {
    /// Creates a draft with a validated title and stage group.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank
    /// after trimming and [`TaskDomainError::InvalidGroup`] when the
    /// stage group is zero.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        persona: impl Into<String>,
        group: u32,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: validated_title(&title.into())?,
            description: description.into(),
            persona: persona.into(),
            group: StageGroup::new(group)?,
        })
    }

    /// Returns the draft title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the stage group the draft targets.
    #[must_use]
    pub const fn group(&self) -> StageGroup {
        self.group
    }
}

/// Partial update for an existing task.
///
/// Unset fields leave the task unchanged. A patch may set `completed`
/// directly; stage gating binds creation and completion, not updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) persona: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) group: Option<StageGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) completed: Option<bool>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the task title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the persona.
    #[must_use]
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// Moves the task to another stage group.
    #[must_use]
    pub const fn with_group(mut self, group: StageGroup) -> Self {
        self.group = Some(group);
        self
    }

    /// Sets the completion flag directly.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Whether the patch carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.persona.is_none()
            && self.group.is_none()
            && self.completed.is_none()
    }
}
