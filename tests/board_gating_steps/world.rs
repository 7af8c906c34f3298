//! Shared world state for board gating BDD scenarios.

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::domain::TaskView;
use taskboard::store::{TaskStore, TaskStoreResult};

/// Scenario world for board gating behaviour tests.
pub struct BoardWorld {
    /// Store under test.
    pub store: TaskStore<DefaultClock>,
    /// Outcome of the most recent creation attempt.
    pub last_create: Option<TaskStoreResult<TaskView>>,
    /// Outcome of the most recent completion attempt.
    pub last_complete: Option<TaskStoreResult<TaskView>>,
}

impl BoardWorld {
    /// Creates a world with an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: TaskStore::new(DefaultClock),
            last_create: None,
            last_complete: None,
        }
    }

    /// Titles of the currently active tasks, in collection order.
    #[must_use]
    pub fn active_titles(&self) -> Vec<String> {
        self.store
            .get_active()
            .into_iter()
            .map(|view| view.title)
            .collect()
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}
