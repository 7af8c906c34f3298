//! Seed data for the initial task board.
//!
//! The seed is external data: an ordered list of task records loaded when
//! the store is initialised. A built-in onboarding list is provided, and
//! arbitrary seed lists can be parsed from JSON documents.

use crate::domain::StageGroup;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One record of the ordered seed list.
///
/// Seed records are trusted input; titles are expected to be unique
/// across the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTask {
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Persona the task is aimed at.
    pub persona: String,
    /// Stage group; validated on deserialisation.
    pub group: StageGroup,
}

/// Error returned when a seed document cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid seed document: {0}")]
pub struct SeedError(#[from] serde_json::Error);

/// Parses an ordered seed list from a JSON array.
///
/// # Errors
///
/// Returns [`SeedError`] when the document is not valid JSON or a record
/// fails validation (for example a stage group of zero).
pub fn from_json(json: &str) -> Result<Vec<SeedTask>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Stage literals for the built-in seed, checked at compile time.
const STAGE_ONE: StageGroup = StageGroup::FIRST;
const STAGE_TWO: StageGroup = stage(2);
const STAGE_THREE: StageGroup = stage(3);
const STAGE_FOUR: StageGroup = stage(4);

/// Converts a literal into a stage group; an invalid literal fails the
/// const evaluation above at compile time.
const fn stage(value: u32) -> StageGroup {
    match StageGroup::new(value) {
        Ok(group) => group,
        Err(_) => panic!("seed stage literals must be 1 or greater"),
    }
}

/// Returns the built-in onboarding seed list.
///
/// The list walks a new starter through four stages: environment setup,
/// a first guided fix, independent feature work, and the wrap-up demo.
#[must_use]
pub fn default_tasks() -> Vec<SeedTask> {
    [
        (
            "Set up the development environment",
            "Install the toolchain, clone the repository and run the test suite once.",
            STAGE_ONE,
        ),
        (
            "Read the contribution guide",
            "Work through the contribution guide and note anything unclear.",
            STAGE_ONE,
        ),
        (
            "Fix a starter bug",
            "Pick an issue labelled good-first-issue and fix it on a branch.",
            STAGE_TWO,
        ),
        (
            "Write tests for the fix",
            "Cover the fixed behaviour with regression tests.",
            STAGE_TWO,
        ),
        (
            "Open the first pull request",
            "Push the branch and open a pull request against the main branch.",
            STAGE_TWO,
        ),
        (
            "Implement a small feature",
            "Take a scoped feature request from the backlog and implement it.",
            STAGE_THREE,
        ),
        (
            "Review a teammate's pull request",
            "Leave a full review on an open pull request.",
            STAGE_THREE,
        ),
        (
            "Update the user documentation",
            "Document the new feature in the user guide.",
            STAGE_THREE,
        ),
        (
            "Demo the feature",
            "Present the finished feature at the weekly demo.",
            STAGE_FOUR,
        ),
        (
            "Write the retrospective notes",
            "Summarise what went well and what to improve.",
            STAGE_FOUR,
        ),
    ]
    .into_iter()
    .map(|(title, description, group)| SeedTask {
        title: title.to_owned(),
        description: description.to_owned(),
        persona: "Intern".to_owned(),
        group,
    })
    .collect()
}
