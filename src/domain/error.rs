//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The stage group is outside the valid range.
    #[error("invalid stage group {0}, expected a group of 1 or greater")]
    InvalidGroup(u32),
}
