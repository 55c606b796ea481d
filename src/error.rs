// Error taxonomy for store operations

use crate::models::TaskId;

/// Errors returned by [`crate::TaskStore`] operations
///
/// None of these leave the store partially mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Missing or malformed input to `add`
    #[error("invalid task: {0}")]
    Validation(String),

    /// `toggle` or `remove` referenced an id the store does not hold
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// Filter value other than all/pending/completed
    #[error("invalid filter: {0:?} (expected all, pending or completed)")]
    InvalidFilter(String),
}

impl StoreError {
    /// Not-found errors usually come from redundant UI events
    pub fn is_ignorable(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
