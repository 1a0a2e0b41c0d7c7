use thiserror::Error;

/// Rejected seminar draft: the named field was empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("seminar {field} must not be empty")]
pub struct DraftError {
    pub field: &'static str,
}

impl DraftError {
    pub fn empty(field: &'static str) -> Self {
        Self { field }
    }
}
