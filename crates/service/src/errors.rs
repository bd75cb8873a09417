use thiserror::Error;

/// Failures surfaced by an `EnrollmentStore`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("duplicate key: email {0} is already enrolled")]
    DuplicateEmail(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn required(field: &str) -> Self { Self::Validation(format!("{} is required", field)) }
}
