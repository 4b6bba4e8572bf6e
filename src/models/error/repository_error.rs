use thiserror::Error;

use super::ApiError;

#[derive(Debug, Error, PartialEq)]
pub enum RepositoryError {
    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::ConstraintViolation(msg) => ApiError::InternalError(msg),
        }
    }
}
