use thiserror::Error;

use crate::services::provider::SolanaProviderError;

use super::{ApiError, RepositoryError};

/// Errors raised by the payment request flow.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Invalid payment request: {0}")]
    Validation(String),

    #[error("Transfer does not match the payment request: {0}")]
    TransferMismatch(String),

    #[error("Could not verify payment {reference} after {attempts} attempts")]
    Unverified { reference: String, attempts: u32 },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Underlying Solana provider error: {0}")]
    UnderlyingSolanaProvider(#[from] SolanaProviderError),
}

impl From<PaymentError> for ApiError {
    fn from(error: PaymentError) -> Self {
        match error {
            PaymentError::Validation(msg) => ApiError::BadRequest(msg),
            PaymentError::Repository(err) => err.into(),
            err @ (PaymentError::TransferMismatch(_)
            | PaymentError::Unverified { .. }
            | PaymentError::UnderlyingSolanaProvider(_)) => ApiError::InternalError(err.to_string()),
        }
    }
}
