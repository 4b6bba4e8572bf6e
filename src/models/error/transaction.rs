use crate::services::provider::SolanaProviderError;

use super::{InstructionError, SignerError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
pub enum TransactionError {
    #[error("Instruction encoding error: {0}")]
    Encoding(#[from] InstructionError),

    #[error("Signer error: {0}")]
    Signing(#[from] SignerError),

    #[error("Underlying Solana provider error: {0}")]
    UnderlyingSolanaProvider(#[from] SolanaProviderError),

    #[error("Transaction {signature} was rejected: {reason}")]
    Rejected { signature: String, reason: String },

    #[error("Could not confirm transaction {signature} after {attempts} attempts")]
    Unconfirmed { signature: String, attempts: u32 },
}
