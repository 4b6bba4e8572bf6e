use serde::Serialize;
use thiserror::Error;

/// Errors produced while encoding or decoding vault instruction payloads.
#[derive(Error, Debug, Serialize, PartialEq, Eq)]
pub enum InstructionError {
    #[error("Unknown instruction tag: {0}")]
    UnknownTag(u8),

    #[error("Unknown vault operation: {0}")]
    UnknownOperation(String),

    #[error("Amount {0} exceeds the u64 range")]
    AmountOutOfRange(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid instruction data length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Withdraw instruction carries a non-zero amount: {0}")]
    UnexpectedAmount(u64),
}
