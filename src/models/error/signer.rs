use serde::Serialize;
use thiserror::Error;

/// Errors raised while resolving key material or producing signatures.
///
/// All variants are permanent: they are raised before anything reaches the network.
#[derive(Error, Debug, Serialize, PartialEq)]
pub enum SignerError {
    #[error("Failed to sign transaction: {0}")]
    SigningError(String),

    #[error("Invalid key format: {0}")]
    KeyError(String),

    #[error("Missing signer for required account {0}")]
    MissingSigner(String),

    #[error("Signer {0} is not required by the transaction")]
    UnexpectedSigner(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}
