//! Solana signer implementations.
//!
//! Every signer exposes its public key and signs raw message bytes. The
//! transaction assembler decides which signature goes where.
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::models::SignerError;

mod local_signer;
pub use local_signer::*;

#[async_trait]
#[cfg_attr(test, automock)]
/// Trait defining Solana signing operations.
pub trait SolanaSignTrait: Sync + Send {
    /// Returns the public key of the signer.
    async fn pubkey(&self) -> Result<Pubkey, SignerError>;

    /// Signs a message using the Solana ed25519 signing scheme.
    ///
    /// # Arguments
    ///
    /// * `message` - The serialized message bytes to sign
    async fn sign(&self, message: &[u8]) -> Result<Signature, SignerError>;
}
