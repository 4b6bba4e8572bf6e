//! # Solana Local Signer
//!
//! Signs with an ed25519 keypair held in memory. Keypairs are loaded from the
//! JSON byte-array files produced by `solana-keygen` (or the `create_keypair`
//! helper). Intended for development clusters and the CLI demo.
use std::path::Path;

use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature},
    signer::Signer,
};

use crate::models::SignerError;

use super::SolanaSignTrait;

pub struct LocalSigner {
    keypair: Keypair,
}

impl std::fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSigner")
            .field("pubkey", &self.keypair.pubkey())
            .finish()
    }
}

impl LocalSigner {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Loads a keypair file.
    ///
    /// # Errors
    ///
    /// Returns `SignerError::KeyError` if the file is missing or not a keypair.
    pub fn from_keypair_file(path: impl AsRef<Path>) -> Result<Self, SignerError> {
        let path = path.as_ref();
        let keypair = read_keypair_file(path).map_err(|e| {
            SignerError::KeyError(format!(
                "failed to read keypair from {}: {e}",
                path.display()
            ))
        })?;

        Ok(Self::new(keypair))
    }

    /// Builds a signer from the 64-byte secret key encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignerError> {
        let keypair = Keypair::try_from(bytes)
            .map_err(|e| SignerError::KeyError(format!("invalid keypair bytes: {e}")))?;

        Ok(Self::new(keypair))
    }

    /// Public key, available without awaiting.
    pub fn address(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

#[async_trait]
impl SolanaSignTrait for LocalSigner {
    async fn pubkey(&self) -> Result<Pubkey, SignerError> {
        Ok(self.keypair.pubkey())
    }

    async fn sign(&self, message: &[u8]) -> Result<Signature, SignerError> {
        self.keypair
            .try_sign_message(message)
            .map_err(|e| SignerError::SigningError(format!("failed to sign message: {e}")))
    }
}
