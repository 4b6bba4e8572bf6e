//! # Services Module
//!
//! External integrations: the Solana RPC provider and transaction signers.

pub mod provider;
pub mod signer;
