//! Transaction signers.
mod solana;
pub use solana::*;
