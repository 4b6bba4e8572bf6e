//! RPC providers used to talk to the cluster.
mod solana;
pub use solana::*;
