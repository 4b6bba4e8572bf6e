mod solana;
pub use solana::*;
