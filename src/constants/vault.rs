//! Wire layout of vault program instructions.

pub const DEPOSIT_TAG: u8 = 0;

pub const WITHDRAW_TAG: u8 = 1;

/// One tag byte followed by a little-endian `u64` amount.
pub const VAULT_INSTRUCTION_LEN: usize = 9;

/// Airdrop requested by the demo before depositing (1 SOL).
pub const DEFAULT_AIRDROP_LAMPORTS: u64 = 1_000_000_000;

/// Data size of a vault account: the running deposit total as a `u64`.
pub const VAULT_ACCOUNT_SPACE: usize = 8;
