//! Payment request constants.
use solana_sdk::pubkey::Pubkey;

/// URL scheme of transfer request links.
pub const SOLANA_PAY_SCHEME: &str = "solana";

/// SPL Memo program (v2).
pub const MEMO_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr");

/// Maximum signatures fetched when searching transactions by reference.
pub const REFERENCE_SIGNATURE_LIMIT: usize = 1000;
