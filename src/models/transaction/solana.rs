use serde::{Deserialize, Serialize};
use solana_sdk::transaction::VersionedTransaction;
use strum::Display;

/// On-chain status of a submitted Solana transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SolanaTransactionStatus {
    Processed,
    Confirmed,
    Finalized,
    Failed,
}

impl SolanaTransactionStatus {
    /// Whether the status satisfies `confirmed` commitment without an execution error.
    pub fn is_confirmed(&self) -> bool {
        matches!(
            self,
            SolanaTransactionStatus::Confirmed | SolanaTransactionStatus::Finalized
        )
    }
}

/// A confirmed transaction fetched from the cluster together with its execution result.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedTransaction {
    pub transaction: VersionedTransaction,
    /// `None` when the transaction executed successfully.
    pub error: Option<String>,
}
