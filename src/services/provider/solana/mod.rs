//! Solana Provider Module
//!
//! This module provides an abstraction layer over the Solana RPC client,
//! offering the operations the vault client and the payment flow need, such
//! as fetching the latest blockhash, sending transactions, reading signature
//! statuses, requesting airdrops and looking up transfers by reference key.
//!
//! The provider uses the non-blocking `RpcClient` and classifies every
//! failure into a [`SolanaProviderError`] so callers can tell transient
//! errors from permanent ones.
use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use mockall::automock;
use serde::Serialize;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_client::GetConfirmedSignaturesForAddress2Config,
    rpc_config::RpcTransactionConfig,
};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};
use solana_transaction_status::UiTransactionEncoding;
use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;

use crate::{
    config::RpcConfig,
    constants::REFERENCE_SIGNATURE_LIMIT,
    models::{FetchedTransaction, SolanaTransactionStatus},
};

/// Matches error patterns ignoring case and whitespace, so that
/// "blockhash not found" also matches "BlockhashNotFound".
fn matches_error_pattern(error_msg: &str, pattern: &str) -> bool {
    let normalized_msg = error_msg.to_lowercase().replace(' ', "");
    let normalized_pattern = pattern.to_lowercase().replace(' ', "");
    normalized_msg.contains(&normalized_pattern)
}

/// Errors that can occur when interacting with the Solana provider.
///
/// Use `is_transient()` to determine if an error should be retried.
#[derive(Error, Debug, Serialize, PartialEq)]
pub enum SolanaProviderError {
    /// Network/IO error (transient - connection issues, timeouts)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// RPC protocol error (transient - node lag, sync pending)
    #[error("RPC error: {0}")]
    RpcError(String),

    /// HTTP request error with status code (transient/permanent based on status code)
    #[error("Request error (HTTP {status_code}): {error}")]
    RequestError { error: String, status_code: u16 },

    /// Network configuration error (permanent - bad URL, unsupported operations)
    #[error("Network configuration error: {0}")]
    NetworkConfiguration(String),

    /// Insufficient funds for transaction (permanent)
    #[error("Insufficient funds for transaction: {0}")]
    InsufficientFunds(String),

    /// Blockhash not found or expired (transient - can rebuild with fresh blockhash)
    #[error("Blockhash not found or expired: {0}")]
    BlockhashNotFound(String),

    /// Invalid transaction structure or execution (permanent)
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Transaction already processed (permanent - duplicate)
    #[error("Transaction already processed: {0}")]
    AlreadyProcessed(String),
}

impl SolanaProviderError {
    /// Determines if this error is transient (can retry) or permanent (should fail).
    ///
    /// **Transient:** `NetworkError`, `RpcError`, `BlockhashNotFound` and
    /// `RequestError` with a retriable status code (5xx, 408, 425, 429).
    ///
    /// **Permanent:** everything else.
    pub fn is_transient(&self) -> bool {
        match self {
            SolanaProviderError::NetworkError(_) => true,
            SolanaProviderError::RpcError(_) => true,
            SolanaProviderError::BlockhashNotFound(_) => true,

            SolanaProviderError::RequestError { status_code, .. } => match *status_code {
                // Not Implemented, HTTP Version Not Supported
                501 | 505 => false,
                500 | 502..=504 | 506..=599 => true,
                408 | 425 | 429 => true,
                _ => false,
            },

            SolanaProviderError::InsufficientFunds(_) => false,
            SolanaProviderError::InvalidTransaction(_) => false,
            SolanaProviderError::AlreadyProcessed(_) => false,
            SolanaProviderError::NetworkConfiguration(_) => false,
        }
    }

    /// Classifies a Solana RPC client error into the appropriate error variant.
    pub fn from_rpc_error(error: ClientError) -> Self {
        match error.kind() {
            ClientErrorKind::Io(_) => SolanaProviderError::NetworkError(error.to_string()),

            ClientErrorKind::Reqwest(reqwest_err) => {
                if let Some(status) = reqwest_err.status() {
                    SolanaProviderError::RequestError {
                        error: error.to_string(),
                        status_code: status.as_u16(),
                    }
                } else {
                    // connection refused, timeout
                    SolanaProviderError::NetworkError(error.to_string())
                }
            }

            ClientErrorKind::RpcError(rpc_err) => {
                let rpc_err_str = format!("{rpc_err}");
                Self::from_rpc_response_error(&rpc_err_str, &error)
            }

            ClientErrorKind::TransactionError(tx_error) => {
                Self::from_transaction_error(tx_error, &error)
            }

            ClientErrorKind::Custom(msg) => Self::from_rpc_response_error(msg, &error),

            _ => SolanaProviderError::RpcError(error.to_string()),
        }
    }

    /// Classifies RPC response errors using JSON-RPC error codes and messages.
    ///
    /// Transient: `-32004`, `-32005`, `-32008`, `-32014`, `-32016`.
    /// Permanent: `-32002` (unless the simulation failed on the blockhash),
    /// `-32003`, `-32007`, `-32009`, `-32010`, `-32013`, `-32015`, `-32602`.
    fn from_rpc_response_error(rpc_err: &str, full_error: &ClientError) -> Self {
        let message = full_error.to_string();

        if rpc_err.contains("-32002") {
            if matches_error_pattern(rpc_err, "blockhash not found") {
                SolanaProviderError::BlockhashNotFound(message)
            } else if matches_error_pattern(rpc_err, "insufficient funds") {
                SolanaProviderError::InsufficientFunds(message)
            } else {
                SolanaProviderError::InvalidTransaction(message)
            }
        } else if ["-32004", "-32005", "-32014", "-32016"]
            .iter()
            .any(|code| rpc_err.contains(code))
        {
            SolanaProviderError::RpcError(message)
        } else if rpc_err.contains("-32008") {
            SolanaProviderError::BlockhashNotFound(message)
        } else if rpc_err.contains("-32009") {
            SolanaProviderError::AlreadyProcessed(message)
        } else if ["-32007", "-32010"].iter().any(|code| rpc_err.contains(code)) {
            SolanaProviderError::NetworkConfiguration(message)
        } else if ["-32003", "-32013", "-32015", "-32602"]
            .iter()
            .any(|code| rpc_err.contains(code))
        {
            SolanaProviderError::InvalidTransaction(message)
        } else if matches_error_pattern(rpc_err, "insufficient funds") {
            SolanaProviderError::InsufficientFunds(message)
        } else if matches_error_pattern(rpc_err, "blockhash not found") {
            SolanaProviderError::BlockhashNotFound(message)
        } else if matches_error_pattern(rpc_err, "already processed") {
            SolanaProviderError::AlreadyProcessed(message)
        } else {
            SolanaProviderError::RpcError(message)
        }
    }

    fn from_transaction_error(
        tx_error: &solana_sdk::transaction::TransactionError,
        full_error: &ClientError,
    ) -> Self {
        use solana_sdk::transaction::TransactionError as TxErr;

        match tx_error {
            TxErr::InsufficientFundsForFee | TxErr::InsufficientFundsForRent { .. } => {
                SolanaProviderError::InsufficientFunds(full_error.to_string())
            }

            TxErr::BlockhashNotFound => {
                SolanaProviderError::BlockhashNotFound(full_error.to_string())
            }

            TxErr::AlreadyProcessed => {
                SolanaProviderError::AlreadyProcessed(full_error.to_string())
            }

            TxErr::SignatureFailure
            | TxErr::MissingSignatureForFee
            | TxErr::InvalidAccountForFee
            | TxErr::AccountNotFound
            | TxErr::InvalidAccountIndex
            | TxErr::InvalidProgramForExecution
            | TxErr::ProgramAccountNotFound
            | TxErr::InstructionError(_, _)
            | TxErr::InvalidWritableAccount
            | TxErr::TooManyAccountLocks => {
                SolanaProviderError::InvalidTransaction(full_error.to_string())
            }

            _ => SolanaProviderError::RpcError(full_error.to_string()),
        }
    }
}

impl From<String> for SolanaProviderError {
    fn from(s: String) -> Self {
        SolanaProviderError::RpcError(s)
    }
}

/// A trait that abstracts the Solana RPC operations used by this crate.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait SolanaProviderTrait: Send + Sync {
    /// Retrieves the balance (in lamports) of an account.
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, SolanaProviderError>;

    /// Retrieves the minimum balance required for rent exemption for the given data size.
    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_size: usize,
    ) -> Result<u64, SolanaProviderError>;

    /// Retrieves the latest blockhash.
    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError>;

    /// Sends a signed transaction to the cluster.
    async fn send_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, SolanaProviderError>;

    /// Reads the status of a transaction. A signature the cluster has not seen
    /// yet is reported as an error.
    async fn get_transaction_status(
        &self,
        signature: &Signature,
    ) -> Result<SolanaTransactionStatus, SolanaProviderError>;

    /// Requests an airdrop of `lamports` to `recipient` (dev and test clusters only).
    async fn request_airdrop(
        &self,
        recipient: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, SolanaProviderError>;

    /// Lists the successful transactions that include `reference` among their accounts,
    /// oldest first.
    async fn find_reference_signatures(
        &self,
        reference: &Pubkey,
    ) -> Result<Vec<Signature>, SolanaProviderError>;

    /// Fetches and decodes a transaction by signature.
    async fn get_transaction(
        &self,
        signature: &Signature,
    ) -> Result<FetchedTransaction, SolanaProviderError>;
}

pub struct SolanaProvider {
    client: RpcClient,
    timeout: Duration,
    commitment: CommitmentConfig,
}

impl fmt::Debug for SolanaProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolanaProvider")
            .field("url", &self.client.url())
            .field("timeout", &self.timeout)
            .field("commitment", &self.commitment)
            .finish()
    }
}

impl SolanaProvider {
    pub fn new(config: &RpcConfig) -> Result<Self, SolanaProviderError> {
        Self::new_with_commitment(config, CommitmentConfig::confirmed())
    }

    /// Creates a provider with a custom commitment level.
    ///
    /// # Errors
    ///
    /// Returns `SolanaProviderError::NetworkConfiguration` if the RPC URL is
    /// not a valid HTTP(S) URL.
    pub fn new_with_commitment(
        config: &RpcConfig,
        commitment: CommitmentConfig,
    ) -> Result<Self, SolanaProviderError> {
        config
            .validate()
            .map_err(|e| SolanaProviderError::NetworkConfiguration(format!("Invalid URL: {e}")))?;

        let timeout = Duration::from_secs(config.timeout_seconds);
        let client =
            RpcClient::new_with_timeout_and_commitment(config.url.clone(), timeout, commitment);

        Ok(Self {
            client,
            timeout,
            commitment,
        })
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.commitment
    }
}

#[async_trait]
impl SolanaProviderTrait for SolanaProvider {
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, SolanaProviderError> {
        self.client
            .get_balance(address)
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_size: usize,
    ) -> Result<u64, SolanaProviderError> {
        self.client
            .get_minimum_balance_for_rent_exemption(data_size)
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError> {
        debug!("Fetching latest blockhash");
        self.client
            .get_latest_blockhash()
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn send_transaction(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, SolanaProviderError> {
        debug!(
            "Sending transaction with {} signature(s)",
            transaction.signatures.len()
        );
        self.client
            .send_transaction(transaction)
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn get_transaction_status(
        &self,
        signature: &Signature,
    ) -> Result<SolanaTransactionStatus, SolanaProviderError> {
        let result = self
            .client
            .get_signature_statuses_with_history(&[*signature])
            .await
            .map_err(SolanaProviderError::from_rpc_error)?;

        match result.value.first() {
            Some(Some(status)) => {
                if status.err.is_some() {
                    Ok(SolanaTransactionStatus::Failed)
                } else if status.satisfies_commitment(CommitmentConfig::finalized()) {
                    Ok(SolanaTransactionStatus::Finalized)
                } else if status.satisfies_commitment(CommitmentConfig::confirmed()) {
                    Ok(SolanaTransactionStatus::Confirmed)
                } else {
                    Ok(SolanaTransactionStatus::Processed)
                }
            }
            _ => Err(SolanaProviderError::RpcError(format!(
                "Transaction confirmation status not available for {signature}"
            ))),
        }
    }

    async fn request_airdrop(
        &self,
        recipient: &Pubkey,
        lamports: u64,
    ) -> Result<Signature, SolanaProviderError> {
        debug!("Requesting airdrop of {lamports} lamports to {recipient}");
        self.client
            .request_airdrop(recipient, lamports)
            .await
            .map_err(SolanaProviderError::from_rpc_error)
    }

    async fn find_reference_signatures(
        &self,
        reference: &Pubkey,
    ) -> Result<Vec<Signature>, SolanaProviderError> {
        let config = GetConfirmedSignaturesForAddress2Config {
            before: None,
            until: None,
            limit: Some(REFERENCE_SIGNATURE_LIMIT),
            commitment: Some(self.commitment),
        };

        let signatures = self
            .client
            .get_signatures_for_address_with_config(reference, config)
            .await
            .map_err(SolanaProviderError::from_rpc_error)?;

        // newest first
        signatures
            .iter()
            .rev()
            .filter(|entry| entry.err.is_none())
            .map(|entry| {
                Signature::from_str(&entry.signature).map_err(|e| {
                    SolanaProviderError::InvalidTransaction(format!(
                        "Invalid signature {}: {e}",
                        entry.signature
                    ))
                })
            })
            .collect()
    }

    async fn get_transaction(
        &self,
        signature: &Signature,
    ) -> Result<FetchedTransaction, SolanaProviderError> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Base64),
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(0),
        };

        let encoded = self
            .client
            .get_transaction_with_config(signature, config)
            .await
            .map_err(SolanaProviderError::from_rpc_error)?;

        let transaction = encoded.transaction.transaction.decode().ok_or_else(|| {
            SolanaProviderError::InvalidTransaction(format!(
                "Could not decode transaction {signature}"
            ))
        })?;

        let error = match encoded.transaction.meta {
            Some(meta) => meta.err.map(|err| err.to_string()),
            None => Some("transaction status metadata unavailable".to_string()),
        };

        Ok(FetchedTransaction { transaction, error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_client::rpc_request::{RpcError, RpcRequest};

    fn create_test_rpc_config() -> RpcConfig {
        RpcConfig::new("http://127.0.0.1:8899".to_string())
    }

    fn create_mock_client_error() -> ClientError {
        ClientError::new_with_request(
            ClientErrorKind::RpcError(RpcError::RpcRequestError("test".to_string())),
            RpcRequest::GetHealth,
        )
    }

    #[test]
    fn test_new_with_valid_config() {
        let provider = SolanaProvider::new(&create_test_rpc_config()).unwrap();

        assert_eq!(provider.timeout, Duration::from_secs(30));
        assert_eq!(provider.commitment(), CommitmentConfig::confirmed());
    }

    #[test]
    fn test_new_with_commitment() {
        let provider = SolanaProvider::new_with_commitment(
            &create_test_rpc_config(),
            CommitmentConfig::finalized(),
        )
        .unwrap();

        assert_eq!(provider.commitment(), CommitmentConfig::finalized());
    }

    #[test]
    fn test_new_with_invalid_url() {
        let config = RpcConfig::new("invalid-url".to_string());

        let result = SolanaProvider::new(&config);

        assert!(matches!(
            result,
            Err(SolanaProviderError::NetworkConfiguration(_))
        ));
    }

    #[test]
    fn test_debug_shows_url() {
        let provider = SolanaProvider::new(&create_test_rpc_config()).unwrap();
        let debug = format!("{provider:?}");
        assert!(debug.contains("127.0.0.1:8899"));
    }

    #[test]
    fn test_from_string_for_solana_provider_error() {
        let err: SolanaProviderError = "some rpc error".to_string().into();
        assert_eq!(err, SolanaProviderError::RpcError("some rpc error".to_string()));
    }

    #[test]
    fn test_matches_error_pattern() {
        assert!(matches_error_pattern(
            "BLOCKHASH NOT FOUND",
            "blockhash not found"
        ));
        assert!(matches_error_pattern(
            "BlockhashNotFound",
            "blockhash not found"
        ));
        assert!(matches_error_pattern(
            "error: insufficient   funds for transaction",
            "insufficient funds"
        ));
        assert!(!matches_error_pattern("account not found", "blockhash not found"));
        assert!(!matches_error_pattern("", "blockhash not found"));
    }

    #[test]
    fn test_is_transient() {
        assert!(SolanaProviderError::NetworkError("timeout".into()).is_transient());
        assert!(SolanaProviderError::RpcError("node is behind".into()).is_transient());
        assert!(SolanaProviderError::BlockhashNotFound("expired".into()).is_transient());

        assert!(!SolanaProviderError::InsufficientFunds("balance".into()).is_transient());
        assert!(!SolanaProviderError::InvalidTransaction("signature".into()).is_transient());
        assert!(!SolanaProviderError::AlreadyProcessed("duplicate".into()).is_transient());
        assert!(!SolanaProviderError::NetworkConfiguration("url".into()).is_transient());
    }

    #[test]
    fn test_request_error_transience_by_status_code() {
        let request_error = |status_code| SolanaProviderError::RequestError {
            error: "http".to_string(),
            status_code,
        };

        for code in [500, 502, 503, 504, 408, 425, 429] {
            assert!(request_error(code).is_transient(), "{code} should be transient");
        }
        for code in [400, 401, 404, 501, 505, 302] {
            assert!(!request_error(code).is_transient(), "{code} should be permanent");
        }
    }

    #[test]
    fn test_from_rpc_response_error_simulation_failed() {
        let mock_error = create_mock_client_error();

        let result = SolanaProviderError::from_rpc_response_error(
            "-32002: Transaction simulation failed: Blockhash not found",
            &mock_error,
        );
        assert!(matches!(result, SolanaProviderError::BlockhashNotFound(_)));

        let result = SolanaProviderError::from_rpc_response_error(
            "-32002: Transaction simulation failed: insufficient funds",
            &mock_error,
        );
        assert!(matches!(result, SolanaProviderError::InsufficientFunds(_)));

        let result = SolanaProviderError::from_rpc_response_error(
            "-32002: Transaction simulation failed: invalid instruction data",
            &mock_error,
        );
        assert!(matches!(result, SolanaProviderError::InvalidTransaction(_)));
    }

    #[test]
    fn test_from_rpc_response_error_codes() {
        let mock_error = create_mock_client_error();
        let classify =
            |msg: &str| SolanaProviderError::from_rpc_response_error(msg, &mock_error);

        assert!(matches!(classify("-32003: sig"), SolanaProviderError::InvalidTransaction(_)));
        assert!(matches!(classify("-32004: block"), SolanaProviderError::RpcError(_)));
        assert!(matches!(classify("-32005: behind"), SolanaProviderError::RpcError(_)));
        assert!(matches!(
            classify("-32007: skipped"),
            SolanaProviderError::NetworkConfiguration(_)
        ));
        assert!(matches!(
            classify("-32008: blockhash"),
            SolanaProviderError::BlockhashNotFound(_)
        ));
        assert!(matches!(
            classify("-32009: processed"),
            SolanaProviderError::AlreadyProcessed(_)
        ));
        assert!(matches!(
            classify("-32010: excluded"),
            SolanaProviderError::NetworkConfiguration(_)
        ));
        assert!(matches!(classify("-32014: pending"), SolanaProviderError::RpcError(_)));
        assert!(matches!(
            classify("-32015: version"),
            SolanaProviderError::InvalidTransaction(_)
        ));
        assert!(matches!(classify("-32016: slot"), SolanaProviderError::RpcError(_)));
        assert!(matches!(
            classify("-32602: params"),
            SolanaProviderError::InvalidTransaction(_)
        ));
        assert!(matches!(classify("-39999: unknown"), SolanaProviderError::RpcError(_)));
    }

    #[test]
    fn test_from_rpc_response_error_message_fallback() {
        let mock_error = create_mock_client_error();

        let result = SolanaProviderError::from_rpc_response_error(
            r#"{"code": -32000, "message": "Transaction was already processed"}"#,
            &mock_error,
        );
        assert!(matches!(result, SolanaProviderError::AlreadyProcessed(_)));

        let result = SolanaProviderError::from_rpc_response_error(
            r#"{"code": -32000, "message": "Account has insufficient funds"}"#,
            &mock_error,
        );
        assert!(matches!(result, SolanaProviderError::InsufficientFunds(_)));
    }

    #[test]
    fn test_from_rpc_error_transaction_error() {
        use solana_sdk::transaction::TransactionError as TxErr;

        let error = ClientError::from(ClientErrorKind::TransactionError(
            TxErr::InsufficientFundsForFee,
        ));
        assert!(matches!(
            SolanaProviderError::from_rpc_error(error),
            SolanaProviderError::InsufficientFunds(_)
        ));

        let error = ClientError::from(ClientErrorKind::TransactionError(TxErr::AccountInUse));
        assert!(SolanaProviderError::from_rpc_error(error).is_transient());
    }

    #[test]
    fn test_from_rpc_error_custom_uses_message_classification() {
        let error = ClientError::from(ClientErrorKind::Custom(
            "blockhash not found".to_string(),
        ));
        assert!(matches!(
            SolanaProviderError::from_rpc_error(error),
            SolanaProviderError::BlockhashNotFound(_)
        ));
    }
}
