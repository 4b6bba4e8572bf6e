//! Submission and confirmation polling.
//!
//! ```text
//! Submitted ──poll──> Polling { attempts } ──┬──> Confirmed { attempts }
//!                                            ├──> Rejected { attempts }
//!                                            └──> Exhausted { attempts }
//! ```
//!
//! Provider errors and `processed` statuses are inconclusive: the poller
//! backs off and asks again until the attempt ceiling. Only a confirmed
//! status or an on-chain failure ends polling early.
//!
//! Submission follows the same schedule: a transient send failure resends
//! the same signed transaction, a permanent one is returned at once.
use std::sync::Arc;

use log::{debug, info, warn};
use solana_sdk::{signature::Signature, transaction::Transaction};

use crate::{
    models::{SolanaTransactionStatus, TransactionError},
    services::provider::{SolanaProviderError, SolanaProviderTrait},
    utils::{poll_with_backoff, BackoffPolicy, PollOutcome, PollStep},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    Submitted,
    Polling { attempts: u32 },
    Confirmed { attempts: u32 },
    Rejected { attempts: u32 },
    Exhausted { attempts: u32 },
}

impl ConfirmationState {
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            ConfirmationState::Confirmed { .. } | ConfirmationState::Rejected { .. }
        )
    }
}

/// Handle to a transaction that has been handed to the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    signature: Signature,
    state: ConfirmationState,
}

impl PendingTransaction {
    pub fn new(signature: Signature) -> Self {
        Self {
            signature,
            state: ConfirmationState::Submitted,
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn state(&self) -> ConfirmationState {
        self.state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Confirmed {
        signature: Signature,
        status: SolanaTransactionStatus,
        attempts: u32,
    },
    Exhausted {
        signature: Signature,
        attempts: u32,
    },
}

impl ConfirmationOutcome {
    /// Maps exhaustion to `TransactionError::Unconfirmed`.
    pub fn into_result(self) -> Result<Signature, TransactionError> {
        match self {
            ConfirmationOutcome::Confirmed { signature, .. } => Ok(signature),
            ConfirmationOutcome::Exhausted {
                signature,
                attempts,
            } => Err(TransactionError::Unconfirmed {
                signature: signature.to_string(),
                attempts,
            }),
        }
    }
}

pub struct ConfirmationPoller<P>
where
    P: SolanaProviderTrait + Send + Sync + 'static,
{
    provider: Arc<P>,
    policy: BackoffPolicy,
}

impl<P> ConfirmationPoller<P>
where
    P: SolanaProviderTrait + Send + Sync + 'static,
{
    pub fn new(provider: Arc<P>, policy: BackoffPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn policy(&self) -> &BackoffPolicy {
        &self.policy
    }

    /// Sends a signed transaction, resending it while the provider reports transient errors.
    ///
    /// The signature does not change between sends, so a resend can never land twice.
    /// Running out of attempts yields `TransactionError::Unconfirmed`.
    pub async fn submit(
        &self,
        transaction: &Transaction,
    ) -> Result<PendingTransaction, TransactionError> {
        let provider = &self.provider;

        let outcome = poll_with_backoff(&self.policy, "transaction submission", |attempt| async move {
            match provider.send_transaction(transaction).await {
                Ok(signature) => PollStep::Ready(signature),
                Err(e) if is_resendable(&e) => {
                    warn!("Send attempt {} failed, resending: {}", attempt, e);
                    PollStep::Pending
                }
                Err(e) => PollStep::Abort(TransactionError::from(e)),
            }
        })
        .await?;

        match outcome {
            PollOutcome::Ready {
                value: signature,
                attempts,
            } => {
                info!(
                    "Submitted transaction {} after {} attempt(s)",
                    signature, attempts
                );
                Ok(PendingTransaction::new(signature))
            }
            PollOutcome::Exhausted { attempts } => {
                let signature = transaction.signatures.first().copied().unwrap_or_default();
                warn!(
                    "Could not submit transaction {} after {} attempts",
                    signature, attempts
                );
                Err(TransactionError::Unconfirmed {
                    signature: signature.to_string(),
                    attempts,
                })
            }
        }
    }

    /// Polls until the transaction is confirmed, rejected or the attempt ceiling is hit.
    ///
    /// Polling an already confirmed handle returns immediately without a query.
    /// Polling an exhausted handle starts a fresh round of attempts.
    pub async fn poll(
        &self,
        pending: &mut PendingTransaction,
    ) -> Result<ConfirmationOutcome, TransactionError> {
        let signature = pending.signature;

        match pending.state {
            ConfirmationState::Confirmed { attempts } => {
                return Ok(ConfirmationOutcome::Confirmed {
                    signature,
                    status: SolanaTransactionStatus::Confirmed,
                    attempts,
                });
            }
            ConfirmationState::Rejected { .. } => {
                return Err(rejected(&signature));
            }
            _ => {}
        }

        pending.state = ConfirmationState::Polling { attempts: 0 };
        let state = &mut pending.state;
        let provider = &self.provider;

        let outcome = poll_with_backoff(&self.policy, "transaction confirmation", |attempt| {
            *state = ConfirmationState::Polling { attempts: attempt };
            async move {
                match provider.get_transaction_status(&signature).await {
                    Ok(status) if status.is_confirmed() => PollStep::Ready(status),
                    Ok(SolanaTransactionStatus::Failed) => PollStep::Abort(attempt),
                    Ok(status) => {
                        debug!("Transaction {} is {}, not yet confirmed", signature, status);
                        PollStep::Pending
                    }
                    Err(e) => {
                        warn!("Status check for {} was inconclusive: {}", signature, e);
                        PollStep::Pending
                    }
                }
            }
        })
        .await;

        match outcome {
            Ok(PollOutcome::Ready {
                value: status,
                attempts,
            }) => {
                pending.state = ConfirmationState::Confirmed { attempts };
                info!(
                    "Transaction {} {} after {} attempt(s)",
                    signature, status, attempts
                );
                Ok(ConfirmationOutcome::Confirmed {
                    signature,
                    status,
                    attempts,
                })
            }
            Ok(PollOutcome::Exhausted { attempts }) => {
                pending.state = ConfirmationState::Exhausted { attempts };
                warn!(
                    "Could not confirm transaction {} after {} attempts ({:?} of backoff)",
                    signature,
                    attempts,
                    self.policy.total_backoff()
                );
                Ok(ConfirmationOutcome::Exhausted {
                    signature,
                    attempts,
                })
            }
            Err(attempts) => {
                pending.state = ConfirmationState::Rejected { attempts };
                warn!("Transaction {} failed on-chain", signature);
                Err(rejected(&signature))
            }
        }
    }

    /// Submits and polls, collapsing the outcome to the signature or an error.
    pub async fn submit_and_confirm(
        &self,
        transaction: &Transaction,
    ) -> Result<Signature, TransactionError> {
        let mut pending = self.submit(transaction).await?;
        self.poll(&mut pending).await?.into_result()
    }
}

/// An expired blockhash is transient for a fresh build, but resending the
/// same bytes can never succeed.
fn is_resendable(error: &SolanaProviderError) -> bool {
    error.is_transient() && !matches!(error, SolanaProviderError::BlockhashNotFound(_))
}

fn rejected(signature: &Signature) -> TransactionError {
    TransactionError::Rejected {
        signature: signature.to_string(),
        reason: "transaction failed on-chain".to_string(),
    }
}
