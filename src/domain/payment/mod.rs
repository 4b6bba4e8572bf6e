//! Payment requests: creation, payment URL encoding and one-time verification.
use std::{str::FromStr, sync::Arc};

use chrono::Utc;
use log::{debug, info, warn};
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use uuid::Uuid;

use crate::{
    models::{
        CreatePaymentRequest, CreatePaymentResponse, PaymentError, PaymentRequestModel,
        PaymentStatus,
    },
    repositories::PaymentRepository,
    services::provider::SolanaProviderTrait,
    utils::{poll_with_backoff, BackoffPolicy, PollOutcome, PollStep},
};

mod url;
pub use url::*;

mod validation;
pub use validation::*;

pub struct PaymentService<PR, P>
where
    PR: PaymentRepository,
    P: SolanaProviderTrait,
{
    repository: Arc<PR>,
    provider: Arc<P>,
}

impl<PR, P> PaymentService<PR, P>
where
    PR: PaymentRepository,
    P: SolanaProviderTrait,
{
    pub fn new(repository: Arc<PR>, provider: Arc<P>) -> Self {
        Self {
            repository,
            provider,
        }
    }

    /// Registers a new payment request under a fresh reference key.
    pub async fn create_request(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<CreatePaymentResponse, PaymentError> {
        request.validate()?;

        let model = PaymentRequestModel {
            id: Uuid::new_v4().to_string(),
            reference: Keypair::new().pubkey(),
            recipient: request.recipient_pubkey()?,
            amount: request.amount,
            memo: request.memo,
            label: request.label,
            message: request.message,
            created_at: Utc::now().to_rfc3339(),
        };
        let url = encode_transfer_url(&model)?;

        let model = self.repository.create(model).await?;
        info!(
            "Created payment request {} for {} SOL to {}",
            model.reference, model.amount, model.recipient
        );

        Ok(CreatePaymentResponse {
            reference: model.reference.to_string(),
            url: url.to_string(),
        })
    }

    /// Checks the chain for a transfer settling the request under `reference`.
    ///
    /// A request is reported `Verified` at most once: the entry is removed with a
    /// compare-and-delete, so a repeated or racing call sees `NotFound`.
    pub async fn verify(&self, reference: &str) -> Result<PaymentStatus, PaymentError> {
        let reference = Pubkey::from_str(reference.trim())
            .map_err(|e| PaymentError::Validation(format!("invalid reference {reference}: {e}")))?;

        let Some(request) = self.repository.get_by_reference(&reference).await? else {
            debug!("No pending payment request for {}", reference);
            return Ok(PaymentStatus::NotFound);
        };

        let signatures = self.provider.find_reference_signatures(&reference).await?;
        if signatures.is_empty() {
            debug!("No transaction references {} yet", reference);
            return Ok(PaymentStatus::NotFound);
        }

        // anyone can list the reference, so a non-matching transaction must not hide a later one
        let mut settled_by = None;
        for signature in signatures {
            let fetched = self.provider.get_transaction(&signature).await?;
            match validate_transfer(&request, &fetched) {
                Ok(()) => {
                    settled_by = Some(signature);
                    break;
                }
                Err(e) => warn!("Transaction {} for payment {}: {}", signature, reference, e),
            }
        }
        let Some(signature) = settled_by else {
            return Ok(PaymentStatus::NotFound);
        };

        match self
            .repository
            .remove_if_matches(&reference, &request.id)
            .await?
        {
            Some(_) => {
                info!("Payment {} verified by {}", reference, signature);
                Ok(PaymentStatus::Verified)
            }
            None => {
                debug!("Payment {} was verified concurrently", reference);
                Ok(PaymentStatus::NotFound)
            }
        }
    }

    /// Repeats [`Self::verify`] with backoff until the payment is verified.
    ///
    /// Provider failures count as inconclusive checks. An invalid reference
    /// fails immediately.
    pub async fn await_verification(
        &self,
        reference: &str,
        policy: &BackoffPolicy,
    ) -> Result<PaymentStatus, PaymentError> {
        let outcome = poll_with_backoff(policy, "payment verification", |_| async move {
            match self.verify(reference).await {
                Ok(PaymentStatus::Verified) => PollStep::Ready(PaymentStatus::Verified),
                Ok(PaymentStatus::NotFound) => PollStep::Pending,
                Err(e @ PaymentError::Validation(_)) => PollStep::Abort(e),
                Err(e) => {
                    warn!("Payment {} check failed: {}", reference, e);
                    PollStep::Pending
                }
            }
        })
        .await?;

        match outcome {
            PollOutcome::Ready { value, .. } => Ok(value),
            PollOutcome::Exhausted { attempts } => Err(PaymentError::Unverified {
                reference: reference.to_string(),
                attempts,
            }),
        }
    }
}
