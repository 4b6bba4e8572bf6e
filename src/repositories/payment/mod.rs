//! Payment request repository.
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use solana_sdk::pubkey::Pubkey;

use crate::models::{PaymentRequestModel, RepositoryError};

mod payment_in_memory;
pub use payment_in_memory::*;

#[async_trait]
#[cfg_attr(test, automock)]
pub trait PaymentRepository: Send + Sync {
    /// Stores a new request. Fails if its reference is already registered.
    async fn create(
        &self,
        request: PaymentRequestModel,
    ) -> Result<PaymentRequestModel, RepositoryError>;

    async fn get_by_reference(
        &self,
        reference: &Pubkey,
    ) -> Result<Option<PaymentRequestModel>, RepositoryError>;

    /// Atomically removes the request stored under `reference` if its id is `id`.
    ///
    /// Returns the removed request, or `None` if the entry was missing or had
    /// already been replaced. Of several concurrent callers at most one gets `Some`.
    async fn remove_if_matches(
        &self,
        reference: &Pubkey,
        id: &str,
    ) -> Result<Option<PaymentRequestModel>, RepositoryError>;

    async fn count(&self) -> Result<usize, RepositoryError>;
}
