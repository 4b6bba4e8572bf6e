//! In-memory payment request registry backed by a `DashMap`.
use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};
use solana_sdk::pubkey::Pubkey;

use crate::models::{PaymentRequestModel, RepositoryError};

use super::PaymentRepository;

#[derive(Debug, Default)]
pub struct InMemoryPaymentRepository {
    store: DashMap<Pubkey, PaymentRequestModel>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn create(
        &self,
        request: PaymentRequestModel,
    ) -> Result<PaymentRequestModel, RepositoryError> {
        match self.store.entry(request.reference) {
            Entry::Occupied(_) => Err(RepositoryError::ConstraintViolation(format!(
                "Payment request with reference {} already exists",
                request.reference
            ))),
            Entry::Vacant(entry) => {
                entry.insert(request.clone());
                Ok(request)
            }
        }
    }

    async fn get_by_reference(
        &self,
        reference: &Pubkey,
    ) -> Result<Option<PaymentRequestModel>, RepositoryError> {
        Ok(self.store.get(reference).map(|entry| entry.value().clone()))
    }

    async fn remove_if_matches(
        &self,
        reference: &Pubkey,
        id: &str,
    ) -> Result<Option<PaymentRequestModel>, RepositoryError> {
        Ok(self
            .store
            .remove_if(reference, |_, request| request.id == id)
            .map(|(_, request)| request))
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.store.len())
    }
}
