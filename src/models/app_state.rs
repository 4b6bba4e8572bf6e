//! Application state shared by every HTTP handler.
use std::sync::Arc;

use actix_web::web::ThinData;

use crate::{
    repositories::{InMemoryPaymentRepository, PaymentRepository},
    services::provider::{SolanaProvider, SolanaProviderTrait},
};

#[derive(Debug)]
pub struct AppState<PR, P>
where
    PR: PaymentRepository + Send + Sync + 'static,
    P: SolanaProviderTrait + Send + Sync + 'static,
{
    pub payment_repository: Arc<PR>,
    pub provider: Arc<P>,
}

impl<PR, P> Clone for AppState<PR, P>
where
    PR: PaymentRepository + Send + Sync + 'static,
    P: SolanaProviderTrait + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            payment_repository: Arc::clone(&self.payment_repository),
            provider: Arc::clone(&self.provider),
        }
    }
}

pub type DefaultAppState = AppState<InMemoryPaymentRepository, SolanaProvider>;

pub type ThinDataAppState<PR, P> = ThinData<AppState<PR, P>>;
