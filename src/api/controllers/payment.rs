//! Payment request controller.
//!
//! Handlers are generic over the repository and provider so they can be
//! exercised with mocks.
use actix_web::HttpResponse;
use log::info;

use crate::{
    domain::PaymentService,
    models::{
        ApiError, ApiResponse, CreatePaymentRequest, PaymentStatus, PaymentStatusResponse,
        ThinDataAppState,
    },
    repositories::PaymentRepository,
    services::provider::SolanaProviderTrait,
};

fn payment_service<PR, P>(state: &ThinDataAppState<PR, P>) -> PaymentService<PR, P>
where
    PR: PaymentRepository + Send + Sync + 'static,
    P: SolanaProviderTrait + Send + Sync + 'static,
{
    PaymentService::new(state.payment_repository.clone(), state.provider.clone())
}

/// Creates a payment request and returns its reference and payment URL.
pub async fn create_payment<PR, P>(
    request: CreatePaymentRequest,
    state: ThinDataAppState<PR, P>,
) -> Result<HttpResponse, ApiError>
where
    PR: PaymentRepository + Send + Sync + 'static,
    P: SolanaProviderTrait + Send + Sync + 'static,
{
    let response = payment_service(&state).create_request(request).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Verifies the payment request identified by `reference`.
///
/// Responds `200 {"status":"verified"}` once per request and
/// `404 {"status":"not found"}` otherwise.
pub async fn verify_payment<PR, P>(
    reference: String,
    state: ThinDataAppState<PR, P>,
) -> Result<HttpResponse, ApiError>
where
    PR: PaymentRepository + Send + Sync + 'static,
    P: SolanaProviderTrait + Send + Sync + 'static,
{
    let status = payment_service(&state).verify(&reference).await?;
    info!("Payment {} status: {}", reference, status);

    let body = PaymentStatusResponse::from(status);
    Ok(match status {
        PaymentStatus::Verified => HttpResponse::Ok().json(body),
        PaymentStatus::NotFound => HttpResponse::NotFound().json(body),
    })
}
