//! Create, pay and verify a request end to end against the in-process ledger.
use std::{str::FromStr, sync::Arc, time::Duration};

use actix_web::{body::to_bytes, http::StatusCode, web::ThinData};
use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;
use vault_client::{
    api::controllers::payment::{create_payment, verify_payment},
    domain::PaymentService,
    models::{AppState, CreatePaymentRequest, PaymentError, PaymentStatus},
    repositories::{InMemoryPaymentRepository, PaymentRepository},
    utils::BackoffPolicy,
};

use super::common::provider::LedgerProvider;

fn payment(recipient: &Pubkey, amount: &str, memo: Option<&str>) -> CreatePaymentRequest {
    CreatePaymentRequest {
        recipient: recipient.to_string(),
        amount: Decimal::from_str(amount).unwrap(),
        memo: memo.map(str::to_string),
        label: Some("Station 3".to_string()),
        message: None,
    }
}

fn create_state() -> ThinData<AppState<InMemoryPaymentRepository, LedgerProvider>> {
    ThinData(AppState {
        payment_repository: Arc::new(InMemoryPaymentRepository::new()),
        provider: Arc::new(LedgerProvider::new()),
    })
}

async fn status_of(response: actix_web::HttpResponse) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body = to_bytes(response.into_body()).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[actix_web::test]
async fn test_paid_request_verifies_exactly_once() {
    let state = create_state();
    let recipient = Pubkey::new_unique();

    let request = payment(&recipient, "1.5", Some("charge-7"));
    let response = create_payment(request, state.clone()).await.unwrap();
    let (_, body) = status_of(response).await;
    let reference = body["data"]["reference"].as_str().unwrap().to_string();

    let response = verify_payment(reference.clone(), state.clone()).await.unwrap();
    let (status, body) = status_of(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "not found");

    state.provider.record_transfer(
        &recipient,
        &Pubkey::from_str(&reference).unwrap(),
        1_500_000_000,
        Some("charge-7"),
    );

    let response = verify_payment(reference.clone(), state.clone()).await.unwrap();
    let (status, body) = status_of(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "status": "verified" }));

    let (status, _) = status_of(verify_payment(reference, state.clone()).await.unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(state.payment_repository.count().await.unwrap(), 0);
}

#[actix_web::test]
async fn test_underpaid_request_stays_pending() {
    let state = create_state();
    let recipient = Pubkey::new_unique();
    let response = create_payment(payment(&recipient, "2", None), state.clone())
        .await
        .unwrap();
    let (_, body) = status_of(response).await;
    let reference = body["data"]["reference"].as_str().unwrap().to_string();

    state.provider.record_transfer(
        &recipient,
        &Pubkey::from_str(&reference).unwrap(),
        1_999_999_999,
        None,
    );

    let (status, _) = status_of(verify_payment(reference, state.clone()).await.unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(state.payment_repository.count().await.unwrap(), 1);
}

#[actix_web::test]
async fn test_decoy_transfer_does_not_block_payment() {
    let state = create_state();
    let recipient = Pubkey::new_unique();
    let response = create_payment(payment(&recipient, "0.25", None), state.clone())
        .await
        .unwrap();
    let (_, body) = status_of(response).await;
    let reference = body["data"]["reference"].as_str().unwrap().to_string();
    let reference_key = Pubkey::from_str(&reference).unwrap();

    // someone who saw the payment link tags a dust transfer with the reference first
    state
        .provider
        .record_transfer(&recipient, &reference_key, 1, None);
    state
        .provider
        .record_transfer(&recipient, &reference_key, 250_000_000, None);

    let response = verify_payment(reference, state.clone()).await.unwrap();
    let (status, body) = status_of(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "verified");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_verifications_have_one_winner() {
    let repository = Arc::new(InMemoryPaymentRepository::new());
    let provider = Arc::new(LedgerProvider::new());
    let service = Arc::new(PaymentService::new(
        Arc::clone(&repository),
        Arc::clone(&provider),
    ));
    let recipient = Pubkey::new_unique();
    let created = service
        .create_request(payment(&recipient, "0.01", None))
        .await
        .unwrap();
    provider.record_transfer(
        &recipient,
        &Pubkey::from_str(&created.reference).unwrap(),
        10_000_000,
        None,
    );

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let service = Arc::clone(&service);
            let reference = created.reference.clone();
            tokio::spawn(async move { service.verify(&reference).await.unwrap() })
        })
        .collect();

    let mut verified = 0;
    for handle in handles {
        if handle.await.unwrap() == PaymentStatus::Verified {
            verified += 1;
        }
    }
    assert_eq!(verified, 1);
}

#[tokio::test(start_paused = true)]
async fn test_await_verification_gives_up() {
    let service = PaymentService::new(
        Arc::new(InMemoryPaymentRepository::new()),
        Arc::new(LedgerProvider::new()),
    );
    let created = service
        .create_request(payment(&Pubkey::new_unique(), "1", None))
        .await
        .unwrap();
    let policy = BackoffPolicy::new(5, Duration::from_secs(1), Duration::from_secs(15));

    let result = service.await_verification(&created.reference, &policy).await;

    assert!(matches!(
        result,
        Err(PaymentError::Unverified { attempts: 5, .. })
    ));
}
