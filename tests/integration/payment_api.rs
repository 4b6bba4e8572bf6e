//! HTTP surface mounted the way the server mounts it.
use actix_web::{http::StatusCode, test, web, App};
use solana_sdk::pubkey::Pubkey;
use vault_client::{
    api::routes::configure_routes,
    bootstrap::initialize_app_state,
    config::ServerConfig,
    constants::API_SCOPE,
};

fn server_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        // unreachable on purpose; none of these requests reach the chain
        rpc_url: "http://127.0.0.1:1".to_string(),
        rpc_timeout_seconds: 1,
        confirmation_max_attempts: 25,
        confirmation_initial_backoff_ms: 1000,
        confirmation_max_backoff_ms: 15000,
        vault_program_id: None,
    }
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .app_data(initialize_app_state(&server_config()).unwrap())
                .service(web::scope(API_SCOPE).configure(configure_routes)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/api/v1/health")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "OK");
}

#[actix_web::test]
async fn test_create_then_lookup_unpaid_request() {
    let app = init_app!();
    let recipient = Pubkey::new_unique();

    let req = test::TestRequest::post()
        .uri("/api/v1/payments")
        .set_json(serde_json::json!({
            "recipient": recipient.to_string(),
            "amount": 0.75,
            "memo": "charge-19",
            "message": "Thanks for charging"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let reference = body["data"]["reference"].as_str().unwrap().to_string();
    let url = body["data"]["url"].as_str().unwrap();
    assert!(url.starts_with(&format!("solana:{recipient}?amount=0.75&reference={reference}")));
    assert!(url.contains("message=Thanks+for+charging"));
    assert!(url.contains("memo=charge-19"));

    // the request is stored but a failing RPC lookup is a server error
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/payments/{reference}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn test_create_rejects_invalid_requests() {
    let app = init_app!();
    let bodies = [
        serde_json::json!({ "recipient": "not-a-key", "amount": 1 }),
        serde_json::json!({ "recipient": Pubkey::new_unique().to_string(), "amount": 0 }),
        serde_json::json!({ "recipient": Pubkey::new_unique().to_string(), "amount": -2 }),
        serde_json::json!({
            "recipient": Pubkey::new_unique().to_string(),
            "amount": "0.0000000001"
        }),
        serde_json::json!({
            "recipient": Pubkey::new_unique().to_string(),
            "amount": "20000000000"
        }),
        serde_json::json!({ "amount": 1 }),
    ];

    for body in bodies {
        let req = test::TestRequest::post()
            .uri("/api/v1/payments")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[actix_web::test]
async fn test_verify_unknown_and_malformed_references() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/payments/{}", Pubkey::new_unique()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "status": "not found" }));

    let req = test::TestRequest::get()
        .uri("/api/v1/payments/zzz")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
