//! Routes for creating and verifying payment requests.
use actix_web::{get, post, web, Responder};

use crate::{
    api::controllers::payment,
    models::{CreatePaymentRequest, DefaultAppState},
};

/// Creates a payment request.
#[post("/payments")]
async fn create_payment(
    request: web::Json<CreatePaymentRequest>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    payment::create_payment(request.into_inner(), data).await
}

/// Verifies a payment request by its reference key.
#[get("/payments/{reference}")]
async fn verify_payment(
    reference: web::Path<String>,
    data: web::ThinData<DefaultAppState>,
) -> impl Responder {
    payment::verify_payment(reference.into_inner(), data).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(create_payment);
    cfg.service(verify_payment);
}
