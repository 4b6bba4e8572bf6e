use serde::{Deserialize, Serialize};
use strum::Display;

/// Body returned by `POST /payments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePaymentResponse {
    pub reference: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
pub enum PaymentStatus {
    #[serde(rename = "verified")]
    #[strum(serialize = "verified")]
    Verified,
    #[serde(rename = "not found")]
    #[strum(serialize = "not found")]
    NotFound,
}

/// Body returned by `GET /payments/{reference}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentStatusResponse {
    pub status: PaymentStatus,
}

impl From<PaymentStatus> for PaymentStatusResponse {
    fn from(status: PaymentStatus) -> Self {
        Self { status }
    }
}
