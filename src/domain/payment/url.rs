//! Solana Pay transfer request URLs.
use reqwest::Url;

use crate::{
    constants::SOLANA_PAY_SCHEME,
    models::{PaymentError, PaymentRequestModel},
};

/// Encodes `solana:<recipient>?amount=..&reference=..[&label=..][&message=..][&memo=..]`.
pub fn encode_transfer_url(request: &PaymentRequestModel) -> Result<Url, PaymentError> {
    let mut url = Url::parse(&format!("{}:{}", SOLANA_PAY_SCHEME, request.recipient))
        .map_err(|e| PaymentError::Validation(format!("cannot encode payment URL: {e}")))?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("amount", &request.amount.normalize().to_string());
        query.append_pair("reference", &request.reference.to_string());
        if let Some(label) = &request.label {
            query.append_pair("label", label);
        }
        if let Some(message) = &request.message {
            query.append_pair("message", message);
        }
        if let Some(memo) = &request.memo {
            query.append_pair("memo", memo);
        }
    }

    Ok(url)
}
