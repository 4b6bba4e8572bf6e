use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::{models::PaymentError, utils::sol_to_lamports};

/// Body of `POST /payments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CreatePaymentRequest {
    pub recipient: String,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CreatePaymentRequest {
    /// Parses the recipient address.
    pub fn recipient_pubkey(&self) -> Result<Pubkey, PaymentError> {
        Pubkey::from_str(self.recipient.trim()).map_err(|e| {
            PaymentError::Validation(format!("invalid recipient {}: {e}", self.recipient))
        })
    }

    /// Validates the request without touching the network.
    pub fn validate(&self) -> Result<(), PaymentError> {
        self.recipient_pubkey()?;

        if self.amount <= Decimal::ZERO {
            return Err(PaymentError::Validation(
                "amount must be greater than zero".to_string(),
            ));
        }

        sol_to_lamports(self.amount)?;

        if matches!(&self.memo, Some(memo) if memo.trim().is_empty()) {
            return Err(PaymentError::Validation("memo cannot be empty".to_string()));
        }

        Ok(())
    }
}
