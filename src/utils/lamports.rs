use rust_decimal::{prelude::ToPrimitive, Decimal};
use solana_sdk::native_token::LAMPORTS_PER_SOL;

use crate::models::PaymentError;

/// Converts an amount in SOL to lamports.
///
/// Sub-lamport precision and amounts that do not fit in a `u64` are rejected.
pub fn sol_to_lamports(amount: Decimal) -> Result<u64, PaymentError> {
    let lamports = amount
        .checked_mul(Decimal::from(LAMPORTS_PER_SOL))
        .ok_or_else(|| PaymentError::Validation(format!("amount {amount} is too large")))?;

    if !lamports.fract().is_zero() {
        return Err(PaymentError::Validation(format!(
            "amount {amount} is not a whole number of lamports"
        )));
    }

    lamports
        .to_u64()
        .ok_or_else(|| PaymentError::Validation(format!("amount {amount} is out of range")))
}
