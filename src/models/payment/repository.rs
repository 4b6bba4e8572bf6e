use rust_decimal::Decimal;
use solana_sdk::pubkey::Pubkey;

/// A payment request held in the registry until it is verified.
///
/// `reference` is a one-time public key the payer's wallet attaches to the
/// transfer so the request can be correlated with its on-chain transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequestModel {
    pub id: String,
    pub reference: Pubkey,
    pub recipient: Pubkey,
    /// Amount in SOL.
    pub amount: Decimal,
    pub memo: Option<String>,
    pub label: Option<String>,
    pub message: Option<String>,
    pub created_at: String,
}
