//! Matches an on-chain transaction against a stored payment request.
use solana_sdk::pubkey::Pubkey;
use solana_system_interface::instruction::SystemInstruction;

use crate::{
    constants::MEMO_PROGRAM_ID,
    models::{FetchedTransaction, PaymentError, PaymentRequestModel},
    utils::sol_to_lamports,
};

/// Checks that `fetched` settles `request`:
///
/// * the transaction succeeded;
/// * it lists the request's reference key;
/// * a system transfer pays the recipient exactly the requested lamports;
/// * when the request has a memo, a memo instruction carries it.
pub fn validate_transfer(
    request: &PaymentRequestModel,
    fetched: &FetchedTransaction,
) -> Result<(), PaymentError> {
    if let Some(error) = &fetched.error {
        return Err(PaymentError::TransferMismatch(format!(
            "transaction failed: {error}"
        )));
    }

    let message = &fetched.transaction.message;
    let keys = message.static_account_keys();
    let key_at = |index: u8| keys.get(index as usize);

    if !keys.contains(&request.reference) {
        return Err(PaymentError::TransferMismatch(format!(
            "reference {} not found in transaction",
            request.reference
        )));
    }

    let expected_lamports = sol_to_lamports(request.amount)?;
    let system_program: Pubkey = solana_system_interface::program::ID;

    let pays_recipient = message.instructions().iter().any(|instruction| {
        if key_at(instruction.program_id_index) != Some(&system_program) {
            return false;
        }
        let Ok(SystemInstruction::Transfer { lamports }) =
            bincode::deserialize::<SystemInstruction>(&instruction.data)
        else {
            return false;
        };
        let recipient = instruction.accounts.get(1).and_then(|index| key_at(*index));

        lamports == expected_lamports && recipient == Some(&request.recipient)
    });

    if !pays_recipient {
        return Err(PaymentError::TransferMismatch(format!(
            "no transfer of {} lamports to {}",
            expected_lamports, request.recipient
        )));
    }

    if let Some(memo) = &request.memo {
        let has_memo = message.instructions().iter().any(|instruction| {
            key_at(instruction.program_id_index) == Some(&MEMO_PROGRAM_ID)
                && instruction.data == memo.as_bytes()
        });
        if !has_memo {
            return Err(PaymentError::TransferMismatch(format!(
                "memo {memo:?} not found"
            )));
        }
    }

    Ok(())
}
