//! Builds signed transactions from instructions.
//!
//! Message compilation is pure. The only network access is the blockhash
//! fetch, which happens on every call so a transaction is never built on a
//! stale hash.
use std::sync::Arc;

use log::debug;
use solana_sdk::{
    instruction::Instruction, message::Message, pubkey::Pubkey,
    transaction::Transaction,
};

use crate::{
    models::{SignerError, TransactionError},
    services::{provider::SolanaProviderTrait, signer::SolanaSignTrait},
};

/// Compiles `instructions` into a message paid by `fee_payer`, without a blockhash.
pub fn compile_message(instructions: &[Instruction], fee_payer: &Pubkey) -> Message {
    Message::new(instructions, Some(fee_payer))
}

/// Keys that must sign `message`, in signature order.
pub fn required_signers(message: &Message) -> &[Pubkey] {
    let num_required = message.header.num_required_signatures as usize;
    &message.account_keys[..num_required.min(message.account_keys.len())]
}

pub struct TransactionAssembler<P>
where
    P: SolanaProviderTrait + Send + Sync + 'static,
{
    provider: Arc<P>,
}

impl<P> TransactionAssembler<P>
where
    P: SolanaProviderTrait + Send + Sync + 'static,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Compiles, stamps a fresh blockhash and signs a transaction.
    ///
    /// `signers` must cover exactly the message's required signers: a
    /// missing key yields `SignerError::MissingSigner` and a key the message
    /// does not require yields `SignerError::UnexpectedSigner`. Signer checks
    /// run before the blockhash is fetched.
    pub async fn assemble(
        &self,
        instructions: &[Instruction],
        fee_payer: &Pubkey,
        signers: &[&dyn SolanaSignTrait],
    ) -> Result<Transaction, TransactionError> {
        let mut message = compile_message(instructions, fee_payer);
        let ordered_signers = match_signers(required_signers(&message), signers).await?;

        message.recent_blockhash = self.provider.get_latest_blockhash().await?;
        debug!(
            "Assembling transaction with {} instruction(s), blockhash {}",
            instructions.len(),
            message.recent_blockhash
        );

        let message_data = message.serialize();
        let mut signatures = Vec::with_capacity(ordered_signers.len());
        for signer in ordered_signers {
            signatures.push(signer.sign(&message_data).await?);
        }

        Ok(Transaction {
            signatures,
            message,
        })
    }
}

/// Orders `signers` to match `required`, rejecting gaps and extras.
async fn match_signers<'a>(
    required: &[Pubkey],
    signers: &[&'a dyn SolanaSignTrait],
) -> Result<Vec<&'a dyn SolanaSignTrait>, SignerError> {
    let mut slots: Vec<Option<&'a dyn SolanaSignTrait>> = vec![None; required.len()];

    for signer in signers {
        let pubkey = signer.pubkey().await?;
        let index = required
            .iter()
            .position(|key| *key == pubkey)
            .ok_or_else(|| SignerError::UnexpectedSigner(pubkey.to_string()))?;

        if slots[index].replace(*signer).is_some() {
            return Err(SignerError::UnexpectedSigner(format!(
                "{pubkey} supplied more than once"
            )));
        }
    }

    required
        .iter()
        .zip(slots)
        .map(|(key, slot)| slot.ok_or_else(|| SignerError::MissingSigner(key.to_string())))
        .collect()
}
