//! In-process stand-in for the Solana RPC node.
use std::sync::Mutex;

use async_trait::async_trait;
use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::{Transaction, VersionedTransaction},
};
use vault_client::{
    constants::MEMO_PROGRAM_ID,
    models::{FetchedTransaction, SolanaTransactionStatus},
    services::provider::{SolanaProviderError, SolanaProviderTrait},
};

/// Serves recorded transactions, found through any reference they list.
#[derive(Default)]
pub struct LedgerProvider {
    transactions: Mutex<Vec<(Signature, FetchedTransaction)>>,
}

impl LedgerProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a wallet transfer of `lamports` to `recipient` tagged with `reference`.
    pub fn record_transfer(
        &self,
        recipient: &Pubkey,
        reference: &Pubkey,
        lamports: u64,
        memo: Option<&str>,
    ) {
        let payer = Keypair::new();
        let mut transfer =
            solana_system_interface::instruction::transfer(&payer.pubkey(), recipient, lamports);
        transfer
            .accounts
            .push(AccountMeta::new_readonly(*reference, false));

        let mut instructions = Vec::new();
        if let Some(memo) = memo {
            instructions.push(Instruction::new_with_bytes(
                MEMO_PROGRAM_ID,
                memo.as_bytes(),
                vec![],
            ));
        }
        instructions.push(transfer);

        let message = Message::new(&instructions, Some(&payer.pubkey()));
        let transaction = Transaction::new(&[&payer], message, Hash::new_unique());
        let signature = transaction.signatures[0];

        self.transactions.lock().unwrap().push((
            signature,
            FetchedTransaction {
                transaction: VersionedTransaction::from(transaction),
                error: None,
            },
        ));
    }

    fn unsupported<T>(method: &str) -> Result<T, SolanaProviderError> {
        Err(SolanaProviderError::RpcError(format!(
            "{method} is not served by the test ledger"
        )))
    }
}

#[async_trait]
impl SolanaProviderTrait for LedgerProvider {
    async fn get_balance(&self, _address: &Pubkey) -> Result<u64, SolanaProviderError> {
        Self::unsupported("getBalance")
    }

    async fn get_minimum_balance_for_rent_exemption(
        &self,
        _data_size: usize,
    ) -> Result<u64, SolanaProviderError> {
        Self::unsupported("getMinimumBalanceForRentExemption")
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, SolanaProviderError> {
        Self::unsupported("getLatestBlockhash")
    }

    async fn send_transaction(
        &self,
        _transaction: &Transaction,
    ) -> Result<Signature, SolanaProviderError> {
        Self::unsupported("sendTransaction")
    }

    async fn get_transaction_status(
        &self,
        _signature: &Signature,
    ) -> Result<SolanaTransactionStatus, SolanaProviderError> {
        Self::unsupported("getSignatureStatuses")
    }

    async fn request_airdrop(
        &self,
        _address: &Pubkey,
        _lamports: u64,
    ) -> Result<Signature, SolanaProviderError> {
        Self::unsupported("requestAirdrop")
    }

    async fn find_reference_signatures(
        &self,
        reference: &Pubkey,
    ) -> Result<Vec<Signature>, SolanaProviderError> {
        let stored = self.transactions.lock().unwrap();
        Ok(stored
            .iter()
            .filter(|(_, fetched)| {
                fetched
                    .transaction
                    .message
                    .static_account_keys()
                    .contains(reference)
            })
            .map(|(signature, _)| *signature)
            .collect())
    }

    async fn get_transaction(
        &self,
        signature: &Signature,
    ) -> Result<FetchedTransaction, SolanaProviderError> {
        let stored = self.transactions.lock().unwrap();
        stored
            .iter()
            .find(|(stored_signature, _)| stored_signature == signature)
            .map(|(_, fetched)| fetched.clone())
            .ok_or_else(|| {
                SolanaProviderError::RpcError(format!("transaction {signature} not found"))
            })
    }
}
