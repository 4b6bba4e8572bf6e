//! Vault client: deposit, withdraw and account funding end to end.
//!
//! Each operation encodes the instruction, assembles a transaction signed by
//! the payer, submits it and polls for confirmation.
use std::sync::Arc;

use log::info;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    constants::VAULT_ACCOUNT_SPACE,
    domain::{
        build_vault_instruction, ConfirmationPoller, PendingTransaction, TransactionAssembler,
        VaultAccounts, VaultInstruction,
    },
    models::{SignerError, TransactionError},
    services::{provider::SolanaProviderTrait, signer::SolanaSignTrait},
    utils::BackoffPolicy,
};

pub struct VaultClient<P, S>
where
    P: SolanaProviderTrait + Send + Sync + 'static,
    S: SolanaSignTrait + Send + Sync + 'static,
{
    program_id: Pubkey,
    accounts: VaultAccounts,
    payer: Arc<S>,
    provider: Arc<P>,
    assembler: TransactionAssembler<P>,
    poller: ConfirmationPoller<P>,
}

impl<P, S> VaultClient<P, S>
where
    P: SolanaProviderTrait + Send + Sync + 'static,
    S: SolanaSignTrait + Send + Sync + 'static,
{
    pub async fn new(
        program_id: Pubkey,
        vault: Pubkey,
        payer: Arc<S>,
        provider: Arc<P>,
        policy: BackoffPolicy,
    ) -> Result<Self, TransactionError> {
        let payer_pubkey = payer.pubkey().await?;

        Ok(Self {
            program_id,
            accounts: VaultAccounts::new(payer_pubkey, vault),
            payer,
            assembler: TransactionAssembler::new(Arc::clone(&provider)),
            poller: ConfirmationPoller::new(Arc::clone(&provider), policy),
            provider,
        })
    }

    pub fn payer(&self) -> Pubkey {
        self.accounts.payer
    }

    pub fn vault(&self) -> Pubkey {
        self.accounts.vault
    }

    pub async fn deposit(&self, amount: u64) -> Result<Signature, TransactionError> {
        self.execute(VaultInstruction::deposit(amount)).await
    }

    pub async fn withdraw(&self) -> Result<Signature, TransactionError> {
        self.execute(VaultInstruction::Withdraw).await
    }

    /// Runs one vault instruction and waits for confirmation.
    pub async fn execute(
        &self,
        instruction: VaultInstruction,
    ) -> Result<Signature, TransactionError> {
        info!(
            "Executing vault {} of {} lamports (vault {})",
            instruction.operation(),
            instruction.amount(),
            self.accounts.vault
        );

        let program_instruction =
            build_vault_instruction(&self.program_id, &instruction, &self.accounts);
        let signers: [&dyn SolanaSignTrait; 1] = [self.payer.as_ref()];
        let transaction = self
            .assembler
            .assemble(&[program_instruction], &self.accounts.payer, &signers)
            .await?;

        self.poller.submit_and_confirm(&transaction).await
    }

    /// Creates the vault account owned by the program, funded for rent exemption.
    ///
    /// `vault_signer` must hold the key of the vault this client targets.
    pub async fn create_vault_account<V>(
        &self,
        vault_signer: &V,
    ) -> Result<Signature, TransactionError>
    where
        V: SolanaSignTrait + Send + Sync,
    {
        let vault_pubkey = vault_signer.pubkey().await?;
        if vault_pubkey != self.accounts.vault {
            return Err(SignerError::Configuration(format!(
                "vault signer {vault_pubkey} does not match vault {}",
                self.accounts.vault
            ))
            .into());
        }

        let lamports = self
            .provider
            .get_minimum_balance_for_rent_exemption(VAULT_ACCOUNT_SPACE)
            .await?;
        info!(
            "Creating vault account {} with {} lamports",
            vault_pubkey, lamports
        );

        let create_account = solana_system_interface::instruction::create_account(
            &self.accounts.payer,
            &vault_pubkey,
            lamports,
            VAULT_ACCOUNT_SPACE as u64,
            &self.program_id,
        );
        let signers: [&dyn SolanaSignTrait; 2] = [self.payer.as_ref(), vault_signer];
        let transaction = self
            .assembler
            .assemble(&[create_account], &self.accounts.payer, &signers)
            .await?;

        self.poller.submit_and_confirm(&transaction).await
    }

    /// Requests an airdrop to the payer and waits for it to confirm.
    /// Only dev and test clusters honour airdrops.
    pub async fn fund_account(&self, lamports: u64) -> Result<Signature, TransactionError> {
        let signature = self
            .provider
            .request_airdrop(&self.accounts.payer, lamports)
            .await?;
        info!(
            "Requested airdrop of {} lamports to {}",
            lamports, self.accounts.payer
        );

        let mut pending = PendingTransaction::new(signature);
        self.poller.poll(&mut pending).await?.into_result()
    }

    /// Current `(payer, vault)` balances in lamports.
    pub async fn balances(&self) -> Result<(u64, u64), TransactionError> {
        let payer = self.provider.get_balance(&self.accounts.payer).await?;
        let vault = self.provider.get_balance(&self.accounts.vault).await?;
        Ok((payer, vault))
    }
}
