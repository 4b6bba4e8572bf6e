use solana_sdk::{instruction::AccountMeta, pubkey::Pubkey};

/// Accounts every vault instruction expects, in program order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultAccounts {
    pub payer: Pubkey,
    pub vault: Pubkey,
}

impl VaultAccounts {
    pub fn new(payer: Pubkey, vault: Pubkey) -> Self {
        Self { payer, vault }
    }

    /// `[payer (signer, writable), vault (writable), system program (read-only)]`
    pub fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.payer, true),
            AccountMeta::new(self.vault, false),
            AccountMeta::new_readonly(solana_system_interface::program::ID, false),
        ]
    }
}
