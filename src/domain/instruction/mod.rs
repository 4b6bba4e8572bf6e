//! Vault program instruction encoding.
//!
//! Every instruction is a fixed 9-byte payload:
//!
//! ```text
//! byte 0      operation tag (0 = deposit, 1 = withdraw)
//! bytes 1..9  amount, little-endian u64 (0 for withdraw)
//! ```
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};
use strum::Display;

use crate::{
    constants::{DEPOSIT_TAG, VAULT_INSTRUCTION_LEN, WITHDRAW_TAG},
    models::InstructionError,
};

mod accounts;
pub use accounts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VaultOperation {
    Deposit,
    Withdraw,
}

impl VaultOperation {
    pub fn tag(self) -> u8 {
        match self {
            VaultOperation::Deposit => DEPOSIT_TAG,
            VaultOperation::Withdraw => WITHDRAW_TAG,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self, InstructionError> {
        match tag {
            DEPOSIT_TAG => Ok(VaultOperation::Deposit),
            WITHDRAW_TAG => Ok(VaultOperation::Withdraw),
            other => Err(InstructionError::UnknownTag(other)),
        }
    }
}

impl FromStr for VaultOperation {
    type Err = InstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit" => Ok(VaultOperation::Deposit),
            "withdraw" => Ok(VaultOperation::Withdraw),
            _ => Err(InstructionError::UnknownOperation(s.to_string())),
        }
    }
}

/// A single vault program instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultInstruction {
    /// Moves `amount` lamports from the payer into the vault.
    Deposit { amount: u64 },
    /// Withdraws from the vault. The program decides the amount.
    Withdraw,
}

impl VaultInstruction {
    pub fn deposit(amount: u64) -> Self {
        VaultInstruction::Deposit { amount }
    }

    pub fn operation(&self) -> VaultOperation {
        match self {
            VaultInstruction::Deposit { .. } => VaultOperation::Deposit,
            VaultInstruction::Withdraw => VaultOperation::Withdraw,
        }
    }

    /// Amount carried on the wire.
    pub fn amount(&self) -> u64 {
        match self {
            VaultInstruction::Deposit { amount } => *amount,
            VaultInstruction::Withdraw => 0,
        }
    }

    pub fn pack(&self) -> [u8; VAULT_INSTRUCTION_LEN] {
        let mut data = [0u8; VAULT_INSTRUCTION_LEN];
        data[0] = self.operation().tag();
        data[1..].copy_from_slice(&self.amount().to_le_bytes());
        data
    }

    pub fn unpack(data: &[u8]) -> Result<Self, InstructionError> {
        let (&tag, rest) = data.split_first().ok_or(InstructionError::InvalidLength {
            expected: VAULT_INSTRUCTION_LEN,
            actual: 0,
        })?;
        let operation = VaultOperation::from_tag(tag)?;

        let amount_bytes: [u8; 8] =
            rest.try_into().map_err(|_| InstructionError::InvalidLength {
                expected: VAULT_INSTRUCTION_LEN,
                actual: data.len(),
            })?;
        let amount = u64::from_le_bytes(amount_bytes);

        match operation {
            VaultOperation::Deposit => Ok(VaultInstruction::Deposit { amount }),
            VaultOperation::Withdraw if amount == 0 => Ok(VaultInstruction::Withdraw),
            VaultOperation::Withdraw => Err(InstructionError::UnexpectedAmount(amount)),
        }
    }

    /// Builds an instruction from a raw tag and an optional amount of any width.
    ///
    /// A missing amount is zero. Withdraw accepts no amount other than zero.
    pub fn from_parts(tag: u8, amount: Option<u128>) -> Result<Self, InstructionError> {
        let operation = VaultOperation::from_tag(tag)?;
        let amount = match amount {
            Some(value) => u64::try_from(value)
                .map_err(|_| InstructionError::AmountOutOfRange(value.to_string()))?,
            None => 0,
        };

        match operation {
            VaultOperation::Deposit => Ok(VaultInstruction::Deposit { amount }),
            VaultOperation::Withdraw if amount == 0 => Ok(VaultInstruction::Withdraw),
            VaultOperation::Withdraw => Err(InstructionError::UnexpectedAmount(amount)),
        }
    }

    /// Parses a user-supplied base-10 amount, e.g. from the command line.
    pub fn from_decimal_str(
        operation: VaultOperation,
        amount: Option<&str>,
    ) -> Result<Self, InstructionError> {
        let amount = amount
            .map(|raw| {
                let raw = raw.trim();
                if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(InstructionError::InvalidAmount(raw.to_string()));
                }
                // all digits, so the only possible failure is overflow
                raw.parse::<u128>()
                    .map_err(|_| InstructionError::AmountOutOfRange(raw.to_string()))
            })
            .transpose()?;

        Self::from_parts(operation.tag(), amount)
    }
}

/// Builds the program instruction for `instruction` over the vault account layout.
pub fn build_vault_instruction(
    program_id: &Pubkey,
    instruction: &VaultInstruction,
    accounts: &VaultAccounts,
) -> Instruction {
    Instruction::new_with_bytes(
        *program_id,
        &instruction.pack(),
        accounts.to_account_metas(),
    )
}
