//! Vault instruction wire format through the public API.
use solana_sdk::pubkey::Pubkey;
use vault_client::{
    domain::{build_vault_instruction, VaultAccounts, VaultInstruction, VaultOperation},
    models::InstructionError,
};

#[test]
fn test_deposit_wire_bytes() {
    let instruction = VaultInstruction::deposit(1_000_000_000);

    assert_eq!(
        instruction.pack(),
        [0, 0x00, 0xCA, 0x9A, 0x3B, 0, 0, 0, 0]
    );
}

#[test]
fn test_withdraw_wire_bytes() {
    assert_eq!(VaultInstruction::Withdraw.pack(), [1, 0, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_program_instruction_layout() {
    let program_id = Pubkey::new_unique();
    let accounts = VaultAccounts::new(Pubkey::new_unique(), Pubkey::new_unique());

    let instruction =
        build_vault_instruction(&program_id, &VaultInstruction::deposit(42), &accounts);

    assert_eq!(instruction.program_id, program_id);
    assert_eq!(instruction.data.len(), 9);
    assert_eq!(instruction.accounts.len(), 3);
    assert!(instruction.accounts[0].is_signer && instruction.accounts[0].is_writable);
    assert!(!instruction.accounts[1].is_signer && instruction.accounts[1].is_writable);
    assert_eq!(
        instruction.accounts[2].pubkey,
        solana_system_interface::program::ID
    );
    assert!(!instruction.accounts[2].is_writable);
}

#[test]
fn test_user_supplied_amounts() {
    assert_eq!(
        VaultInstruction::from_decimal_str(VaultOperation::Deposit, Some("18446744073709551615"))
            .unwrap(),
        VaultInstruction::deposit(u64::MAX)
    );
    assert!(matches!(
        VaultInstruction::from_decimal_str(VaultOperation::Deposit, Some("18446744073709551616")),
        Err(InstructionError::AmountOutOfRange(_))
    ));
    assert!(matches!(
        VaultInstruction::from_decimal_str(VaultOperation::Deposit, Some("ten")),
        Err(InstructionError::InvalidAmount(_))
    ));
}

#[test]
fn test_unknown_tag_is_rejected() {
    assert!(matches!(
        VaultInstruction::from_parts(7, Some(1)),
        Err(InstructionError::UnknownTag(7))
    ));
    assert!(VaultInstruction::unpack(&[7, 0, 0, 0, 0, 0, 0, 0, 0]).is_err());
}
