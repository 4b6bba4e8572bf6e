//! Vault Deposit / Withdraw Demo
//!
//! Runs the full vault flow against a dev cluster: airdrop to the payer,
//! create the vault account if needed, deposit, withdraw, and print balances.
//!
//! # Usage
//!
//! ```bash
//! VAULT_PROGRAM_ID=<program id> cargo run --example vault_demo -- \
//!   --payer keys/payer.json \
//!   --deposit 1000000
//! ```
//!
//! The RPC endpoint and confirmation backoff are read from the same
//! environment variables as the server (`SOLANA_RPC_URL`, ...).
use std::{path::PathBuf, str::FromStr, sync::Arc};

use clap::Parser;
use dotenvy::dotenv;
use eyre::{eyre, Result, WrapErr};
use log::info;
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use vault_client::{
    config::ServerConfig,
    constants::DEFAULT_AIRDROP_LAMPORTS,
    domain::{VaultClient, VaultInstruction, VaultOperation},
    logging::setup_logging,
    services::{provider::SolanaProvider, signer::LocalSigner},
};

/// CLI arguments for the vault demo
#[derive(Parser, Debug)]
#[command(name = "vault-demo")]
#[command(about = "Deposit into and withdraw from a native vault")]
#[command(version)]
struct Args {
    /// Payer keypair file; a throwaway keypair is generated when omitted
    #[arg(short, long)]
    payer: Option<PathBuf>,

    /// Existing vault keypair file; a new vault account is created when omitted
    #[arg(short, long)]
    vault: Option<PathBuf>,

    /// Vault program address (overrides VAULT_PROGRAM_ID)
    #[arg(long)]
    program_id: Option<String>,

    /// Amount to deposit, in lamports
    #[arg(short, long, default_value = "1000000")]
    deposit: String,

    /// Lamports to airdrop to the payer first, 0 to skip
    #[arg(short, long, default_value_t = DEFAULT_AIRDROP_LAMPORTS)]
    airdrop: u64,

    /// Deposit only
    #[arg(long, default_value_t = false)]
    skip_withdraw: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    setup_logging()?;
    let args = Args::parse();
    let config = ServerConfig::from_env();

    let program_id = match &args.program_id {
        Some(value) => Pubkey::from_str(value).wrap_err("Invalid --program-id")?,
        None => config
            .vault_program_id
            .ok_or_else(|| {
                eyre!("Set VAULT_PROGRAM_ID to a valid program address or pass --program-id")
            })?,
    };
    let deposit =
        VaultInstruction::from_decimal_str(VaultOperation::Deposit, Some(&args.deposit))?;

    let payer = match &args.payer {
        Some(path) => LocalSigner::from_keypair_file(path)?,
        None => LocalSigner::new(Keypair::new()),
    };
    let (vault_signer, vault) = match &args.vault {
        Some(path) => (None, LocalSigner::from_keypair_file(path)?.address()),
        None => {
            let signer = LocalSigner::new(Keypair::new());
            let address = signer.address();
            (Some(signer), address)
        }
    };

    let provider = Arc::new(SolanaProvider::new(&config.rpc_config())?);
    let client = VaultClient::new(
        program_id,
        vault,
        Arc::new(payer),
        provider,
        config.backoff_policy(),
    )
    .await?;
    info!("Payer {} / vault {}", client.payer(), client.vault());

    if args.airdrop > 0 {
        let signature = client.fund_account(args.airdrop).await?;
        println!("Airdrop confirmed: {signature}");
    }

    if let Some(vault_signer) = &vault_signer {
        let signature = client.create_vault_account(vault_signer).await?;
        println!("Vault account created: {signature}");
    }

    let signature = client.execute(deposit).await?;
    println!("Deposit of {} lamports confirmed: {signature}", args.deposit);
    print_balances(&client).await?;

    if !args.skip_withdraw {
        let signature = client.withdraw().await?;
        println!("Withdraw confirmed: {signature}");
        print_balances(&client).await?;
    }

    Ok(())
}

async fn print_balances(client: &VaultClient<SolanaProvider, LocalSigner>) -> Result<()> {
    let (payer, vault) = client.balances().await?;
    println!("Balances: payer {payer} lamports, vault {vault} lamports");
    Ok(())
}
