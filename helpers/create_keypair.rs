//! Keypair Generation Tool
//!
//! Writes a new Solana keypair to a JSON file in the CLI's `[u8; 64]` format
//! and prints its public key.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example create_keypair -- --output keys/payer.json
//! ```
use std::path::{Path, PathBuf};

use clap::Parser;
use eyre::{eyre, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{write_keypair_file, Keypair},
    signer::Signer,
};

/// CLI arguments for keypair generation
#[derive(Parser, Debug)]
#[command(name = "create-keypair")]
#[command(about = "Generate a Solana keypair file")]
#[command(version)]
struct Args {
    /// Path of the keypair file to write
    #[arg(short, long)]
    output: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long, default_value_t = false)]
    force: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let pubkey = create_keypair(&args.output, args.force)?;

    println!("Wrote keypair to {}", args.output.display());
    println!("Public key: {}", pubkey);
    Ok(())
}

/// Generates a keypair and stores it at `path`, creating parent directories.
fn create_keypair(path: &Path, force: bool) -> Result<Pubkey> {
    if path.exists() && !force {
        return Err(eyre!(
            "{} already exists, pass --force to overwrite it",
            path.display()
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| eyre!("Failed to create {}: {}", parent.display(), e))?;
    }

    let keypair = Keypair::new();
    write_keypair_file(&keypair, path)
        .map_err(|e| eyre!("Failed to write {}: {}", path.display(), e))?;

    Ok(keypair.pubkey())
}
