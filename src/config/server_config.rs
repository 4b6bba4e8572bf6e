use std::{env, str::FromStr, time::Duration};

use log::warn;
use solana_sdk::pubkey::Pubkey;

use crate::{
    constants::{
        DEFAULT_CONFIRMATION_INITIAL_BACKOFF_MS, DEFAULT_CONFIRMATION_MAX_ATTEMPTS,
        DEFAULT_CONFIRMATION_MAX_BACKOFF_MS, DEFAULT_HOST, DEFAULT_PORT,
        DEFAULT_RPC_TIMEOUT_SECONDS, DEFAULT_SOLANA_RPC_URL,
    },
    utils::BackoffPolicy,
};

use super::RpcConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rpc_url: String,
    pub rpc_timeout_seconds: u64,
    pub confirmation_max_attempts: u32,
    pub confirmation_initial_backoff_ms: u64,
    pub confirmation_max_backoff_ms: u64,
    /// Address of the deployed vault program. Only the CLI demo needs it.
    pub vault_program_id: Option<Pubkey>,
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses `VAULT_PROGRAM_ID`. A value that is set but not an address is dropped with a warning.
fn parse_program_id(value: Option<&str>) -> Option<Pubkey> {
    let value = value?.trim();
    match Pubkey::from_str(value) {
        Ok(program_id) => Some(program_id),
        Err(e) => {
            warn!("Ignoring VAULT_PROGRAM_ID {:?}: {}", value, e);
            None
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: parse_env("PORT", DEFAULT_PORT),
            rpc_url: env::var("SOLANA_RPC_URL")
                .unwrap_or_else(|_| DEFAULT_SOLANA_RPC_URL.to_string()),
            rpc_timeout_seconds: parse_env("RPC_TIMEOUT_SECONDS", DEFAULT_RPC_TIMEOUT_SECONDS),
            confirmation_max_attempts: parse_env(
                "CONFIRMATION_MAX_ATTEMPTS",
                DEFAULT_CONFIRMATION_MAX_ATTEMPTS,
            )
            .max(1),
            confirmation_initial_backoff_ms: parse_env(
                "CONFIRMATION_INITIAL_BACKOFF_MS",
                DEFAULT_CONFIRMATION_INITIAL_BACKOFF_MS,
            ),
            confirmation_max_backoff_ms: parse_env(
                "CONFIRMATION_MAX_BACKOFF_MS",
                DEFAULT_CONFIRMATION_MAX_BACKOFF_MS,
            ),
            vault_program_id: parse_program_id(env::var("VAULT_PROGRAM_ID").ok().as_deref()),
        }
    }

    pub fn rpc_config(&self) -> RpcConfig {
        RpcConfig {
            url: self.rpc_url.clone(),
            timeout_seconds: self.rpc_timeout_seconds,
        }
    }

    pub fn backoff_policy(&self) -> BackoffPolicy {
        BackoffPolicy::new(
            self.confirmation_max_attempts,
            Duration::from_millis(self.confirmation_initial_backoff_ms),
            Duration::from_millis(self.confirmation_max_backoff_ms),
        )
    }
}
