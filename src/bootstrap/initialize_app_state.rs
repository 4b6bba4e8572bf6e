//! Application state initialization
use std::sync::Arc;

use actix_web::web;
use color_eyre::Result;
use eyre::WrapErr;
use log::info;

use crate::{
    config::{mask_url, ServerConfig},
    models::{AppState, DefaultAppState},
    repositories::InMemoryPaymentRepository,
    services::provider::SolanaProvider,
};

/// Initializes application state
///
/// # Errors
///
/// Returns error if the RPC endpoint in `server_config` is invalid.
pub fn initialize_app_state(
    server_config: &ServerConfig,
) -> Result<web::ThinData<DefaultAppState>> {
    let rpc_config = server_config.rpc_config();
    let provider = SolanaProvider::new(&rpc_config).wrap_err_with(|| {
        format!(
            "Failed to create Solana provider for {}",
            mask_url(&rpc_config.url)
        )
    })?;
    info!("Using Solana RPC endpoint {}", mask_url(&rpc_config.url));

    let app_state = web::ThinData(AppState {
        payment_repository: Arc::new(InMemoryPaymentRepository::new()),
        provider: Arc::new(provider),
    });

    Ok(app_state)
}
