//! Configuration loaded from the environment (and `.env` via `dotenvy`).
mod server_config;
pub use server_config::*;

mod rpc_config;
pub use rpc_config::*;
