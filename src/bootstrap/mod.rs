//! Initialization routines for the payment request server.
//!
//! # Submodules
//!
//! - `initialize_app_state`: builds the repository and RPC provider shared by handlers
mod initialize_app_state;
pub use initialize_app_state::*;
