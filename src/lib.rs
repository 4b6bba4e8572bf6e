//! Client for an on-chain native vault program and a point-of-sale payment
//! request service.
//!
//! * [`domain::VaultClient`] encodes deposit and withdraw instructions,
//!   assembles and signs transactions, submits them and polls for confirmation.
//! * [`domain::PaymentService`] issues Solana Pay transfer requests and verifies
//!   each one exactly once against the chain. [`api`] exposes it over HTTP.
pub mod api;
pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;
