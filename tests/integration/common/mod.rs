//! Common utilities and helpers for integration tests

pub mod provider;
