//! # Domain Module
//!
//! Vault instruction encoding, transaction assembly and confirmation, and the
//! payment request flow.

pub mod instruction;
pub use instruction::*;

pub mod payment;
pub use payment::*;

pub mod transaction;
pub use transaction::*;

pub mod vault;
pub use vault::*;
