//! # Repository Module
//!
//! Storage for payment requests awaiting verification.

pub use crate::models::RepositoryError;

mod payment;
pub use payment::*;
