//! Request handlers shared by the route definitions.

pub mod payment;
