//! # API Module
//!
//! HTTP surface of the payment request service.
//!
//! ## Structure
//!
//! * `controllers` - Request handling
//! * `routes` - Endpoint definitions and routing

pub mod controllers;

pub mod routes;
