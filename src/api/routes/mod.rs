//! # API Routes Module
//!
//! Configures HTTP routes for the payment request service.
//!
//! ## Routes
//!
//! * `/health` - Health check endpoint
//! * `/payments` - Payment request endpoints

pub mod health;
pub mod payment;

use actix_web::web;
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::init).configure(payment::init);
}
