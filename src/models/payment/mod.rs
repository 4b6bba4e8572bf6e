//! Payment request models for the point-of-sale flow.
mod repository;
pub use repository::*;

mod request;
pub use request::*;

mod response;
pub use response::*;
