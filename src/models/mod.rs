mod api_response;
pub use api_response::*;

mod app_state;
pub use app_state::*;

pub mod error;
pub use error::*;

mod payment;
pub use payment::*;

mod transaction;
pub use transaction::*;
