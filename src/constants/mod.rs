//! Constants shared across the crate.
mod logging;
pub use logging::*;

mod server;
pub use server::*;

mod vault;
pub use vault::*;

mod confirmation;
pub use confirmation::*;

mod payment;
pub use payment::*;
