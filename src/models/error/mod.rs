mod api;
pub use api::*;

mod instruction;
pub use instruction::*;

mod payment;
pub use payment::*;

mod repository_error;
pub use repository_error::*;

mod signer;
pub use signer::*;

mod transaction;
pub use transaction::*;
