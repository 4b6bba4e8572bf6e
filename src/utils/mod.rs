mod backoff;
pub use backoff::*;

mod polling;
pub use polling::*;

mod lamports;
pub use lamports::*;
