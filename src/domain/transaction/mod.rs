//! Transaction assembly, submission and confirmation.
mod assembler;
pub use assembler::*;

mod confirmation;
pub use confirmation::*;
