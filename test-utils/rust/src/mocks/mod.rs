//! In-memory stand-ins for the external programs the engine talks to.

pub mod amm;
pub mod errors;
pub mod ledger;
pub mod lending;
pub mod oracle;

pub use amm::*;
pub use errors::*;
pub use ledger::*;
pub use lending::*;
pub use oracle::*;
