//! Interfaces of the external programs the engine calls into.

pub mod amm;
pub mod lending;
pub mod oracle;

pub use amm::*;
pub use lending::*;
pub use oracle::*;
