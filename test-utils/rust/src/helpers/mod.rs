pub mod assertions;
pub mod tokens;

pub use assertions::*;
pub use tokens::*;
