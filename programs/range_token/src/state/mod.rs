pub mod beacon;
pub mod context;
pub mod range_token;
pub mod registry;

pub use beacon::*;
pub use context::*;
pub use range_token::*;
pub use registry::*;
