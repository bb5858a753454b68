pub mod errors;
pub mod invokes;
pub mod math;
pub mod structs;
pub mod token;
