use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod module;
pub mod state;

pub use state::*;

declare_id!("jQm5o7jeoGnh4R2L6gJ3K3FK5Sj57Z1MfTmFc3kUCVc");
