use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod module;
pub mod state;
pub mod utils;

pub use state::*;

declare_id!("2pS3PJ527tJ9tr8VzkqUXSKPw7ihdtLepepovge8mfVQ");
