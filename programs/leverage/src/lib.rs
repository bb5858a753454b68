use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod module;
pub mod state;
pub mod utils;

pub use state::*;

declare_id!("8pbpHuazepaJr6eLcuYpAEJYxTLQnd9VW2pDVCeWeEUf");
