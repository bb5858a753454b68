use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod module;
pub mod state;

pub use state::*;

declare_id!("6QoprYaENAeyhS5T9bNCSg3Jck67WycsXFuiV1QWZvYy");
