pub mod core;
pub mod errors;
pub mod helpers;
pub mod mocks;

pub mod prelude {
    pub use crate::core::{Snapshot, StateManager, Vm, World};
    pub use crate::errors::*;
    pub use crate::helpers::{
        Assertions, ExpectRevertExt, RevertInfo, TokenHelper, VmAccess,
    };
    pub use crate::mocks::*;

    pub use anchor_lang::prelude::Pubkey;

    /// Time constants for convenience
    pub mod time {
        pub const SECOND: i64 = 1;
        pub const MINUTE: i64 = 60;
        pub const HOUR: i64 = 3600;
        pub const DAY: i64 = 86400;
        pub const WEEK: i64 = 604800;
        pub const YEAR: i64 = 31536000;
    }
}

pub use core::{StateManager, Vm, World};
pub use errors::{Result, VmError};
