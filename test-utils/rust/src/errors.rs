use thiserror::Error;

pub type Result<T> = std::result::Result<T, VmError>;

/// Failures of the in-memory runtime
#[derive(Error, Debug)]
pub enum VmError {
    /// A program call returned an error, the message carries its variant name
    #[error("Reverted: {0}")]
    Reverted(String),

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(u64),

    #[error("Cannot warp backwards by {0} seconds")]
    BackwardsWarp(i64),
}

impl From<anchor_lang::error::Error> for VmError {
    fn from(err: anchor_lang::error::Error) -> Self {
        VmError::Reverted(err.to_string())
    }
}
