pub mod state;
pub mod vm;

pub use state::StateManager;
pub use vm::{Snapshot, Vm, World};
