//! Time warping, snapshots, and state management

use crate::{
    core::vm::Snapshot,
    errors::{Result, VmError},
};

use super::vm::Vm;

/// Trait for managing VM state (time, snapshots, etc.)
pub trait StateManager {
    /// Warp time forward in seconds, accruing lending market interest
    fn warp_time(&mut self, seconds: i64) -> Result<()>;

    /// Get current timestamp
    fn timestamp(&self) -> i64;

    /// Take a snapshot of current state
    fn snapshot(&mut self) -> u64;

    /// Revert to a snapshot state
    fn revert(&mut self, snapshot_id: u64) -> Result<()>;
}

impl StateManager for Vm {
    fn warp_time(&mut self, seconds: i64) -> Result<()> {
        if seconds < 0 {
            return Err(VmError::BackwardsWarp(seconds));
        }
        self.world.lending.accrue_interest(seconds as u64)?;
        self.timestamp += seconds;
        Ok(())
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn snapshot(&mut self) -> u64 {
        let id = self.next_snapshot_id;
        self.next_snapshot_id += 1;

        let snapshot = Snapshot {
            world: self.world.clone(),
            timestamp: self.timestamp,
        };

        self.snapshots.insert(id, snapshot);
        id
    }

    fn revert(&mut self, snapshot_id: u64) -> Result<()> {
        let snapshot = self
            .snapshots
            .get(&snapshot_id)
            .ok_or(VmError::SnapshotNotFound(snapshot_id))?
            .clone();

        self.world = snapshot.world;
        self.timestamp = snapshot.timestamp;

        Ok(())
    }
}

impl Vm {
    /// Warp time forward by days
    pub fn warp_days(&mut self, days: u64) -> Result<()> {
        self.warp_time((days * 24 * 60 * 60) as i64)
    }

    /// Delete a snapshot to free memory
    pub fn delete_snapshot(&mut self, snapshot_id: u64) {
        self.snapshots.remove(&snapshot_id);
    }

    /// Clear all snapshots
    pub fn clear_snapshots(&mut self) {
        self.snapshots.clear();
    }
}
