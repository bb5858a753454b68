//! Core VM functionality: the simulated world and transactional execution

use std::collections::HashMap;

use range_token::{CallContext, RangeTokens};

use crate::{
    errors::{Result, VmError},
    mocks::{MockAmm, MockLedger, MockLendingMarket, MockOracle},
};

/// Every external account a program call can touch.
#[derive(Clone, Debug)]
pub struct World {
    pub tokens: MockLedger,
    pub oracle: MockOracle,
    pub amm: MockAmm,
    pub lending: MockLendingMarket,
    pub ranges: RangeTokens,
}

impl World {
    pub fn new() -> Self {
        Self {
            tokens: MockLedger::new(),
            oracle: MockOracle::new(),
            amm: MockAmm::new(),
            lending: MockLendingMarket::new(),
            ranges: RangeTokens::default(),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot data of state
#[derive(Clone)]
pub struct Snapshot {
    pub(crate) world: World,
    pub(crate) timestamp: i64,
}

/// Structure for transaction execution and state management
pub struct Vm {
    pub world: World,

    /// Snapshot storage for state reverting
    pub(crate) snapshots: HashMap<u64, Snapshot>,

    /// Next snapshot ID
    pub(crate) next_snapshot_id: u64,

    pub(crate) timestamp: i64,

    /// Error of the most recent failed transaction (if any)
    last_error: Option<String>,
}

impl Vm {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            snapshots: HashMap::new(),
            next_snapshot_id: 0,
            timestamp: chrono::Utc::now().timestamp(),
            last_error: None,
        }
    }

    /// Borrows the whole world the way an entry point sees it.
    pub fn ctx(&mut self) -> CallContext<'_> {
        CallContext {
            tokens: &mut self.world.tokens,
            oracle: &self.world.oracle,
            amm: &mut self.world.amm,
            lending: &mut self.world.lending,
            ranges: &mut self.world.ranges,
        }
    }

    /// Runs `action` as one transaction: on error every write is rolled back.
    pub fn execute<T, F>(&mut self, action: F) -> Result<T>
    where
        F: FnOnce(&mut CallContext) -> anchor_lang::Result<T>,
    {
        let checkpoint = self.world.clone();
        let result = {
            let mut ctx = self.ctx();
            action(&mut ctx)
        };

        result.map_err(|err| {
            self.world = checkpoint;
            self.fail(err)
        })
    }

    /// Like [`Vm::execute`] for a program whose own account lives outside the world.
    pub fn transact<S, T, F>(&mut self, state: &mut S, action: F) -> Result<T>
    where
        S: Clone,
        F: FnOnce(&mut CallContext, &mut S) -> anchor_lang::Result<T>,
    {
        let checkpoint = (self.world.clone(), state.clone());
        let result = {
            let mut ctx = self.ctx();
            action(&mut ctx, state)
        };

        result.map_err(|err| {
            self.world = checkpoint.0;
            *state = checkpoint.1;
            self.fail(err)
        })
    }

    fn fail(&mut self, err: anchor_lang::error::Error) -> VmError {
        let message = err.to_string();
        tracing::debug!("transaction reverted: {}", message);
        self.last_error = Some(message);
        VmError::from(err)
    }

    /// Clear the error captured from the last failed transaction
    pub fn clear_last_error(&mut self) {
        self.last_error = None;
    }

    pub fn last_error(&self) -> Option<&String> {
        self.last_error.as_ref()
    }

    /// Check whether the last failure matches the expected message
    pub fn revert_matches(&self, expected_message: &str, err: &VmError) -> bool {
        err.to_string().contains(expected_message)
            || self
                .last_error
                .as_ref()
                .map(|message| message.contains(expected_message))
                .unwrap_or(false)
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}
