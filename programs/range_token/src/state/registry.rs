use anchor_lang::prelude::*;
use std::collections::BTreeMap;

use crate::errors::ErrorCodes;
use crate::state::{RangeToken, RangeTokenBeacon};

/// Every range token account and beacon known to the runtime.
#[derive(Clone, Debug, Default)]
pub struct RangeTokens {
    tokens: BTreeMap<Pubkey, RangeToken>,
    beacons: BTreeMap<Pubkey, RangeTokenBeacon>,
}

impl RangeTokens {
    pub fn insert(&mut self, range_token: RangeToken) -> Result<()> {
        if self.tokens.contains_key(&range_token.key) {
            return Err(ErrorCodes::RangeAlreadyInitialized.into());
        }
        self.tokens.insert(range_token.key, range_token);
        Ok(())
    }

    pub fn find(&self, key: &Pubkey) -> Option<&RangeToken> {
        self.tokens.get(key)
    }

    pub fn get(&self, key: &Pubkey) -> Result<&RangeToken> {
        self.tokens
            .get(key)
            .ok_or_else(|| error!(ErrorCodes::RangeUnknownToken))
    }

    pub fn get_mut(&mut self, key: &Pubkey) -> Result<&mut RangeToken> {
        self.tokens
            .get_mut(key)
            .ok_or_else(|| error!(ErrorCodes::RangeUnknownToken))
    }

    pub fn contains(&self, key: &Pubkey) -> bool {
        self.tokens.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn add_beacon(&mut self, beacon: RangeTokenBeacon) -> Result<()> {
        if self.beacons.contains_key(&beacon.key) {
            return Err(ErrorCodes::RangeBeaconAlreadyExists.into());
        }
        self.beacons.insert(beacon.key, beacon);
        Ok(())
    }

    pub fn beacon(&self, key: &Pubkey) -> Option<&RangeTokenBeacon> {
        self.beacons.get(key)
    }

    pub fn beacon_mut(&mut self, key: &Pubkey) -> Option<&mut RangeTokenBeacon> {
        self.beacons.get_mut(key)
    }

    /// Implementation version a range token currently resolves to.
    pub fn implementation_version(&self, range: &Pubkey) -> Result<u16> {
        let range_token = self.get(range)?;
        self.beacon(&range_token.beacon)
            .map(|beacon| beacon.version)
            .ok_or_else(|| error!(ErrorCodes::RangeBeaconNotFound))
    }
}
