use anchor_lang::prelude::*;

use crate::constants::INITIAL_IMPLEMENTATION_VERSION;
use crate::errors::ErrorCodes;
use crate::events::LogUpgradeBeacon;

/// Implementation pointer shared by every range token created from it.
///
/// Token state (shares, bounds, liquidity) never moves on upgrade, only the
/// version the tokens resolve their logic through.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct RangeTokenBeacon {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub version: u16,
}

impl RangeTokenBeacon {
    pub fn new(key: Pubkey, owner: Pubkey) -> Self {
        Self {
            key,
            owner,
            version: INITIAL_IMPLEMENTATION_VERSION,
        }
    }

    pub fn upgrade_to(&mut self, signer: Pubkey, version: u16) -> Result<()> {
        if signer != self.owner {
            return Err(ErrorCodes::RangeBeaconOnlyOwner.into());
        }

        if version <= self.version {
            return Err(ErrorCodes::RangeBeaconInvalidVersion.into());
        }

        self.version = version;

        emit!(LogUpgradeBeacon {
            beacon: self.key,
            version,
        });

        Ok(())
    }
}
