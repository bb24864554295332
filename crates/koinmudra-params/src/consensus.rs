//! Consensus parameters for KoinMudra

use bitcoin::Target;
use serde::{Serialize, Serializer};

/// Monetary amount in base units
pub type Amount = i64;

/// Base units per coin
pub const COIN: Amount = 100_000_000;

/// Consensus parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsensusParams {
    /// Block subsidy reduction interval
    pub subsidy_halving_interval: u32,
    /// Deepest reorganization the node will follow
    pub max_reorganization_depth: u32,
    /// Upgraded blocks in the check window needed to enforce new rules
    pub enforce_block_upgrade_majority: u32,
    /// Upgraded blocks in the check window needed to reject outdated blocks
    pub reject_block_outdated_majority: u32,
    /// Size of the block-upgrade check window
    pub to_check_block_upgrade_majority: u32,
    /// Proof-of-work target limit (easiest allowed target)
    #[serde(serialize_with = "serialize_target")]
    pub pow_limit: Target,
    /// Proof-of-work retarget timespan in seconds
    pub pow_target_timespan: i64,
    /// Proof-of-work block spacing in seconds
    pub pow_target_spacing: i64,
    /// Proof-of-stake target limit
    #[serde(serialize_with = "serialize_target")]
    pub pos_limit: Target,
    /// Proof-of-stake retarget timespan in seconds
    pub pos_target_timespan: i64,
    /// Proof-of-stake block spacing in seconds
    pub pos_target_spacing: i64,
    /// Coinbase and coinstake maturity (blocks)
    pub coinbase_maturity: u32,
    /// Tolerated drift in the masternode count
    pub masternode_count_drift: u32,
    /// Maximum supply (base units)
    pub max_money_out: Amount,
    /// Last block produced by proof-of-work; proof-of-stake follows
    pub last_pow_block: u32,
    /// Height at which the stake modifier update activates
    pub modifier_update_block: u32,
}

impl ConsensusParams {
    /// Number of blocks between proof-of-work difficulty adjustments
    pub fn difficulty_adjustment_interval(&self) -> i64 {
        self.pow_target_timespan / self.pow_target_spacing
    }

    /// Whether blocks at `height` are produced by proof-of-stake
    pub const fn is_proof_of_stake_height(&self, height: u32) -> bool {
        height > self.last_pow_block
    }

    /// Target block spacing in effect at `height`
    pub const fn target_spacing_at(&self, height: u32) -> i64 {
        if self.is_proof_of_stake_height(height) {
            self.pos_target_spacing
        } else {
            self.pow_target_spacing
        }
    }

    /// Check if amount is valid (within max supply)
    pub fn is_valid_amount(&self, amount: Amount) -> bool {
        (0..=self.max_money_out).contains(&amount)
    }
}

/// `~uint256(0) >> shift`: the easiest target with `shift` leading zero bits
pub fn target_limit(shift: u32) -> Target {
    let mut be = [0xffu8; 32];
    let full = (shift / 8).min(32) as usize;
    for byte in be.iter_mut().take(full) {
        *byte = 0;
    }
    if full < 32 {
        be[full] = 0xff >> (shift % 8);
    }
    Target::from_be_bytes(be)
}

fn serialize_target<S: Serializer>(target: &Target, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(target.to_be_bytes()))
}
