//! Blockchain checkpoints
//!
//! A good checkpoint block is surrounded by blocks with reasonable timestamps
//! (no block before it with a later timestamp, none after it with an earlier
//! one) and contains no strange transactions.

use crate::hash::parse_hash;
use crate::{Error, Result};
use bitcoin::BlockHash;
use serde::Serialize;
use std::collections::BTreeMap;

/// Seconds in a day
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Relative cost of verifying a transaction past the last checkpoint
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

/// A blockchain checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Checkpoint {
    /// Block height
    pub height: u32,
    /// Block hash
    pub hash: BlockHash,
}

/// Checkpoints of one network plus the statistics used for sync progress
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointTable {
    checkpoints: BTreeMap<u32, BlockHash>,
    /// Unix timestamp of the last checkpoint block
    pub last_checkpoint_time: i64,
    /// Transactions between genesis and the last checkpoint
    pub transactions_last_checkpoint: u64,
    /// Estimated transactions per day after the last checkpoint
    pub transactions_per_day: f64,
}

impl CheckpointTable {
    /// Create a table from `(height, hash)` literals.
    ///
    /// Heights must be strictly increasing.
    pub fn new(
        entries: &[(u32, &str)],
        last_checkpoint_time: i64,
        transactions_last_checkpoint: u64,
        transactions_per_day: f64,
    ) -> Result<Self> {
        let mut checkpoints = BTreeMap::new();
        let mut previous: Option<u32> = None;
        for (height, hash) in entries {
            if previous.is_some_and(|prev| *height <= prev) {
                return Err(Error::InvalidCheckpoints(format!(
                    "height {} does not follow {}",
                    height,
                    previous.unwrap_or_default()
                )));
            }
            checkpoints.insert(*height, parse_hash(hash)?);
            previous = Some(*height);
        }

        Ok(Self {
            checkpoints,
            last_checkpoint_time,
            transactions_last_checkpoint,
            transactions_per_day,
        })
    }

    /// Whether a block at `height` with `hash` agrees with the checkpoints
    pub fn check_block(&self, height: u32, hash: &BlockHash) -> bool {
        match self.checkpoints.get(&height) {
            Some(expected) => expected == hash,
            None => true,
        }
    }

    /// Get checkpoint at or before given height
    pub fn checkpoint_at_height(&self, height: u32) -> Result<Checkpoint> {
        self.checkpoints
            .range(..=height)
            .next_back()
            .map(|(height, hash)| Checkpoint {
                height: *height,
                hash: *hash,
            })
            .ok_or(Error::CheckpointNotFound(height))
    }

    /// Height of the last checkpoint; a lower bound on the chain height
    pub fn total_blocks_estimate(&self) -> u32 {
        self.checkpoints.keys().next_back().copied().unwrap_or(0)
    }

    /// Highest checkpoint whose hash the caller already knows
    pub fn last_known_checkpoint<F>(&self, mut is_known: F) -> Option<Checkpoint>
    where
        F: FnMut(&BlockHash) -> bool,
    {
        self.checkpoints
            .iter()
            .rev()
            .find(|(_, hash)| is_known(hash))
            .map(|(height, hash)| Checkpoint {
                height: *height,
                hash: *hash,
            })
    }

    /// Rough fraction of the chain verified, in `[0, 1]`.
    ///
    /// `chain_tx` is the transaction count up to the tip, `block_time` the
    /// tip's timestamp and `now` the current time, all Unix seconds.
    pub fn guess_verification_progress(
        &self,
        chain_tx: u64,
        block_time: i64,
        now: i64,
        sigchecks: bool,
    ) -> f64 {
        let factor = if sigchecks {
            SIGCHECK_VERIFICATION_FACTOR
        } else {
            1.0
        };
        let last_tx = self.transactions_last_checkpoint;

        let (work_before, work_after) = if chain_tx <= last_tx {
            let cheap_before = chain_tx as f64;
            let cheap_after = (last_tx - chain_tx) as f64;
            let expensive_after = (now - self.last_checkpoint_time).max(0) as f64
                / SECONDS_PER_DAY
                * self.transactions_per_day;
            (cheap_before, cheap_after + expensive_after * factor)
        } else {
            let cheap_before = last_tx as f64;
            let expensive_before = (chain_tx - last_tx) as f64;
            let expensive_after =
                (now - block_time).max(0) as f64 / SECONDS_PER_DAY * self.transactions_per_day;
            (
                cheap_before + expensive_before * factor,
                expensive_after * factor,
            )
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 0.0;
        }
        work_before / total
    }

    /// All checkpoints in height order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Checkpoint> + '_ {
        self.checkpoints.iter().map(|(height, hash)| Checkpoint {
            height: *height,
            hash: *hash,
        })
    }

    /// Get latest checkpoint
    pub fn latest(&self) -> Option<Checkpoint> {
        self.iter().next_back()
    }

    /// Get checkpoint count
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }
}
