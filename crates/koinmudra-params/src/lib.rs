//! KoinMudra chain parameters
//!
//! This crate provides the per-network parameter sets (main, testnet, regtest
//! and unit-test), deterministic genesis block construction and verification,
//! checkpoint data, and the process-wide selection of the active network.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use bitcoin;

pub mod base58;
pub mod checkpoints;
pub mod consensus;
pub mod genesis;
pub mod hash;
pub mod network;
pub mod params;
pub mod registry;
pub mod seeds;
pub mod selector;

pub use base58::{Base58Prefixes, Base58Type};
pub use checkpoints::{Checkpoint, CheckpointTable};
pub use consensus::{target_limit, Amount, ConsensusParams, COIN};
pub use genesis::{build_genesis, Genesis, GenesisInputs, PinnedGenesis};
pub use hash::{BlockHasher, DoubleSha256};
pub use network::{MessageStart, NetworkType};
pub use params::{ChainFlags, MasternodeParams, ModifiableParams, NetworkParams};
pub use registry::ParameterRegistry;
pub use seeds::{DnsSeed, SeedAddress, SeedSpec6};
pub use selector::{params, select_params, select_params_by_name, ActiveNetwork};

use bitcoin::hashes::sha256d;

/// Error types for parameter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid network specified
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    /// Malformed hash literal
    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    /// Malformed hex literal (keys, scripts)
    #[error("Invalid hex literal: {0}")]
    InvalidHex(String),

    /// Data too long for a single script push
    #[error("Script push of {0} bytes is too large")]
    PushTooLarge(usize),

    /// A rebuilt genesis block does not match its pinned literal
    #[error("{network} genesis {field} mismatch: expected {expected}, computed {actual}")]
    GenesisMismatch {
        /// Network whose genesis failed verification
        network: NetworkType,
        /// Which derived value disagreed ("hash" or "merkle root")
        field: &'static str,
        /// Pinned value
        expected: sha256d::Hash,
        /// Value computed from the declared inputs
        actual: sha256d::Hash,
    },

    /// Two networks share a message-start marker
    #[error("Networks {0} and {1} share a message-start marker")]
    DuplicateMessageStart(NetworkType, NetworkType),

    /// Checkpoint literals are not strictly increasing in height
    #[error("Invalid checkpoints: {0}")]
    InvalidCheckpoints(String),

    /// Checkpoint not found
    #[error("No checkpoint found for height {0}")]
    CheckpointNotFound(u32),

    /// Parameters were read before a network was selected
    #[error("No network has been selected")]
    NetworkNotSelected,

    /// A different network was already selected for this run
    #[error("Network {current} already selected, cannot switch to {requested}")]
    NetworkAlreadySelected {
        /// Network selected earlier in this run
        current: NetworkType,
        /// Network the caller attempted to select
        requested: NetworkType,
    },

    /// Mutation attempted on a network other than unit-test
    #[error("Parameters of network {0} cannot be modified")]
    UnsupportedMutation(NetworkType),
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
