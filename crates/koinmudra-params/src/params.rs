//! Per-network parameter sets
//!
//! Mainnet is spelled out field by field. Every other network starts from a
//! copy of its base network and applies an explicit list of overrides, so each
//! result is a complete, independent value.

use crate::base58::{Base58Prefixes, Base58Type};
use crate::checkpoints::CheckpointTable;
use crate::consensus::{target_limit, ConsensusParams, COIN};
use crate::genesis::{Genesis, GenesisInputs, PinnedGenesis};
use crate::hash::DoubleSha256;
use crate::network::{MessageStart, NetworkType};
use crate::seeds::{convert_seed6, DnsSeed, SeedAddress, SeedSpec6, MAINNET_FIXED_SEEDS};
use crate::{Error, Result};
use bitcoin::{BlockHash, CompactTarget};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::ops::Deref;

const GENESIS_MESSAGE: &str =
    "U.S. sets record for new coronavirus cases, surpassing 55,000. July 2, 2020.";
const GENESIS_REWARD_PUBKEY: &str = "040ec90902813b0528228715b76d72ad505772b5c462b4b11c668b5d0da3a5e9d236fd7754cdc23a245ec9e54d9afab53440700c6b8a61fbdd6d864c28672d583a";

/// Every network shares the mainnet coinbase, hence one merkle root
const GENESIS_MERKLE_ROOT: &str =
    "16ef77c00fea8839672de48cd32f7290e3d8f71b76312e7a4d2407fb6387a267";
const MAINNET_GENESIS_HASH: &str =
    "a62610152da80333a8d95409ce38e1da7621a1bb27f9f94842639695663365a8";
const TESTNET_GENESIS_HASH: &str =
    "e0eb50a7b06e04de4120833f583688f99af0dca8ce6081e1a42ae31a99b21739";
const REGTEST_GENESIS_HASH: &str =
    "e8731e1395702a5bf37f1223e86934af0e0dd22cf9c9a0fa0a10a20f7d72a4c1";

const MAINNET_DNS_SEEDS: [DnsSeed; 7] = [
    DnsSeed::new("seed01.koinmudra.com"),
    DnsSeed::new("seed02.koinmudra.com"),
    DnsSeed::new("seed03.koinmudra.com"),
    DnsSeed::new("seed04.koinmudra.com"),
    DnsSeed::new("explorer.koinmudra.com"),
    DnsSeed::new("wallet.koinmudra.com"),
    DnsSeed::new("koinmudra.com"),
];

/// Behavioral switches that differ between production and testing networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainFlags {
    /// Mining requires at least one peer connection
    pub mining_requires_peers: bool,
    /// Minimum-difficulty blocks are allowed
    pub allow_min_difficulty_blocks: bool,
    /// Expensive consistency checks run by default
    pub default_consistency_checks: bool,
    /// Non-standard transactions are rejected
    pub require_standard: bool,
    /// Blocks may be mined on demand
    pub mine_blocks_on_demand: bool,
    /// Proof-of-work checks may be skipped
    pub skip_proof_of_work_check: bool,
    /// RPC reports the legacy `testnet` field
    pub testnet_to_be_deprecated_field_rpc: bool,
    /// Headers-first sync is active by default
    pub headers_first_syncing_active: bool,
}

/// Masternode, spork and treasury configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MasternodeParams {
    /// Public key verifying spork messages
    pub spork_key: &'static str,
    /// Placeholder address used by the obfuscation pool
    pub pool_dummy_address: &'static str,
    /// Maximum transactions in one pool session
    pub pool_max_transactions: u32,
    /// Unix time at which masternode payments start
    pub start_payments: i64,
    /// Confirmations required for the budget finalization fee
    pub budget_fee_confirmations: u32,
    /// Treasury payout address
    pub treasury_address: &'static str,
}

/// The complete parameter set of one network
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkParams {
    /// Network identifier
    pub network: NetworkType,
    /// Human-readable network id
    pub name: &'static str,
    /// Peer-protocol message marker
    pub message_start: MessageStart,
    /// Public key verifying network alerts
    #[serde(with = "hex::serde")]
    pub alert_pubkey: Vec<u8>,
    /// Default P2P listen port
    pub default_port: u16,
    /// Worker threads for the built-in miner (0 = one per core)
    pub miner_threads: u32,
    /// Consensus constants
    pub consensus: ConsensusParams,
    /// Declared genesis inputs
    pub genesis_inputs: GenesisInputs,
    /// Verified genesis block
    pub genesis: Genesis,
    /// Checkpoint data
    pub checkpoints: CheckpointTable,
    /// Base58 prefixes
    pub base58_prefixes: Base58Prefixes,
    /// Fixed seed records; see [`NetworkParams::fixed_seed_addresses`]
    pub fixed_seeds: Vec<SeedSpec6>,
    /// DNS seeds
    pub dns_seeds: Vec<DnsSeed>,
    /// Behavioral flags
    pub flags: ChainFlags,
    /// Masternode and treasury settings
    pub masternode: MasternodeParams,
}

impl NetworkParams {
    /// Get mainnet parameters
    pub fn mainnet() -> Result<Self> {
        let genesis_inputs = GenesisInputs::new(
            GENESIS_MESSAGE.as_bytes(),
            decode_hex(GENESIS_REWARD_PUBKEY)?,
            1_593_648_000,
            504_365_040,
            3_969_909,
        )?;
        let genesis = pin(
            NetworkType::Mainnet,
            genesis_inputs.clone(),
            MAINNET_GENESIS_HASH,
        )?;

        Ok(Self {
            network: NetworkType::Mainnet,
            name: NetworkType::Mainnet.name(),
            message_start: MessageStart([0x20, 0xdc, 0x33, 0xcb]),
            alert_pubkey: decode_hex("04cfe8280e3af2a1572c991dac99cf9c7c5d754534576050edabcb6b1876cc9e9d4e7ae01740a127f9d89c508d9f386bf5d23ad5a6eb7c8d5bc52fad7c60f39df2")?,
            default_port: 40009,
            miner_threads: 0,
            consensus: ConsensusParams {
                subsidy_halving_interval: 1_050_000,
                max_reorganization_depth: 100,
                enforce_block_upgrade_majority: 750,
                reject_block_outdated_majority: 950,
                to_check_block_upgrade_majority: 1000,
                pow_limit: target_limit(20),
                pow_target_timespan: 60,
                pow_target_spacing: 60,
                pos_limit: target_limit(20),
                pos_target_timespan: 40 * 60,
                pos_target_spacing: 60,
                coinbase_maturity: 5,
                masternode_count_drift: 20,
                max_money_out: 10_000_000 * COIN,
                last_pow_block: 2000,
                modifier_update_block: 1,
            },
            genesis_inputs,
            genesis,
            checkpoints: CheckpointTable::new(
                &[(0, MAINNET_GENESIS_HASH)],
                1_593_648_000,
                0,
                1440.0,
            )?,
            base58_prefixes: Base58Prefixes {
                pubkey_address: vec![45],  // 'K'
                script_address: vec![50],  // 'M'
                secret_key: vec![193],
                ext_public_key: vec![0x03, 0x88, 0xb2, 0x1e],
                ext_secret_key: vec![0x02, 0x98, 0xad, 0xe4],
                // SLIP-0044 coin type 0x800092f1
                ext_coin_type: vec![0x70, 0x01, 0x92, 0xf1],
            },
            fixed_seeds: MAINNET_FIXED_SEEDS.to_vec(),
            dns_seeds: MAINNET_DNS_SEEDS.to_vec(),
            flags: ChainFlags {
                mining_requires_peers: true,
                allow_min_difficulty_blocks: false,
                default_consistency_checks: false,
                require_standard: true,
                mine_blocks_on_demand: false,
                skip_proof_of_work_check: false,
                testnet_to_be_deprecated_field_rpc: false,
                headers_first_syncing_active: false,
            },
            masternode: MasternodeParams {
                spork_key: "0446c867d14ac892741c068436c05b6b161957aed0261dfa52e830eb124030fb19d96a206563c3011bec319e268b0284d42e48e59c24da7fd1b2012986e9bcef7f",
                pool_dummy_address: "KDzaDvzEZKuKvMMRRBs6j5hEPwizepJiYx",
                pool_max_transactions: 3,
                start_payments: 1_593_691_200,
                budget_fee_confirmations: 6,
                treasury_address: "KDLFESNY68pEMK3j2sR6HR4YHJVZ2s997x",
            },
        })
    }

    /// Get testnet parameters
    pub fn testnet() -> Result<Self> {
        Self::mainnet()?.derive_testnet()
    }

    /// Get regtest parameters
    pub fn regtest() -> Result<Self> {
        Self::testnet()?.derive_regtest()
    }

    /// Get unit-test parameters, the only mutable set
    pub fn unittest() -> Result<ModifiableParams> {
        Self::mainnet()?.derive_unittest()
    }

    /// Testnet: mainnet with its own identity, genesis and relaxed policy
    pub(crate) fn derive_testnet(&self) -> Result<Self> {
        let mut p = self.clone();
        p.network = NetworkType::Testnet;
        p.name = NetworkType::Testnet.name();
        p.message_start = MessageStart([0x4c, 0x3d, 0x34, 0xac]);
        p.alert_pubkey = decode_hex("04d0628a7ee517d8edecceffb3c0382d68ebd0a11776dbb04f3b565957867e20caded36ef7334b84ca6e6e1187096efb7493e8a267fd34a16f989a671e8a239472")?;
        p.default_port = 40007;
        p.miner_threads = 0;

        p.consensus.enforce_block_upgrade_majority = 51;
        p.consensus.reject_block_outdated_majority = 75;
        p.consensus.to_check_block_upgrade_majority = 100;
        p.consensus.last_pow_block = 1000;
        p.consensus.masternode_count_drift = 4;

        p.genesis_inputs.time = 1_593_691_200;
        p.genesis_inputs.bits = CompactTarget::from_consensus(504_365_040);
        p.genesis_inputs.nonce = 1_242_802;
        p.genesis = pin(
            NetworkType::Testnet,
            p.genesis_inputs.clone(),
            TESTNET_GENESIS_HASH,
        )?;
        p.checkpoints = CheckpointTable::new(
            &[(0, TESTNET_GENESIS_HASH)],
            1_593_691_200,
            0,
            1440.0,
        )?;

        p.base58_prefixes = Base58Prefixes {
            pubkey_address: vec![107], // 'k'
            script_address: vec![110], // 'm'
            secret_key: vec![193],
            ext_public_key: vec![0x02, 0x88, 0xc2, 0x1e],
            ext_secret_key: vec![0x12, 0x78, 0xad, 0xe4],
            // Testnet coin type 1
            ext_coin_type: vec![0x80, 0x20, 0x00, 0x01],
        };

        p.fixed_seeds.clear();
        p.dns_seeds.clear();

        p.flags.mining_requires_peers = true;
        p.flags.allow_min_difficulty_blocks = false;
        p.flags.default_consistency_checks = false;
        p.flags.require_standard = false;
        p.flags.mine_blocks_on_demand = false;
        p.flags.testnet_to_be_deprecated_field_rpc = true;

        p.masternode = MasternodeParams {
            spork_key: "04de3deedb9fc1202793e23121aee132f08ba4617cfd5ee6c664abbc1936f6a0b763f3606f1ebff78f0894932bfaff2ceae93737b3e53bb15c49ee271d2b8ddd53",
            pool_dummy_address: "kFUy3uzz9rMHf1evwzfsgu4oYZLiNh2EP8",
            pool_max_transactions: 2,
            // 24 hours after genesis
            start_payments: i64::from(p.genesis_inputs.time) + 86_400,
            // Short, testnet only has an 8 block finalization window
            budget_fee_confirmations: 3,
            treasury_address: "kHk54sqsqmU4z2bxty1vak3iDAt1ApP15y",
        };
        Ok(p)
    }

    /// Regtest: testnet with trivial difficulty and on-demand mining
    pub(crate) fn derive_regtest(&self) -> Result<Self> {
        let mut p = self.clone();
        p.network = NetworkType::Regtest;
        p.name = NetworkType::Regtest.name();
        p.message_start = MessageStart([0x20, 0xce, 0x12, 0xbc]);
        p.default_port = 40005;
        p.miner_threads = 1;

        p.consensus.subsidy_halving_interval = 150;
        p.consensus.enforce_block_upgrade_majority = 750;
        p.consensus.reject_block_outdated_majority = 950;
        p.consensus.to_check_block_upgrade_majority = 1000;
        p.consensus.pow_target_timespan = 24 * 60 * 60;
        p.consensus.pow_target_spacing = 2 * 60;
        p.consensus.pow_limit = target_limit(1);

        p.genesis_inputs.time = 1_593_691_200;
        p.genesis_inputs.bits = CompactTarget::from_consensus(0x207f_ffff);
        p.genesis_inputs.nonce = 9_247_419;
        p.genesis = pin(
            NetworkType::Regtest,
            p.genesis_inputs.clone(),
            REGTEST_GENESIS_HASH,
        )?;
        p.checkpoints = CheckpointTable::new(
            &[(0, REGTEST_GENESIS_HASH)],
            1_593_691_200,
            0,
            1440.0,
        )?;

        p.fixed_seeds.clear();
        p.dns_seeds.clear();

        p.flags.mining_requires_peers = false;
        p.flags.allow_min_difficulty_blocks = true;
        p.flags.default_consistency_checks = true;
        p.flags.require_standard = false;
        p.flags.mine_blocks_on_demand = true;
        p.flags.testnet_to_be_deprecated_field_rpc = false;
        Ok(p)
    }

    /// Unit-test: mainnet consensus and checkpoints, no peers required
    pub(crate) fn derive_unittest(&self) -> Result<ModifiableParams> {
        let mut p = self.clone();
        p.network = NetworkType::UnitTest;
        p.name = NetworkType::UnitTest.name();
        p.message_start = MessageStart([0xa3, 0x7e, 0xd1, 0x5c]);
        p.default_port = 30003;

        p.genesis = pin(
            NetworkType::UnitTest,
            p.genesis_inputs.clone(),
            MAINNET_GENESIS_HASH,
        )?;

        p.fixed_seeds.clear();
        p.dns_seeds.clear();

        p.flags.mining_requires_peers = false;
        p.flags.default_consistency_checks = true;
        p.flags.allow_min_difficulty_blocks = false;
        p.flags.mine_blocks_on_demand = true;

        ModifiableParams::try_from(p)
    }

    /// Get the genesis block hash
    pub fn hash_genesis_block(&self) -> BlockHash {
        self.genesis.hash()
    }

    /// Fixed seeds as addresses, last seen one to two weeks before `now`
    pub fn fixed_seed_addresses<R: Rng>(&self, now: DateTime<Utc>, rng: &mut R) -> Vec<SeedAddress> {
        convert_seed6(&self.fixed_seeds, now, rng)
    }

    /// Prefix bytes for a base58 kind
    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }

    /// Whether this is a testing network
    pub fn is_test_network(&self) -> bool {
        self.network.is_test_network()
    }
}

/// Unit-test parameters with setters for the fields tests need to vary.
///
/// Only the unit-test network can be wrapped; production and test networks
/// expose no mutation path at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifiableParams {
    params: NetworkParams,
}

impl TryFrom<NetworkParams> for ModifiableParams {
    type Error = Error;

    fn try_from(params: NetworkParams) -> Result<Self> {
        match params.network {
            NetworkType::UnitTest => Ok(Self { params }),
            other => Err(Error::UnsupportedMutation(other)),
        }
    }
}

impl ModifiableParams {
    /// Set the subsidy halving interval
    pub fn set_subsidy_halving_interval(&mut self, interval: u32) {
        self.params.consensus.subsidy_halving_interval = interval;
    }

    /// Set the enforce-upgrade majority
    pub fn set_enforce_block_upgrade_majority(&mut self, majority: u32) {
        self.params.consensus.enforce_block_upgrade_majority = majority;
    }

    /// Set the reject-outdated majority
    pub fn set_reject_block_outdated_majority(&mut self, majority: u32) {
        self.params.consensus.reject_block_outdated_majority = majority;
    }

    /// Set the upgrade check window
    pub fn set_to_check_block_upgrade_majority(&mut self, window: u32) {
        self.params.consensus.to_check_block_upgrade_majority = window;
    }

    /// Toggle default consistency checks
    pub fn set_default_consistency_checks(&mut self, enabled: bool) {
        self.params.flags.default_consistency_checks = enabled;
    }

    /// Toggle minimum-difficulty blocks
    pub fn set_allow_min_difficulty_blocks(&mut self, allowed: bool) {
        self.params.flags.allow_min_difficulty_blocks = allowed;
    }

    /// Toggle proof-of-work check skipping
    pub fn set_skip_proof_of_work_check(&mut self, skip: bool) {
        self.params.flags.skip_proof_of_work_check = skip;
    }

    /// Read-only view
    pub fn params(&self) -> &NetworkParams {
        &self.params
    }
}

impl Deref for ModifiableParams {
    type Target = NetworkParams;

    fn deref(&self) -> &NetworkParams {
        &self.params
    }
}

fn decode_hex(literal: &str) -> Result<Vec<u8>> {
    hex::decode(literal).map_err(|e| Error::InvalidHex(format!("{literal}: {e}")))
}

fn pin(network: NetworkType, inputs: GenesisInputs, hash: &str) -> Result<Genesis> {
    PinnedGenesis::new(inputs, hash, GENESIS_MERKLE_ROOT)?.verify(network, &DoubleSha256)
}
