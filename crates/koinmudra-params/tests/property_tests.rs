//! Property-based tests for koinmudra-params
//!
//! Uses proptest to verify invariants across randomized inputs

use koinmudra_params::bitcoin::consensus::encode;
use koinmudra_params::{
    build_genesis, BlockHasher, DoubleSha256, Error, GenesisInputs, NetworkParams, NetworkType,
    PinnedGenesis,
};
use proptest::prelude::*;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate genesis inputs
fn genesis_inputs_strategy() -> impl Strategy<Value = GenesisInputs> {
    (
        prop::collection::vec(any::<u8>(), 0..120),
        prop::collection::vec(any::<u8>(), 33..=65),
        any::<u32>(),
        any::<u32>(),
        any::<u32>(),
    )
        .prop_map(|(message, pubkey, time, bits, nonce)| {
            GenesisInputs::new(message, pubkey, time, bits, nonce).unwrap()
        })
}

/// A single unit-test mutation
#[derive(Debug, Clone)]
enum Mutation {
    SubsidyHalvingInterval(u32),
    EnforceMajority(u32),
    RejectMajority(u32),
    CheckWindow(u32),
    ConsistencyChecks(bool),
    MinDifficulty(bool),
    SkipPow(bool),
}

fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        any::<u32>().prop_map(Mutation::SubsidyHalvingInterval),
        any::<u32>().prop_map(Mutation::EnforceMajority),
        any::<u32>().prop_map(Mutation::RejectMajority),
        any::<u32>().prop_map(Mutation::CheckWindow),
        any::<bool>().prop_map(Mutation::ConsistencyChecks),
        any::<bool>().prop_map(Mutation::MinDifficulty),
        any::<bool>().prop_map(Mutation::SkipPow),
    ]
}

// ============================================================================
// Header Properties
// ============================================================================

proptest! {
    /// Property: the block hash is the hasher applied to the 80-byte header
    #[test]
    fn prop_hash_covers_serialized_header(inputs in genesis_inputs_strategy()) {
        let genesis = build_genesis(&inputs, &DoubleSha256);
        let header = encode::serialize(genesis.header());
        prop_assert_eq!(header.len(), 80);
        prop_assert_eq!(genesis.hash(), DoubleSha256.hash_header(&header));
        prop_assert_eq!(genesis.hash(), genesis.header().block_hash());
    }

    /// Property: pinning a block's own values verifies, any other time fails
    #[test]
    fn prop_pinned_values_round_trip(inputs in genesis_inputs_strategy()) {
        let genesis = build_genesis(&inputs, &DoubleSha256);
        let pinned = PinnedGenesis::new(
            inputs.clone(),
            &genesis.hash().to_string(),
            &genesis.merkle_root().to_string(),
        ).unwrap();
        prop_assert_eq!(pinned.verify(NetworkType::Regtest, &DoubleSha256).unwrap(), genesis);

        let mut shifted = pinned.clone();
        shifted.inputs.time = inputs.time.wrapping_add(1);
        let is_hash_mismatch = matches!(
            shifted.verify(NetworkType::Regtest, &DoubleSha256),
            Err(Error::GenesisMismatch { field: "hash", .. })
        );
        prop_assert!(is_hash_mismatch);
    }
}

// ============================================================================
// Genesis Properties
// ============================================================================

proptest! {
    /// Property: genesis merkle root is the coinbase txid
    #[test]
    fn prop_single_tx_merkle_is_txid(inputs in genesis_inputs_strategy()) {
        let genesis = build_genesis(&inputs, &DoubleSha256);
        prop_assert_eq!(
            genesis.merkle_root().to_raw_hash(),
            genesis.coinbase().compute_txid().to_raw_hash()
        );
        prop_assert_eq!(genesis.header().time, inputs.time);
        prop_assert_eq!(genesis.header().bits, inputs.bits);
        prop_assert_eq!(genesis.header().nonce, inputs.nonce);
    }

    /// Property: the nonce feeds the hash but not the merkle root
    #[test]
    fn prop_nonce_changes_hash_only(inputs in genesis_inputs_strategy()) {
        let mut bumped = inputs.clone();
        bumped.nonce = inputs.nonce.wrapping_add(1);
        let a = build_genesis(&inputs, &DoubleSha256);
        let b = build_genesis(&bumped, &DoubleSha256);
        prop_assert_eq!(a.merkle_root(), b.merkle_root());
        prop_assert_ne!(a.hash(), b.hash());
    }
}

// ============================================================================
// Unit-Test Mutation Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: each setter changes exactly its own field
    #[test]
    fn prop_setter_changes_only_target(mutation in mutation_strategy()) {
        let mut unit = NetworkParams::unittest().unwrap();
        let mut expected = unit.params().clone();

        match mutation {
            Mutation::SubsidyHalvingInterval(v) => {
                unit.set_subsidy_halving_interval(v);
                expected.consensus.subsidy_halving_interval = v;
            }
            Mutation::EnforceMajority(v) => {
                unit.set_enforce_block_upgrade_majority(v);
                expected.consensus.enforce_block_upgrade_majority = v;
            }
            Mutation::RejectMajority(v) => {
                unit.set_reject_block_outdated_majority(v);
                expected.consensus.reject_block_outdated_majority = v;
            }
            Mutation::CheckWindow(v) => {
                unit.set_to_check_block_upgrade_majority(v);
                expected.consensus.to_check_block_upgrade_majority = v;
            }
            Mutation::ConsistencyChecks(v) => {
                unit.set_default_consistency_checks(v);
                expected.flags.default_consistency_checks = v;
            }
            Mutation::MinDifficulty(v) => {
                unit.set_allow_min_difficulty_blocks(v);
                expected.flags.allow_min_difficulty_blocks = v;
            }
            Mutation::SkipPow(v) => {
                unit.set_skip_proof_of_work_check(v);
                expected.flags.skip_proof_of_work_check = v;
            }
        }

        prop_assert_eq!(unit.params(), &expected);
        prop_assert_eq!(unit.network, NetworkType::UnitTest);
    }
}

// ============================================================================
// Network Name Properties
// ============================================================================

proptest! {
    /// Property: display, parse and serde agree on every network name
    #[test]
    fn prop_name_round_trip(index in 0usize..NetworkType::ALL.len()) {
        let network = NetworkType::ALL[index];
        prop_assert_eq!(network.to_string().parse::<NetworkType>().unwrap(), network);

        let json = serde_json::to_string(&network).unwrap();
        prop_assert_eq!(&json, &format!("\"{}\"", network.name()));
        prop_assert_eq!(serde_json::from_str::<NetworkType>(&json).unwrap(), network);
    }

    /// Property: only the known names parse
    #[test]
    fn prop_unknown_names_rejected(name in "[a-z]{1,12}") {
        let known = ["main", "mainnet", "test", "testnet", "regtest", "unittest"];
        prop_assume!(!known.contains(&name.as_str()));
        prop_assert!(name.parse::<NetworkType>().is_err());
    }
}
