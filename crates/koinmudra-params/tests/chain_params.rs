//! Cross-network invariants of the parameter registry

use koinmudra_params::bitcoin::hashes::Hash;
use koinmudra_params::bitcoin::BlockHash;
use koinmudra_params::{
    build_genesis, ActiveNetwork, Base58Type, DoubleSha256, NetworkType, ParameterRegistry,
};

const MAINNET_GENESIS_HASH: &str =
    "a62610152da80333a8d95409ce38e1da7621a1bb27f9f94842639695663365a8";
const GENESIS_MERKLE_ROOT: &str =
    "16ef77c00fea8839672de48cd32f7290e3d8f71b76312e7a4d2407fb6387a267";

fn pinned(network: NetworkType) -> &'static str {
    match network {
        NetworkType::Mainnet | NetworkType::UnitTest => MAINNET_GENESIS_HASH,
        NetworkType::Testnet => "e0eb50a7b06e04de4120833f583688f99af0dca8ce6081e1a42ae31a99b21739",
        NetworkType::Regtest => "e8731e1395702a5bf37f1223e86934af0e0dd22cf9c9a0fa0a10a20f7d72a4c1",
    }
}

#[test]
fn test_every_genesis_matches_pinned_literals() {
    let registry = ParameterRegistry::build().expect("registry builds");
    for params in registry.iter() {
        let rebuilt = build_genesis(&params.genesis_inputs, &DoubleSha256);
        assert_eq!(rebuilt.hash().to_string(), pinned(params.network));
        assert_eq!(rebuilt.merkle_root().to_string(), GENESIS_MERKLE_ROOT);
        assert_eq!(rebuilt, params.genesis);
        assert_eq!(rebuilt.header().prev_blockhash, BlockHash::all_zeros());
    }
}

#[test]
fn test_message_starts_pairwise_distinct() {
    let registry = ParameterRegistry::build().unwrap();
    let markers: Vec<[u8; 4]> = registry.iter().map(|p| p.message_start.0).collect();
    for (i, a) in markers.iter().enumerate() {
        for b in &markers[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_checkpoints_start_at_genesis() {
    let registry = ParameterRegistry::build().unwrap();
    for params in registry.iter() {
        let heights: Vec<u32> = params.checkpoints.iter().map(|cp| cp.height).collect();
        assert!(heights.windows(2).all(|w| w[0] < w[1]));

        let first = params.checkpoints.iter().next().expect("genesis checkpoint");
        assert_eq!(first.height, 0);
        assert_eq!(first.hash, params.hash_genesis_block());
        assert!(params.checkpoints.check_block(0, &params.hash_genesis_block()));
    }
}

#[test]
fn test_select_main_scenario() {
    let active = ActiveNetwork::new(ParameterRegistry::build().unwrap());
    active.select(NetworkType::Mainnet).unwrap();

    let current = active.current();
    assert_eq!(
        current.genesis.hash(),
        MAINNET_GENESIS_HASH.parse::<BlockHash>().unwrap()
    );
    assert_eq!(current.base58_prefix(Base58Type::PubkeyAddress), &[45]);
    assert_eq!(current.base58_prefix(Base58Type::ScriptAddress), &[50]);
    assert_eq!(current.base58_prefix(Base58Type::SecretKey), &[193]);
    assert_eq!(current.default_port, 40009);
    assert_eq!(current.message_start.to_string(), "20dc33cb");
}

#[test]
fn test_network_prefixes_differ() {
    let registry = ParameterRegistry::build().unwrap();
    let main = registry.get(NetworkType::Mainnet);
    let test = registry.get(NetworkType::Testnet);
    assert_ne!(
        main.base58_prefix(Base58Type::PubkeyAddress),
        test.base58_prefix(Base58Type::PubkeyAddress)
    );
    assert_ne!(
        main.base58_prefix(Base58Type::ExtPublicKey),
        test.base58_prefix(Base58Type::ExtPublicKey)
    );
}

#[test]
fn test_only_main_requires_standard() {
    let registry = ParameterRegistry::build().unwrap();
    for params in registry.iter() {
        let production_like = matches!(params.network, NetworkType::Mainnet | NetworkType::UnitTest);
        assert_eq!(params.flags.require_standard, production_like);
        assert_eq!(params.is_test_network(), params.network != NetworkType::Mainnet);
    }
}
