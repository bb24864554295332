//! Registry of every network's parameter set
//!
//! All networks are built eagerly so that a bad genesis literal on any of
//! them stops the process before a network is even selected.

use crate::network::NetworkType;
use crate::params::{ModifiableParams, NetworkParams};
use crate::{Error, Result};
use once_cell::sync::Lazy;

/// One verified parameter set per network
#[derive(Debug, Clone)]
pub struct ParameterRegistry {
    main: NetworkParams,
    testnet: NetworkParams,
    regtest: NetworkParams,
    unittest: ModifiableParams,
}

impl ParameterRegistry {
    /// Build and verify every network.
    ///
    /// Fails on a genesis mismatch or when two networks share a message-start
    /// marker.
    pub fn build() -> Result<Self> {
        let main = NetworkParams::mainnet()?;
        let testnet = main.derive_testnet()?;
        let regtest = testnet.derive_regtest()?;
        let unittest = main.derive_unittest()?;

        let registry = Self {
            main,
            testnet,
            regtest,
            unittest,
        };
        registry.check_message_starts()?;

        tracing::info!(
            main = %registry.main.hash_genesis_block(),
            testnet = %registry.testnet.hash_genesis_block(),
            regtest = %registry.regtest.hash_genesis_block(),
            "Chain parameters initialised"
        );
        Ok(registry)
    }

    /// The process-wide registry.
    ///
    /// Panics on first use if any network fails verification: a node with an
    /// unverified genesis must not start.
    pub fn global() -> &'static ParameterRegistry {
        static REGISTRY: Lazy<ParameterRegistry> = Lazy::new(|| {
            ParameterRegistry::build().unwrap_or_else(|e| {
                tracing::error!("Chain parameter initialisation failed: {}", e);
                panic!("chain parameter initialisation failed: {e}")
            })
        });
        &REGISTRY
    }

    /// Parameters for `network`
    pub fn get(&self, network: NetworkType) -> &NetworkParams {
        match network {
            NetworkType::Mainnet => &self.main,
            NetworkType::Testnet => &self.testnet,
            NetworkType::Regtest => &self.regtest,
            NetworkType::UnitTest => self.unittest.params(),
        }
    }

    /// Mutable unit-test parameters
    pub fn unittest_mut(&mut self) -> &mut ModifiableParams {
        &mut self.unittest
    }

    /// Iterate all parameter sets in registry order
    pub fn iter(&self) -> impl Iterator<Item = &NetworkParams> + '_ {
        NetworkType::ALL.into_iter().map(move |network| self.get(network))
    }

    fn check_message_starts(&self) -> Result<()> {
        let all: Vec<&NetworkParams> = self.iter().collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                if a.message_start == b.message_start {
                    return Err(Error::DuplicateMessageStart(a.network, b.network));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_total() {
        let registry = ParameterRegistry::build().unwrap();
        for network in NetworkType::ALL {
            assert_eq!(registry.get(network).network, network);
        }
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let registry = ParameterRegistry::build().unwrap();
        let first = registry.get(NetworkType::Testnet).clone();
        assert_eq!(registry.get(NetworkType::Testnet), &first);
        assert!(std::ptr::eq(
            registry.get(NetworkType::Testnet),
            registry.get(NetworkType::Testnet)
        ));
    }

    #[test]
    fn test_builds_are_deterministic() {
        let a = ParameterRegistry::build().unwrap();
        let b = ParameterRegistry::build().unwrap();
        for network in NetworkType::ALL {
            assert_eq!(a.get(network), b.get(network));
        }
    }

    #[test]
    fn test_duplicate_message_start_rejected() {
        let mut registry = ParameterRegistry::build().unwrap();
        registry.regtest.message_start = registry.main.message_start;
        let err = registry.check_message_starts().unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateMessageStart(NetworkType::Mainnet, NetworkType::Regtest)
        ));
    }

    #[test]
    fn test_unittest_mutation_visible_through_get() {
        let mut registry = ParameterRegistry::build().unwrap();
        registry.unittest_mut().set_subsidy_halving_interval(42);
        assert_eq!(
            registry.get(NetworkType::UnitTest).consensus.subsidy_halving_interval,
            42
        );
        assert_eq!(
            registry.get(NetworkType::Mainnet).consensus.subsidy_halving_interval,
            1_050_000
        );
    }

    #[test]
    fn test_global_registry_is_shared() {
        assert!(std::ptr::eq(
            ParameterRegistry::global(),
            ParameterRegistry::global()
        ));
    }
}
