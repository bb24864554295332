//! Active network selection
//!
//! A network is selected once per run and read many times afterwards.
//! [`ActiveNetwork`] is the explicit handle components can be given; the free
//! functions at the bottom drive the same set-once logic over the global
//! registry for binaries that want a process-wide default.
//!
//! Unit-test parameters are mutable only through an [`ActiveNetwork`] that
//! owns its registry. The global registry is shared and read-only, so
//! selecting the unit-test network process-wide yields its defaults.

use crate::network::NetworkType;
use crate::params::{ModifiableParams, NetworkParams};
use crate::registry::ParameterRegistry;
use crate::{Error, Result};
use once_cell::sync::OnceCell;

/// Record `network` in `cell`, refusing to switch to a different one
fn select_once(cell: &OnceCell<NetworkType>, network: NetworkType) -> Result<()> {
    match cell.set(network) {
        Ok(()) => {
            tracing::info!(%network, "Selected chain parameters");
            Ok(())
        }
        Err(_) => match cell.get() {
            Some(current) if *current == network => Ok(()),
            Some(current) => Err(Error::NetworkAlreadySelected {
                current: *current,
                requested: network,
            }),
            None => Err(Error::NetworkNotSelected),
        },
    }
}

/// Set-once holder of the current network
#[derive(Debug)]
pub struct ActiveNetwork {
    registry: ParameterRegistry,
    selected: OnceCell<NetworkType>,
}

impl ActiveNetwork {
    /// Wrap a registry with nothing selected yet
    pub fn new(registry: ParameterRegistry) -> Self {
        Self {
            registry,
            selected: OnceCell::new(),
        }
    }

    /// Select the network for this run.
    ///
    /// Selecting the same network again is a no-op; switching to another one
    /// fails with [`Error::NetworkAlreadySelected`].
    pub fn select(&self, network: NetworkType) -> Result<&NetworkParams> {
        select_once(&self.selected, network)?;
        Ok(self.registry.get(network))
    }

    /// The selected network, if any
    pub fn selected(&self) -> Option<NetworkType> {
        self.selected.get().copied()
    }

    /// Current parameters, or [`Error::NetworkNotSelected`]
    pub fn try_current(&self) -> Result<&NetworkParams> {
        self.selected()
            .map(|network| self.registry.get(network))
            .ok_or(Error::NetworkNotSelected)
    }

    /// Current parameters.
    ///
    /// Panics if no network was selected.
    pub fn current(&self) -> &NetworkParams {
        self.try_current().unwrap_or_else(|e| fatal(e))
    }

    /// Mutable unit-test parameters, or an error on any other network
    pub fn try_current_mutable(&mut self) -> Result<&mut ModifiableParams> {
        match self.selected() {
            Some(NetworkType::UnitTest) => Ok(self.registry.unittest_mut()),
            Some(other) => Err(Error::UnsupportedMutation(other)),
            None => Err(Error::NetworkNotSelected),
        }
    }

    /// Mutable unit-test parameters.
    ///
    /// Panics unless the unit-test network is selected.
    pub fn current_mutable(&mut self) -> &mut ModifiableParams {
        self.try_current_mutable().unwrap_or_else(|e| fatal(e))
    }

    /// The underlying registry
    pub fn registry(&self) -> &ParameterRegistry {
        &self.registry
    }
}

fn fatal(error: Error) -> ! {
    tracing::error!("Chain parameter access failed: {}", error);
    panic!("chain parameter access failed: {error}")
}

static GLOBAL_SELECTION: OnceCell<NetworkType> = OnceCell::new();

/// Select the process-wide network.
///
/// The returned parameters are read-only for every network, unit-test
/// included; tests that vary parameters use [`ActiveNetwork::current_mutable`].
pub fn select_params(network: NetworkType) -> Result<&'static NetworkParams> {
    let registry = ParameterRegistry::global();
    select_once(&GLOBAL_SELECTION, network)?;
    Ok(registry.get(network))
}

/// Resolve a network name (`main`, `test`, `regtest`, `unittest`) and select it
pub fn select_params_by_name(name: &str) -> Result<&'static NetworkParams> {
    select_params(name.parse()?)
}

/// Process-wide current parameters.
///
/// Panics if [`select_params`] has not been called.
pub fn params() -> &'static NetworkParams {
    match GLOBAL_SELECTION.get() {
        Some(network) => ParameterRegistry::global().get(*network),
        None => fatal(Error::NetworkNotSelected),
    }
}
