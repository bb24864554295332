//! Process-wide selection. Kept to a single test: the selection is per process.

use koinmudra_params::{params, select_params, select_params_by_name, Error, NetworkType};
use std::panic;

#[test]
fn test_global_selection_lifecycle() {
    // Reading before selecting is fatal
    assert!(panic::catch_unwind(params).is_err());

    assert!(matches!(
        select_params_by_name("nonet"),
        Err(Error::InvalidNetwork(_))
    ));

    let selected = select_params_by_name("test").unwrap();
    assert_eq!(selected.network, NetworkType::Testnet);
    assert!(std::ptr::eq(params(), selected));

    // Same network again is accepted, a different one is not
    assert!(select_params(NetworkType::Testnet).is_ok());
    assert!(matches!(
        select_params(NetworkType::Mainnet),
        Err(Error::NetworkAlreadySelected {
            current: NetworkType::Testnet,
            requested: NetworkType::Mainnet
        })
    ));
    assert_eq!(params().default_port, 40007);
}
