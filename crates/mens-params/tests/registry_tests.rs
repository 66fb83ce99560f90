//! Process-wide registry lifecycle
//!
//! The global registry is shared by every test in this binary, so the whole
//! startup sequence runs in a single test.

use mens_params::{
    freeze, init, params, registry, select_params, select_params_from_flag, Error, NetworkId,
    ParamsConfig,
};

#[test]
fn test_startup_sequence() {
    // Lazily built on first read, mainnet by default
    assert_eq!(params().network, NetworkId::Main);
    assert!(std::ptr::eq(init().unwrap(), registry()));

    select_params_from_flag(true).unwrap();
    assert_eq!(params().network, NetworkId::Testnet);
    assert_eq!(params().default_port, 25007);

    let err = select_params(NetworkId::Regtest).unwrap_err();
    assert!(matches!(err, Error::UnknownNetwork(_)));
    assert_eq!(params().network, NetworkId::Testnet);

    let config = ParamsConfig::from_json(r#"{"testnet": false}"#).unwrap();
    config.apply(registry()).unwrap();
    assert_eq!(params().network, NetworkId::Main);

    freeze().unwrap();
    assert!(registry().is_frozen());
    assert!(matches!(
        select_params(NetworkId::Testnet),
        Err(Error::RegistryFrozen(NetworkId::Main))
    ));
    assert!(matches!(
        config.apply(registry()),
        Err(Error::RegistryFrozen(_))
    ));
    assert_eq!(params().message_start, [0x53, 0x07, 0x19, 0x6a]);
}
