//! Config file loading

use chrono::{TimeZone, Utc};
use mens_params::{Error, NetworkId, ParamsConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"testnet": true, "extra_seeds": ["192.0.2.7:25007"]}}"#
    )
    .unwrap();

    let config = ParamsConfig::load(file.path()).unwrap();
    assert_eq!(config.network(), NetworkId::Testnet);

    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let seeds = config.extra_seed_records(now, &mut StdRng::seed_from_u64(4));
    assert_eq!(seeds.len(), 1);
    assert_eq!(seeds[0].port, 25007);
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.json");
    let config = ParamsConfig {
        testnet: true,
        extra_seeds: vec!["[2001:db8::2]:16007".to_string()],
    };
    std::fs::write(&path, config.to_json().unwrap()).unwrap();
    assert_eq!(ParamsConfig::load(&path).unwrap(), config);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = ParamsConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_malformed_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"testnet = true").unwrap();
    assert!(matches!(
        ParamsConfig::load(file.path()),
        Err(Error::Config(_))
    ));
}
