//! Stored startup configuration for network selection

use crate::network::NetworkId;
use crate::registry::ParamsRegistry;
use crate::seeds::{expand_seed, parse_seed_addr, SeedPeerRecord, SeedSpec};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable that overrides the testnet flag
pub const TESTNET_ENV: &str = "MENS_TESTNET";

/// Network-related startup settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamsConfig {
    /// Use the test network
    pub testnet: bool,
    /// Additional `ip:port` bootstrap peers
    pub extra_seeds: Vec<String>,
}

impl ParamsConfig {
    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        debug!("Loaded params config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(TESTNET_ENV) {
            self.testnet = parse_flag(&value).ok_or_else(|| {
                Error::Config(format!("{} must be a boolean, got {:?}", TESTNET_ENV, value))
            })?;
        }
        Ok(self)
    }

    /// Network this configuration selects
    pub fn network(&self) -> NetworkId {
        NetworkId::from_testnet_flag(self.testnet)
    }

    /// Expand the configured extra seeds, skipping bad entries
    pub fn extra_seed_records<R: Rng + ?Sized>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<SeedPeerRecord> {
        self.extra_seeds
            .iter()
            .filter_map(|entry| {
                let expanded = parse_seed_addr(entry).and_then(|(addr, port)| {
                    expand_seed(&SeedSpec { addr: &addr, port }, now, rng)
                });
                match expanded {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!("Ignoring configured seed {:?}: {}", entry, e);
                        None
                    }
                }
            })
            .collect()
    }

    /// Perform the startup network selection on a registry
    pub fn apply(&self, registry: &ParamsRegistry) -> Result<()> {
        registry.select(self.network())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_config_serialization() {
        let config = ParamsConfig {
            testnet: true,
            extra_seeds: vec!["1.2.3.4:25007".to_string()],
        };
        let json = config.to_json().unwrap();
        assert_eq!(ParamsConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_default() {
        let config = ParamsConfig::from_json("{}").unwrap();
        assert!(!config.testnet);
        assert!(config.extra_seeds.is_empty());
        assert_eq!(config.network(), NetworkId::Main);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ParamsConfig::from_json("{\"testnet\": 3}"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_env_override() {
        let config = ParamsConfig::default()
            .with_overrides_from(|key| (key == TESTNET_ENV).then(|| "true".to_string()))
            .unwrap();
        assert_eq!(config.network(), NetworkId::Testnet);

        let config = ParamsConfig {
            testnet: true,
            ..Default::default()
        }
        .with_overrides_from(|_| Some("0".to_string()))
        .unwrap();
        assert!(!config.testnet);

        let unchanged = ParamsConfig::default().with_overrides_from(|_| None).unwrap();
        assert!(!unchanged.testnet);
    }

    #[test]
    fn test_bad_env_value() {
        let err = ParamsConfig::default()
            .with_overrides_from(|_| Some("maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_extra_seed_records() {
        let config = ParamsConfig {
            testnet: false,
            extra_seeds: vec![
                "10.0.0.1:16007".to_string(),
                "not-an-address".to_string(),
                "10.0.0.2:0".to_string(),
                "[2001:db8::1]:16007".to_string(),
            ],
        };
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let records = config.extra_seed_records(now, &mut StdRng::seed_from_u64(11));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].socket_addr().to_string(), "10.0.0.1:16007");
        assert_eq!(records[1].socket_addr().to_string(), "[2001:db8::1]:16007");
    }
}
