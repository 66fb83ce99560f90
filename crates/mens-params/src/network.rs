//! Mens network identifiers

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network identifier
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// Production network
    #[default]
    Main,
    /// Public test network
    Testnet,
    /// Local regression network (no parameter set defined)
    Regtest,
}

impl NetworkId {
    /// Every declared network, defined or not
    pub const ALL: [NetworkId; 3] = [NetworkId::Main, NetworkId::Testnet, NetworkId::Regtest];

    /// Human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Testnet => "testnet",
            NetworkId::Regtest => "regtest",
        }
    }

    /// Network chosen by the "use test network" startup flag
    pub const fn from_testnet_flag(is_testnet: bool) -> Self {
        if is_testnet {
            NetworkId::Testnet
        } else {
            NetworkId::Main
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkId::Main),
            "test" | "testnet" => Ok(NetworkId::Testnet),
            "regtest" => Ok(NetworkId::Regtest),
            _ => Err(Error::UnknownNetwork(s.to_string())),
        }
    }
}
