//! Mens chain parameters
//!
//! This crate provides the per-network consensus constants, the genesis
//! block construction and verification, bootstrap seed expansion and the
//! process-wide registry that selects the active network at startup.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod base58;
pub mod chainparams;
pub mod config;
pub mod consensus;
pub mod genesis;
pub mod network;
pub mod registry;
pub mod seeds;

pub use base58::{Base58Prefixes, Base58Type};
pub use chainparams::{ChainParams, ParamsSummary};
pub use config::ParamsConfig;
pub use consensus::ConsensusParams;
pub use genesis::{GenesisMiner, GenesisSpec, MinedGenesis};
pub use network::NetworkId;
pub use registry::{
    freeze, init, params, registry, select_params, select_params_from_flag, ParamsRegistry,
};
pub use seeds::{SeedPeerRecord, SeedSpec};

use mens_core::Hash256;

/// Error types for parameter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Recomputed genesis digest disagrees with the hard-coded one
    #[error("Genesis {what} mismatch on {network}: expected {expected}, computed {computed}")]
    GenesisMismatch {
        /// Network whose genesis failed
        network: NetworkId,
        /// Which digest disagreed ("hash" or "merkle root")
        what: &'static str,
        /// Hard-coded digest
        expected: Hash256,
        /// Digest computed from the block content
        computed: Hash256,
    },

    /// No parameter set is defined for the requested network
    #[error("Unimplemented network: {0}")]
    UnknownNetwork(String),

    /// A fixed seed entry has an invalid address or port
    #[error("Malformed seed entry: {0}")]
    SeedTableMalformed(String),

    /// Network selection attempted after startup finished
    #[error("Network selection is frozen; the active network is {0}")]
    RegistryFrozen(NetworkId),

    /// Two networks share a message start
    #[error("Networks {0} and {1} share the same message start")]
    DuplicateMessageStart(NetworkId, NetworkId),

    /// Address version bytes of a network overlap
    #[error("Ambiguous address version bytes on {0}")]
    AmbiguousPrefixes(NetworkId),

    /// Encoded address could not be decoded or classified
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Consensus primitive error
    #[error(transparent)]
    Core(#[from] mens_core::Error),
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
