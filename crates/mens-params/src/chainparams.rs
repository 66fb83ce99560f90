//! Per-network parameter sets

use crate::base58::Base58Prefixes;
use crate::consensus::ConsensusParams;
use crate::genesis::{verify_genesis, GenesisSpec};
use crate::network::NetworkId;
use crate::seeds::{expand_fixed_seeds, SeedPeerRecord, MAIN_FIXED_SEEDS, TEST_FIXED_SEEDS};
use crate::Result;
use chrono::{DateTime, Utc};
use mens_core::{Block, CompactTarget, Hash256, ScryptPow, U256};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Key that signs network alerts (uncompressed secp256k1, both networks)
pub const ALERT_PUBKEY_HEX: &str = "04d65960d060168c6ad6efd2f8cf7bd146ca0f3c9fe070e70f7104729b7abd2fcc25a76b4ceac500e5bd5a105f541be0347cd3294139018294f339431bd5f10d72";

/// Mainnet message start
pub const MAIN_MESSAGE_START: [u8; 4] = [0x53, 0x07, 0x19, 0x6a];
/// Testnet message start
pub const TEST_MESSAGE_START: [u8; 4] = [0x53, 0x07, 0x19, 0x6d];

/// Mainnet genesis timestamp, also the chain launch time
pub const MAIN_GENESIS_TIME: u32 = 1_433_624_400;
/// Message embedded in the genesis coinbase
pub const GENESIS_MESSAGE: &[u8] = b"Mens sana in corpore sano";
/// Mainnet genesis nonce
pub const MAIN_GENESIS_NONCE: u32 = 1_527_384;
/// Testnet genesis nonce
pub const TEST_GENESIS_NONCE: u32 = 124_128;

const MAIN_GENESIS_HASH: &str = "0000000102617cecd8aeba57d393e295389b83ff81f223898240282757ad7cdf";
const TEST_GENESIS_HASH: &str = "00006dbe104010a3f14bf569d57c795fd4ad4609566ee005d56bae8f91495225";
const GENESIS_MERKLE_ROOT: &str =
    "f43005788130cec245b86cc0a05c01769832ddbaf7fce43b526870d547e14594";

/// Highest target a block may claim, on every network
pub fn proof_of_work_limit() -> U256 {
    !U256::zero() >> 16
}

/// Literal inputs of the mainnet genesis block
pub fn main_genesis_spec() -> Result<GenesisSpec> {
    Ok(GenesisSpec {
        time: MAIN_GENESIS_TIME,
        message: GENESIS_MESSAGE.to_vec(),
        version: 1,
        bits: CompactTarget::from_target(proof_of_work_limit()),
        nonce: MAIN_GENESIS_NONCE,
        expected_hash: Hash256::from_hex(MAIN_GENESIS_HASH)?,
        expected_merkle_root: Hash256::from_hex(GENESIS_MERKLE_ROOT)?,
    })
}

/// Complete, immutable parameter set of one network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainParams {
    /// Network this set belongs to
    pub network: NetworkId,
    /// Four bytes that open every P2P message
    pub message_start: [u8; 4],
    /// Alert signing key
    pub alert_pubkey: Vec<u8>,
    /// Default P2P port
    pub default_port: u16,
    /// Default RPC port
    pub rpc_port: u16,
    /// Data directory suffix (empty for mainnet)
    pub data_dir: &'static str,
    /// Proof-of-work limit
    pub proof_of_work_limit: U256,
    /// Genesis block
    pub genesis: Block,
    /// Verified genesis hash
    pub genesis_hash: Hash256,
    /// Address version bytes
    pub base58_prefixes: Base58Prefixes,
    /// Bootstrap peers expanded from the fixed seed table
    pub fixed_seeds: Vec<SeedPeerRecord>,
    /// Consensus scalars
    pub consensus: ConsensusParams,
    /// Target shift used when this network's genesis was mined
    pub genesis_mining_shift: u32,
}

impl ChainParams {
    /// Build and verify the mainnet set
    pub fn main() -> Result<Self> {
        Self::main_with(Utc::now(), &mut rand::thread_rng())
    }

    /// Build and verify the mainnet set with an explicit clock and RNG
    pub fn main_with<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Result<Self> {
        let hasher = ScryptPow::new()?;
        let (genesis, genesis_hash) =
            main_genesis_spec()?.build_verified(NetworkId::Main, &hasher)?;

        Ok(Self {
            network: NetworkId::Main,
            message_start: MAIN_MESSAGE_START,
            alert_pubkey: decode_alert_pubkey()?,
            default_port: 16007,
            rpc_port: 16008,
            data_dir: "",
            proof_of_work_limit: proof_of_work_limit(),
            genesis,
            genesis_hash,
            base58_prefixes: Base58Prefixes {
                pubkey_address: vec![55],
                script_address: vec![97],
                secret_key: vec![139],
                ext_public_key: vec![0x04, 0x88, 0xB2, 0x1E],
                ext_secret_key: vec![0x04, 0x88, 0xAD, 0xE4],
            },
            fixed_seeds: expand_fixed_seeds(MAIN_FIXED_SEEDS, now, rng),
            consensus: ConsensusParams::mainnet(MAIN_GENESIS_TIME),
            genesis_mining_shift: 10,
        })
    }

    /// Build and verify the testnet set
    pub fn testnet() -> Result<Self> {
        let main = Self::main()?;
        Self::testnet_from(&main, Utc::now(), &mut rand::thread_rng())
    }

    /// Derive the testnet set from the mainnet set
    pub fn testnet_from<R: Rng + ?Sized>(
        main: &ChainParams,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self> {
        let mut genesis = main.genesis.clone();
        genesis.header.bits = CompactTarget::from_target(main.proof_of_work_limit);
        genesis.header.nonce = TEST_GENESIS_NONCE;

        let hasher = ScryptPow::new()?;
        let genesis_hash = verify_genesis(
            NetworkId::Testnet,
            &genesis,
            &Hash256::from_hex(TEST_GENESIS_HASH)?,
            &Hash256::from_hex(GENESIS_MERKLE_ROOT)?,
            &hasher,
        )?;

        Ok(Self {
            network: NetworkId::Testnet,
            message_start: TEST_MESSAGE_START,
            default_port: 25007,
            rpc_port: 25008,
            data_dir: "testnet",
            genesis,
            genesis_hash,
            base58_prefixes: Base58Prefixes {
                pubkey_address: vec![117],
                script_address: vec![164],
                secret_key: vec![219],
                ext_public_key: vec![0x04, 0x35, 0x87, 0xCF],
                ext_secret_key: vec![0x04, 0x35, 0x83, 0x94],
            },
            fixed_seeds: expand_fixed_seeds(TEST_FIXED_SEEDS, now, rng),
            consensus: ConsensusParams::testnet(&main.consensus),
            genesis_mining_shift: 0,
            ..main.clone()
        })
    }

    /// Compact form of the proof-of-work limit
    pub fn pow_limit_bits(&self) -> CompactTarget {
        CompactTarget::from_target(self.proof_of_work_limit)
    }

    /// Whether this is the test network
    pub fn is_testnet(&self) -> bool {
        self.network == NetworkId::Testnet
    }

    /// Printable overview of this set
    pub fn summary(&self) -> ParamsSummary {
        ParamsSummary {
            network: self.network,
            message_start: hex::encode(self.message_start),
            default_port: self.default_port,
            rpc_port: self.rpc_port,
            data_dir: self.data_dir.to_string(),
            proof_of_work_limit: format!("{:064x}", self.proof_of_work_limit),
            genesis_hash: self.genesis_hash,
            genesis_merkle_root: self.genesis.header.merkle_root,
            genesis_time: self.genesis.header.time,
            genesis_bits: self.genesis.header.bits,
            genesis_nonce: self.genesis.header.nonce,
            fixed_seed_count: self.fixed_seeds.len(),
            consensus: self.consensus.clone(),
        }
    }
}

fn decode_alert_pubkey() -> Result<Vec<u8>> {
    let key = hex::decode(ALERT_PUBKEY_HEX)
        .map_err(|e| mens_core::Error::Hex(format!("alert key: {}", e)))?;
    debug!("Loaded {}-byte alert key", key.len());
    Ok(key)
}

/// Serializable overview of a parameter set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsSummary {
    /// Network
    pub network: NetworkId,
    /// Message start (hex)
    pub message_start: String,
    /// Default P2P port
    pub default_port: u16,
    /// Default RPC port
    pub rpc_port: u16,
    /// Data directory suffix
    pub data_dir: String,
    /// Proof-of-work limit (hex)
    pub proof_of_work_limit: String,
    /// Genesis hash
    pub genesis_hash: Hash256,
    /// Genesis Merkle root
    pub genesis_merkle_root: Hash256,
    /// Genesis timestamp
    pub genesis_time: u32,
    /// Genesis compact target
    pub genesis_bits: CompactTarget,
    /// Genesis nonce
    pub genesis_nonce: u32,
    /// Number of expanded fixed seeds
    pub fixed_seed_count: usize,
    /// Consensus scalars
    pub consensus: ConsensusParams,
}
