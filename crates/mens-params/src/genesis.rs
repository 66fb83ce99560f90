//! Genesis block construction, verification and mining
//!
//! A network's genesis block is rebuilt from literal inputs on every start
//! and its digests are compared against the hard-coded ones. Mining a new
//! genesis is a separate, explicitly invoked operation ([`GenesisMiner`]).

use crate::network::NetworkId;
use crate::{Error, Result};
use mens_core::{
    build_merkle_root, hash_meets_target, Block, BlockHeader, CompactTarget, Hash256,
    HeaderHasher, OutPoint, Script, Transaction, TxIn, TxOut, U256,
};
use tracing::{debug, info, warn};

/// Script number pushed after the leading zero in the coinbase script
const COINBASE_SCRIPT_TAG: i64 = 42;

/// Literal inputs of a genesis block and its expected digests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisSpec {
    /// Block and coinbase timestamp (Unix seconds)
    pub time: u32,
    /// Payload embedded in the coinbase unlocking script
    pub message: Vec<u8>,
    /// Block version
    pub version: i32,
    /// Compact difficulty target
    pub bits: CompactTarget,
    /// Proof-of-work nonce
    pub nonce: u32,
    /// Hard-coded block hash
    pub expected_hash: Hash256,
    /// Hard-coded Merkle root
    pub expected_merkle_root: Hash256,
}

impl GenesisSpec {
    /// Assemble the genesis block from the literal inputs
    pub fn build(&self) -> Block {
        let coinbase = build_coinbase(self.time, &self.message);
        let merkle_root = build_merkle_root(&[coinbase.txid()]);
        Block {
            header: BlockHeader {
                version: self.version,
                prev_block: Hash256::ZERO,
                merkle_root,
                time: self.time,
                bits: self.bits,
                nonce: self.nonce,
            },
            transactions: vec![coinbase],
            signature: Vec::new(),
        }
    }

    /// Assemble the block and check it against the expected digests
    pub fn build_verified(
        &self,
        network: NetworkId,
        hasher: &dyn HeaderHasher,
    ) -> Result<(Block, Hash256)> {
        let block = self.build();
        let hash = verify_genesis(
            network,
            &block,
            &self.expected_hash,
            &self.expected_merkle_root,
            hasher,
        )?;
        Ok((block, hash))
    }
}

/// Build the genesis coinbase transaction.
///
/// The single input spends the null outpoint and carries the message as its
/// unlocking script. The single output is empty so the genesis reward can
/// never be spent.
pub fn build_coinbase(time: u32, message: &[u8]) -> Transaction {
    let script_sig = Script::new()
        .push_int(0)
        .push_num(COINBASE_SCRIPT_TAG)
        .push_slice(message);

    Transaction {
        version: 1,
        time,
        inputs: vec![TxIn {
            prevout: OutPoint::null(),
            script_sig,
            sequence: u32::MAX,
        }],
        outputs: vec![TxOut::empty()],
        lock_time: 0,
    }
}

/// Recompute a genesis block's digests and compare them with the expected
/// values, returning the block hash.
pub fn verify_genesis(
    network: NetworkId,
    block: &Block,
    expected_hash: &Hash256,
    expected_merkle_root: &Hash256,
    hasher: &dyn HeaderHasher,
) -> Result<Hash256> {
    let merkle_root = block.compute_merkle_root();
    if merkle_root != block.header.merkle_root || merkle_root != *expected_merkle_root {
        return Err(Error::GenesisMismatch {
            network,
            what: "merkle root",
            expected: *expected_merkle_root,
            computed: merkle_root,
        });
    }

    let hash = hasher.hash_header(&block.header)?;
    debug!(
        "Computed {} genesis hash {} with {}",
        network,
        hash,
        hasher.name()
    );
    if hash != *expected_hash {
        return Err(Error::GenesisMismatch {
            network,
            what: "hash",
            expected: *expected_hash,
            computed: hash,
        });
    }

    info!("Verified {} genesis block {}", network, hash);
    Ok(hash)
}

/// Result of a genesis nonce search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinedGenesis {
    /// Header with the winning nonce (and possibly a bumped timestamp)
    pub header: BlockHeader,
    /// Its proof-of-work hash
    pub hash: Hash256,
    /// Number of headers hashed
    pub attempts: u64,
}

/// Nonce search for a brand-new network's genesis block.
///
/// This runs until a header meets the target; there is no attempt bound.
/// It is never called during node startup.
pub struct GenesisMiner<'a> {
    hasher: &'a dyn HeaderHasher,
    target_shift: u32,
    progress_interval: u64,
}

impl<'a> GenesisMiner<'a> {
    /// Default number of attempts between progress reports
    pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

    /// Create a miner using the given header hasher
    pub fn new(hasher: &'a dyn HeaderHasher) -> Self {
        Self {
            hasher,
            target_shift: 0,
            progress_interval: Self::DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Make the target harder by shifting it right
    pub fn with_target_shift(mut self, shift: u32) -> Self {
        self.target_shift = shift;
        self
    }

    /// Attempts between progress callbacks (0 disables them)
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Target a header must meet for the given compact bits
    pub fn target(&self, bits: CompactTarget) -> Result<U256> {
        Ok(bits.to_target()? >> self.target_shift as usize)
    }

    /// Search nonces starting from the header's own nonce.
    ///
    /// When the nonce wraps around, the timestamp is incremented and the
    /// search continues.
    pub fn mine<F>(&self, mut header: BlockHeader, mut on_progress: F) -> Result<MinedGenesis>
    where
        F: FnMut(&BlockHeader, u64),
    {
        let target = self.target(header.bits)?;
        info!(
            "Mining genesis from nonce {} time {} against target {:064x} with {}",
            header.nonce,
            header.time,
            target,
            self.hasher.name()
        );

        let mut attempts: u64 = 0;
        loop {
            let hash = self.hasher.hash_header(&header)?;
            attempts += 1;
            if hash_meets_target(&hash, &target) {
                info!(
                    "Found genesis {} at nonce {} time {} after {} attempts",
                    hash, header.nonce, header.time, attempts
                );
                return Ok(MinedGenesis {
                    header,
                    hash,
                    attempts,
                });
            }

            header.nonce = header.nonce.wrapping_add(1);
            if header.nonce == 0 {
                warn!("Nonce wrapped, incrementing time to {}", header.time + 1);
                header.time += 1;
            }

            if self.progress_interval != 0 && attempts % self.progress_interval == 0 {
                on_progress(&header, attempts);
            }
        }
    }

    /// Mine a block in place, updating its header
    pub fn mine_block(&self, block: &mut Block) -> Result<MinedGenesis> {
        let mined = self.mine(block.header, |_, _| {})?;
        block.header = mined.header;
        Ok(mined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mens_core::{DoubleSha256Pow, ScryptPow};

    /// Hashes to zero only for one (time, nonce) pair, to the maximum otherwise
    struct OneWinner {
        time: u32,
        nonce: u32,
    }

    impl HeaderHasher for OneWinner {
        fn hash_header(&self, header: &BlockHeader) -> mens_core::Result<Hash256> {
            if header.time == self.time && header.nonce == self.nonce {
                Ok(Hash256::ZERO)
            } else {
                Ok(Hash256::from_bytes([0xff; 32]))
            }
        }

        fn name(&self) -> &'static str {
            "one-winner"
        }
    }

    fn main_spec() -> GenesisSpec {
        GenesisSpec {
            time: 1433624400,
            message: b"Mens sana in corpore sano".to_vec(),
            version: 1,
            bits: CompactTarget::from_consensus(0x1f00_ffff),
            nonce: 1527384,
            expected_hash: Hash256::from_hex(
                "0000000102617cecd8aeba57d393e295389b83ff81f223898240282757ad7cdf",
            )
            .unwrap(),
            expected_merkle_root: Hash256::from_hex(
                "f43005788130cec245b86cc0a05c01769832ddbaf7fce43b526870d547e14594",
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_coinbase_shape() {
        let tx = build_coinbase(1433624400, b"Mens sana in corpore sano");
        assert!(tx.is_coinbase());
        assert_eq!(tx.outputs.len(), 1);
        assert!(tx.outputs[0].is_empty());
        assert_eq!(tx.inputs[0].sequence, u32::MAX);
        assert_eq!(tx.time, 1433624400);
    }

    #[test]
    fn test_build_genesis_structure() {
        let block = main_spec().build();
        assert_eq!(block.header.prev_block, Hash256::ZERO);
        assert_eq!(block.header.version, 1);
        assert_eq!(block.transactions.len(), 1);
        assert!(block.signature.is_empty());
        assert_eq!(block.header.merkle_root, main_spec().expected_merkle_root);
    }

    #[test]
    fn test_build_verified_main() {
        let hasher = ScryptPow::new().unwrap();
        let (_, hash) = main_spec().build_verified(NetworkId::Main, &hasher).unwrap();
        assert_eq!(hash, main_spec().expected_hash);
    }

    #[test]
    fn test_hash_mismatch_is_reported() {
        let mut spec = main_spec();
        spec.nonce += 1;
        let hasher = ScryptPow::new().unwrap();
        let err = spec.build_verified(NetworkId::Main, &hasher).unwrap_err();
        match err {
            Error::GenesisMismatch {
                network,
                what,
                expected,
                computed,
            } => {
                assert_eq!(network, NetworkId::Main);
                assert_eq!(what, "hash");
                assert_eq!(expected, main_spec().expected_hash);
                assert_ne!(computed, expected);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_merkle_mismatch_is_reported_first() {
        let mut spec = main_spec();
        spec.message = b"Mens sana in corpore sana".to_vec();
        let err = spec
            .build_verified(NetworkId::Testnet, &DoubleSha256Pow)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::GenesisMismatch { what: "merkle root", network: NetworkId::Testnet, .. }
        ));
    }

    #[test]
    fn test_tampered_header_merkle_root_is_rejected() {
        let spec = main_spec();
        let mut block = spec.build();
        block.header.merkle_root = Hash256::ZERO;
        let err = verify_genesis(
            NetworkId::Main,
            &block,
            &spec.expected_hash,
            &spec.expected_merkle_root,
            &DoubleSha256Pow,
        )
        .unwrap_err();
        assert!(matches!(err, Error::GenesisMismatch { what: "merkle root", .. }));
    }

    #[test]
    fn test_miner_accepts_starting_nonce() {
        let hasher = OneWinner {
            time: 100,
            nonce: 7,
        };
        let header = BlockHeader {
            version: 1,
            prev_block: Hash256::ZERO,
            merkle_root: Hash256::ZERO,
            time: 100,
            bits: CompactTarget::from_consensus(0x1f00_ffff),
            nonce: 7,
        };
        let mined = GenesisMiner::new(&hasher).mine(header, |_, _| {}).unwrap();
        assert_eq!(mined.attempts, 1);
        assert_eq!(mined.header.nonce, 7);
    }

    #[test]
    fn test_miner_wraps_nonce_and_bumps_time() {
        let hasher = OneWinner {
            time: 101,
            nonce: 1,
        };
        let header = BlockHeader {
            version: 1,
            prev_block: Hash256::ZERO,
            merkle_root: Hash256::ZERO,
            time: 100,
            bits: CompactTarget::from_consensus(0x1f00_ffff),
            nonce: u32::MAX - 1,
        };
        let mined = GenesisMiner::new(&hasher).mine(header, |_, _| {}).unwrap();
        // MAX-1, MAX, 0 (time bumped), 1
        assert_eq!(mined.attempts, 4);
        assert_eq!(mined.header.time, 101);
        assert_eq!(mined.header.nonce, 1);
        assert_eq!(mined.hash, Hash256::ZERO);
    }

    #[test]
    fn test_miner_reports_progress() {
        let hasher = OneWinner {
            time: 0,
            nonce: 25,
        };
        let header = BlockHeader {
            version: 1,
            prev_block: Hash256::ZERO,
            merkle_root: Hash256::ZERO,
            time: 0,
            bits: CompactTarget::from_consensus(0x1f00_ffff),
            nonce: 0,
        };
        let mut reports = Vec::new();
        GenesisMiner::new(&hasher)
            .with_progress_interval(10)
            .mine(header, |h, attempts| reports.push((h.nonce, attempts)))
            .unwrap();
        assert_eq!(reports, vec![(10, 10), (20, 20)]);
    }

    #[test]
    fn test_miner_target_shift() {
        let miner = GenesisMiner::new(&DoubleSha256Pow).with_target_shift(10);
        let bits = CompactTarget::from_consensus(0x1f00_ffff);
        let full = bits.to_target().unwrap();
        assert_eq!(miner.target(bits).unwrap(), full >> 10);
    }

    #[test]
    fn test_mine_block_with_sha256d() {
        // An easy target keeps the search short while still exercising real hashing.
        let mut block = main_spec().build();
        block.header.bits = CompactTarget::from_consensus(0x2000_ffff);
        let miner = GenesisMiner::new(&DoubleSha256Pow).with_target_shift(4);
        let mined = miner.mine_block(&mut block).unwrap();
        assert_eq!(block.header, mined.header);
        let target = miner.target(block.header.bits).unwrap();
        assert!(mined.hash.to_u256() <= target);
        assert_eq!(DoubleSha256Pow.hash_header(&block.header).unwrap(), mined.hash);
    }
}
