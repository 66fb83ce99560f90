//! Mens consensus primitives
//!
//! This crate implements the digests, compact targets, script pushes,
//! transaction and block encodings, Merkle roots and proof-of-work header
//! hashing that the chain parameter layer builds its genesis blocks from.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod amount;
pub mod block;
pub mod encode;
pub mod error;
pub mod hash;
pub mod merkle;
pub mod pow;
pub mod script;
pub mod target;
pub mod transaction;

pub use amount::{Amount, CENT, COIN};
pub use block::{Block, BlockHeader, HEADER_SIZE};
pub use encode::Encodable;
pub use error::{Error, ErrorCategory, Result};
pub use hash::{double_sha256, Hash256};
pub use merkle::{build_merkle_root, transactions_merkle_root};
pub use pow::{DoubleSha256Pow, HeaderHasher, ScryptPow};
pub use script::Script;
pub use target::{hash_meets_target, CompactTarget};
pub use transaction::{OutPoint, Transaction, TxIn, TxOut};

pub use primitive_types::U256;
