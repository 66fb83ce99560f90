//! Address version bytes
//!
//! Each network prefixes encoded addresses and keys with version bytes that
//! identify both the kind of payload and the network it belongs to.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of Base58Check-encoded payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Base58Type {
    /// Pay-to-public-key-hash address
    PubkeyAddress,
    /// Pay-to-script-hash address
    ScriptAddress,
    /// WIF private key
    SecretKey,
    /// BIP32 extended public key
    ExtPublicKey,
    /// BIP32 extended private key
    ExtSecretKey,
}

impl Base58Type {
    /// Every kind, in prefix-table order
    pub const ALL: [Base58Type; 5] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
    ];

    /// Payload lengths (without version bytes) accepted for this kind
    pub const fn payload_lengths(self) -> &'static [usize] {
        match self {
            Base58Type::PubkeyAddress | Base58Type::ScriptAddress => &[20],
            // Trailing 0x01 marks a compressed public key.
            Base58Type::SecretKey => &[32, 33],
            Base58Type::ExtPublicKey | Base58Type::ExtSecretKey => &[74],
        }
    }
}

impl fmt::Display for Base58Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Base58Type::PubkeyAddress => "pubkey address",
            Base58Type::ScriptAddress => "script address",
            Base58Type::SecretKey => "secret key",
            Base58Type::ExtPublicKey => "extended public key",
            Base58Type::ExtSecretKey => "extended secret key",
        };
        f.write_str(name)
    }
}

/// Version byte table of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base58Prefixes {
    /// P2PKH address prefix
    pub pubkey_address: Vec<u8>,
    /// P2SH address prefix
    pub script_address: Vec<u8>,
    /// WIF private key prefix
    pub secret_key: Vec<u8>,
    /// Extended public key prefix
    pub ext_public_key: Vec<u8>,
    /// Extended private key prefix
    pub ext_secret_key: Vec<u8>,
}

impl Base58Prefixes {
    /// Version bytes for a payload kind
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
        }
    }

    /// Check that no two kinds share the same version bytes
    pub fn all_distinct(&self) -> bool {
        let kinds = Base58Type::ALL;
        kinds.iter().enumerate().all(|(i, a)| {
            kinds[i + 1..]
                .iter()
                .all(|b| self.get(*a) != self.get(*b))
        })
    }

    /// Check that every decoded string maps to at most one kind.
    ///
    /// Two kinds collide when one prefix starts the other and some pair of
    /// accepted payload lengths gives the same total length.
    pub fn is_unambiguous(&self) -> bool {
        let kinds = Base58Type::ALL;
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                let (pa, pb) = (self.get(*a), self.get(*b));
                if pa.is_empty() || pb.is_empty() {
                    return false;
                }
                if !(pa.starts_with(pb) || pb.starts_with(pa)) {
                    continue;
                }
                for la in a.payload_lengths() {
                    for lb in b.payload_lengths() {
                        if pa.len() + la == pb.len() + lb {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }

    /// Base58Check-encode a payload under this network's version bytes
    pub fn encode_check(&self, kind: Base58Type, payload: &[u8]) -> Result<String> {
        if !kind.payload_lengths().contains(&payload.len()) {
            return Err(Error::InvalidAddress(format!(
                "{} payload must be {:?} bytes, got {}",
                kind,
                kind.payload_lengths(),
                payload.len()
            )));
        }
        let mut data = self.get(kind).to_vec();
        data.extend_from_slice(payload);
        Ok(bs58::encode(data).with_check().into_string())
    }

    /// Decode a Base58Check string and classify it by version bytes
    pub fn decode_check(&self, encoded: &str) -> Result<(Base58Type, Vec<u8>)> {
        let data = bs58::decode(encoded)
            .with_check(None)
            .into_vec()
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", encoded, e)))?;

        Base58Type::ALL
            .iter()
            .find_map(|kind| {
                let prefix = self.get(*kind);
                let payload = data.strip_prefix(prefix)?;
                kind.payload_lengths()
                    .contains(&payload.len())
                    .then(|| (*kind, payload.to_vec()))
            })
            .ok_or_else(|| {
                Error::InvalidAddress(format!("{}: unknown version bytes for this network", encoded))
            })
    }
}
