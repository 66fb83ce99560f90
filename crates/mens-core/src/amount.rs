//! Monetary amounts

/// Amount in base units (signed, as in the transaction encoding)
pub type Amount = i64;

/// Base units per coin
pub const COIN: Amount = 100_000_000;

/// Base units per cent
pub const CENT: Amount = 1_000_000;
