//! Bootstrap seed peers
//!
//! Fixed seed tables hold compact `(16-byte address, port)` entries. At
//! startup they are expanded into candidate peers whose last-seen time lies
//! between one and two weeks in the past, so gossiped addresses rank above
//! them.

use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use tracing::{debug, warn};

/// One week in seconds
pub const ONE_WEEK_SECS: i64 = 7 * 24 * 60 * 60;

/// Length of the address field of a seed entry
pub const SEED_ADDR_LEN: usize = 16;

/// Compact fixed seed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSpec<'a> {
    /// IPv6 (or IPv4-mapped) address bytes, network order
    pub addr: &'a [u8],
    /// TCP port
    pub port: u16,
}

/// Fixed seeds for mainnet, generated from the seeder's node list
pub static MAIN_FIXED_SEEDS: &[SeedSpec<'static>] = &[];

/// Fixed seeds for testnet
pub static TEST_FIXED_SEEDS: &[SeedSpec<'static>] = &[];

/// Candidate peer produced from a seed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPeerRecord {
    /// Peer address
    pub addr: Ipv6Addr,
    /// Peer port
    pub port: u16,
    /// Advertised last-seen time
    pub last_seen: DateTime<Utc>,
}

impl SeedPeerRecord {
    /// Socket address, unwrapping IPv4-mapped addresses
    pub fn socket_addr(&self) -> SocketAddr {
        let ip = match self.addr.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(self.addr),
        };
        SocketAddr::new(ip, self.port)
    }
}

/// Expand one seed entry.
///
/// `last_seen` is `now - uniform[0, one week) - one week`.
pub fn expand_seed<R: Rng + ?Sized>(
    spec: &SeedSpec<'_>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<SeedPeerRecord> {
    let octets: [u8; SEED_ADDR_LEN] = spec.addr.try_into().map_err(|_| {
        Error::SeedTableMalformed(format!(
            "address must be {} bytes, got {}",
            SEED_ADDR_LEN,
            spec.addr.len()
        ))
    })?;
    if spec.port == 0 {
        return Err(Error::SeedTableMalformed(format!(
            "port 0 for {}",
            Ipv6Addr::from(octets)
        )));
    }

    let age = rng.gen_range(0..ONE_WEEK_SECS) + ONE_WEEK_SECS;
    Ok(SeedPeerRecord {
        addr: Ipv6Addr::from(octets),
        port: spec.port,
        last_seen: now - Duration::seconds(age),
    })
}

/// Expand a fixed seed table, skipping malformed entries
pub fn expand_fixed_seeds<R: Rng + ?Sized>(
    table: &[SeedSpec<'_>],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<SeedPeerRecord> {
    let records: Vec<SeedPeerRecord> = table
        .iter()
        .enumerate()
        .filter_map(|(index, spec)| match expand_seed(spec, now, rng) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping fixed seed #{}: {}", index, e);
                None
            }
        })
        .collect();

    debug!("Expanded {} of {} fixed seeds", records.len(), table.len());
    records
}

/// Compact 16-byte form of a socket address (IPv4 becomes IPv4-mapped)
pub fn seed_spec_from_socket_addr(addr: &SocketAddr) -> ([u8; SEED_ADDR_LEN], u16) {
    let v6 = match addr.ip() {
        IpAddr::V4(v4) => v4.to_ipv6_mapped(),
        IpAddr::V6(v6) => v6,
    };
    (v6.octets(), addr.port())
}

/// Parse a textual `ip:port` seed (`[v6]:port` for IPv6)
pub fn parse_seed_addr(s: &str) -> Result<([u8; SEED_ADDR_LEN], u16)> {
    let addr: SocketAddr = s
        .trim()
        .parse()
        .map_err(|e| Error::SeedTableMalformed(format!("{}: {}", s, e)))?;
    Ok(seed_spec_from_socket_addr(&addr))
}
