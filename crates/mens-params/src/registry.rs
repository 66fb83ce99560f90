//! Parameter registry and active network selection
//!
//! All statically known parameter sets are built and verified up front.
//! Startup code selects the active network, then calls [`freeze`]; later
//! readers only ever see the frozen choice.

use crate::chainparams::ChainParams;
use crate::network::NetworkId;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info};

/// Every known parameter set plus the active selection
#[derive(Debug)]
pub struct ParamsRegistry {
    sets: Vec<ChainParams>,
    active: AtomicUsize,
    frozen: AtomicBool,
}

impl ParamsRegistry {
    /// Build mainnet and testnet, verifying both genesis blocks
    pub fn new() -> Result<Self> {
        Self::new_with(Utc::now(), &mut rand::thread_rng())
    }

    /// Build the known sets with an explicit clock and RNG
    pub fn new_with<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> Result<Self> {
        let main = ChainParams::main_with(now, rng)?;
        let test = ChainParams::testnet_from(&main, now, rng)?;
        Self::with_sets(vec![main, test])
    }

    /// Wrap prebuilt sets; the first one starts active.
    ///
    /// Rejects duplicate networks, shared message starts and ambiguous
    /// address version bytes.
    pub fn with_sets(sets: Vec<ChainParams>) -> Result<Self> {
        if sets.is_empty() {
            return Err(Error::Config("registry needs at least one parameter set".to_string()));
        }

        for (i, a) in sets.iter().enumerate() {
            if !a.base58_prefixes.all_distinct() || !a.base58_prefixes.is_unambiguous() {
                return Err(Error::AmbiguousPrefixes(a.network));
            }
            for b in &sets[i + 1..] {
                if a.network == b.network {
                    return Err(Error::Config(format!(
                        "duplicate parameter set for {}",
                        a.network
                    )));
                }
                if a.message_start == b.message_start {
                    return Err(Error::DuplicateMessageStart(a.network, b.network));
                }
            }
        }

        debug!(
            "Registry holds {:?}, {} active",
            sets.iter().map(|p| p.network).collect::<Vec<_>>(),
            sets[0].network
        );
        Ok(Self {
            sets,
            active: AtomicUsize::new(0),
            frozen: AtomicBool::new(false),
        })
    }

    /// Currently active parameter set
    pub fn active(&self) -> &ChainParams {
        &self.sets[self.active.load(Ordering::Acquire)]
    }

    /// Make a network active.
    ///
    /// On error the active set is unchanged.
    pub fn select(&self, network: NetworkId) -> Result<()> {
        if self.is_frozen() {
            return Err(Error::RegistryFrozen(self.active().network));
        }
        let index = self
            .sets
            .iter()
            .position(|p| p.network == network)
            .ok_or_else(|| Error::UnknownNetwork(network.to_string()))?;

        self.active.store(index, Ordering::Release);
        info!("Selected {} network", network);
        Ok(())
    }

    /// Select from the "use test network" startup flag
    pub fn select_from_flag(&self, is_testnet: bool) -> Result<()> {
        self.select(NetworkId::from_testnet_flag(is_testnet))
    }

    /// Parameter set of a network, if defined
    pub fn get(&self, network: NetworkId) -> Option<&ChainParams> {
        self.sets.iter().find(|p| p.network == network)
    }

    /// Networks that have a parameter set
    pub fn networks(&self) -> Vec<NetworkId> {
        self.sets.iter().map(|p| p.network).collect()
    }

    /// End the startup window; further selections fail
    pub fn freeze(&self) {
        if !self.frozen.swap(true, Ordering::AcqRel) {
            info!("Network selection frozen on {}", self.active().network);
        }
    }

    /// Whether selection has been frozen
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }
}

static REGISTRY: OnceCell<ParamsRegistry> = OnceCell::new();

/// Build the process-wide registry if needed
pub fn init() -> Result<&'static ParamsRegistry> {
    REGISTRY.get_or_try_init(ParamsRegistry::new)
}

/// Process-wide registry.
///
/// # Panics
///
/// Panics if a genesis block fails verification. A node must not run on
/// parameters it cannot reproduce.
pub fn registry() -> &'static ParamsRegistry {
    match init() {
        Ok(registry) => registry,
        Err(e) => panic!("Chain parameters failed verification: {}", e),
    }
}

/// Active parameter set of the process-wide registry.
///
/// # Panics
///
/// See [`registry`].
pub fn params() -> &'static ChainParams {
    registry().active()
}

/// Select the process-wide active network
pub fn select_params(network: NetworkId) -> Result<()> {
    init()?.select(network)
}

/// Select the process-wide active network from the testnet flag
pub fn select_params_from_flag(is_testnet: bool) -> Result<()> {
    init()?.select_from_flag(is_testnet)
}

/// Freeze the process-wide selection
pub fn freeze() -> Result<()> {
    init()?.freeze();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build() -> ParamsRegistry {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        ParamsRegistry::new_with(now, &mut StdRng::seed_from_u64(5)).unwrap()
    }

    #[test]
    fn test_main_active_initially() {
        let registry = build();
        assert_eq!(registry.active().network, NetworkId::Main);
        assert_eq!(registry.networks(), vec![NetworkId::Main, NetworkId::Testnet]);
        assert!(!registry.is_frozen());
    }

    #[test]
    fn test_select_switches_active() {
        let registry = build();
        registry.select(NetworkId::Testnet).unwrap();
        assert_eq!(registry.active().default_port, 25007);
        registry.select_from_flag(false).unwrap();
        assert_eq!(registry.active().network, NetworkId::Main);
    }

    #[test]
    fn test_unknown_network_leaves_active() {
        let registry = build();
        registry.select(NetworkId::Testnet).unwrap();
        let err = registry.select(NetworkId::Regtest).unwrap_err();
        assert!(matches!(err, Error::UnknownNetwork(ref name) if name == "regtest"));
        assert_eq!(err.to_string(), "Unimplemented network: regtest");
        assert_eq!(registry.active().network, NetworkId::Testnet);
    }

    #[test]
    fn test_freeze_blocks_selection() {
        let registry = build();
        registry.select_from_flag(true).unwrap();
        registry.freeze();
        registry.freeze();
        assert!(registry.is_frozen());
        let err = registry.select(NetworkId::Main).unwrap_err();
        assert!(matches!(err, Error::RegistryFrozen(NetworkId::Testnet)));
        assert_eq!(registry.active().network, NetworkId::Testnet);
    }

    #[test]
    fn test_get_by_network() {
        let registry = build();
        assert_eq!(
            registry.get(NetworkId::Testnet).map(|p| p.rpc_port),
            Some(25008)
        );
        assert!(registry.get(NetworkId::Regtest).is_none());
    }

    #[test]
    fn test_rejects_shared_message_start() {
        let registry = build();
        let main = registry.get(NetworkId::Main).unwrap().clone();
        let mut test = registry.get(NetworkId::Testnet).unwrap().clone();
        test.message_start = main.message_start;
        let err = ParamsRegistry::with_sets(vec![main, test]).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateMessageStart(NetworkId::Main, NetworkId::Testnet)
        ));
    }

    #[test]
    fn test_rejects_ambiguous_prefixes() {
        let registry = build();
        let mut main = registry.get(NetworkId::Main).unwrap().clone();
        main.base58_prefixes.secret_key = main.base58_prefixes.pubkey_address.clone();
        let err = ParamsRegistry::with_sets(vec![main]).unwrap_err();
        assert!(matches!(err, Error::AmbiguousPrefixes(NetworkId::Main)));
    }

    #[test]
    fn test_rejects_empty_and_duplicate_sets() {
        assert!(matches!(
            ParamsRegistry::with_sets(Vec::new()),
            Err(Error::Config(_))
        ));
        let registry = build();
        let main = registry.get(NetworkId::Main).unwrap().clone();
        let mut twin = main.clone();
        twin.message_start = [0, 0, 0, 0];
        assert!(matches!(
            ParamsRegistry::with_sets(vec![main, twin]),
            Err(Error::Config(_))
        ));
    }
}
