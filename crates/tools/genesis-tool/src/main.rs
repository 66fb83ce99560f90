//! Chain parameter inspection and genesis mining tool
//!
//! Subcommands:
//! - Show the parameter set a node would select at startup
//! - Verify every known genesis block
//! - Mine a genesis nonce for a new or modified network

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use mens_core::{DoubleSha256Pow, HeaderHasher, ScryptPow};
use mens_params::chainparams::GENESIS_MESSAGE;
use mens_params::genesis::build_coinbase;
use mens_params::{GenesisMiner, NetworkId, ParamsConfig, ParamsRegistry};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "mens-genesis")]
#[command(about = "Mens chain parameter and genesis tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parameter set selected at startup
    Show {
        /// Use the test network
        #[arg(short, long)]
        testnet: bool,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Rebuild and verify every known genesis block
    Verify,

    /// Search for a genesis nonce
    Mine {
        /// Network whose genesis inputs to start from
        #[arg(short, long, default_value = "main")]
        network: NetworkId,

        /// Starting nonce (defaults to the network's documented nonce)
        #[arg(long)]
        nonce: Option<u32>,

        /// Genesis timestamp; changes the coinbase and Merkle root
        #[arg(long)]
        time: Option<u32>,

        /// Right shift applied to the target (defaults to the network's value)
        #[arg(short = 's', long)]
        target_shift: Option<u32>,

        /// Header hash function
        #[arg(long, value_enum, default_value_t = HasherKind::Scrypt)]
        hasher: HasherKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HasherKind {
    /// Scrypt proof-of-work
    Scrypt,
    /// Double SHA-256
    Sha256d,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { testnet, config } => run_show(testnet, config)?,
        Commands::Verify => run_verify()?,
        Commands::Mine {
            network,
            nonce,
            time,
            target_shift,
            hasher,
        } => run_mine(network, nonce, time, target_shift, hasher)?,
    }

    Ok(())
}

fn run_show(testnet: bool, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = match &config_path {
        Some(path) => ParamsConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ParamsConfig::default(),
    };
    config = config.with_env_overrides()?;
    if testnet {
        config.testnet = true;
    }

    let registry = ParamsRegistry::new().context("Chain parameters failed verification")?;
    config.apply(&registry)?;
    registry.freeze();

    let extra = config.extra_seed_records(chrono::Utc::now(), &mut rand::thread_rng());
    if extra.len() != config.extra_seeds.len() {
        warn!(
            "{} of {} configured seeds were unusable",
            config.extra_seeds.len() - extra.len(),
            config.extra_seeds.len()
        );
    }

    println!("{}", serde_json::to_string_pretty(&registry.active().summary())?);
    Ok(())
}

fn run_verify() -> anyhow::Result<()> {
    let registry = ParamsRegistry::new().context("Chain parameters failed verification")?;
    for network in NetworkId::ALL {
        match registry.get(network) {
            Some(params) => println!("{:<8} {} ok", network, params.genesis_hash),
            None => println!("{:<8} no parameter set", network),
        }
    }
    Ok(())
}

fn run_mine(
    network: NetworkId,
    nonce: Option<u32>,
    time: Option<u32>,
    target_shift: Option<u32>,
    hasher_kind: HasherKind,
) -> anyhow::Result<()> {
    let registry = ParamsRegistry::new().context("Chain parameters failed verification")?;
    let Some(params) = registry.get(network) else {
        bail!("No parameter set for {}", network);
    };

    let mut block = params.genesis.clone();
    if let Some(time) = time {
        block.transactions = vec![build_coinbase(time, GENESIS_MESSAGE)];
        block.header.time = time;
        block.header.merkle_root = block.compute_merkle_root();
    }
    if let Some(nonce) = nonce {
        block.header.nonce = nonce;
    }
    let shift = target_shift.unwrap_or(params.genesis_mining_shift);

    let scrypt;
    let hasher: &dyn HeaderHasher = match hasher_kind {
        HasherKind::Scrypt => {
            scrypt = ScryptPow::new()?;
            &scrypt
        }
        HasherKind::Sha256d => &DoubleSha256Pow,
    };

    let miner = GenesisMiner::new(hasher).with_target_shift(shift);
    info!(
        "Mining {} genesis, merkle root {}, target {:064x}",
        network,
        block.header.merkle_root,
        miner.target(block.header.bits)?
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(200));

    let mined = miner.mine(block.header, |header, attempts| {
        pb.set_message(format!(
            "{} attempts, nonce {} time {}",
            attempts, header.nonce, header.time
        ));
    })?;
    pb.finish_with_message(format!("Found after {} attempts", mined.attempts));

    let report = serde_json::json!({
        "network": network,
        "hasher": hasher.name(),
        "target_shift": shift,
        "time": mined.header.time,
        "nonce": mined.header.nonce,
        "bits": mined.header.bits,
        "hash": mined.hash,
        "merkle_root": mined.header.merkle_root,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
