//! Consensus timing and economic constants
//!
//! These are stored and exposed here only; the validation and staking
//! layers enforce them.

use mens_core::{Amount, COIN};
use serde::{Deserialize, Serialize};

/// Consensus parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    /// Target block spacing in seconds
    pub target_spacing: u32,
    /// Last height at which proof-of-work blocks are accepted
    pub last_pow_block: u32,
    /// Proof-of-work reward during the insta-mine window
    pub insta_mine_pow_reward: Amount,
    /// Last height of the insta-mine window
    pub insta_mine_last_block: u32,
    /// Proof-of-work reward after the insta-mine window
    pub regular_pow_reward: Amount,
    /// First height at which proof-of-stake blocks are accepted
    pub first_pos_block: u32,
    /// Confirmations before a coinbase output can be spent
    pub coinbase_maturity: u32,
    /// Chain launch time (Unix seconds)
    pub launch_time: u32,
    /// Minimum coin age before it can stake, in seconds
    pub stake_min_age: u32,
    /// Stake modifier interval in seconds
    pub modifier_interval: u32,
    /// Proof-of-stake reward (percent)
    pub pos_coin_reward: u32,
    /// Recommended size of a staking output
    pub advisable_pos_txout: Amount,
    /// Fixed masternode reward per block
    pub masternode_fix_reward: Amount,
    /// Masternode share of the block reward (percent)
    pub masternode_proportional_reward: u32,
    /// Collateral required to run a masternode
    pub masternode_value: Amount,
}

impl ConsensusParams {
    /// Create consensus params for mainnet
    pub fn mainnet(launch_time: u32) -> Self {
        let last_pow_block = 10_080;
        Self {
            target_spacing: 30,
            last_pow_block,
            insta_mine_pow_reward: 0,
            insta_mine_last_block: 1_440,
            regular_pow_reward: 10_000 * COIN,
            first_pos_block: last_pow_block - 380,
            coinbase_maturity: 200,
            launch_time,
            stake_min_age: 2 * 60 * 60,
            modifier_interval: 60,
            pos_coin_reward: 15,
            advisable_pos_txout: 10_000 * COIN,
            masternode_fix_reward: 50 * COIN,
            masternode_proportional_reward: 20,
            masternode_value: 50_000 * COIN,
        }
    }

    /// Create consensus params for testnet from the mainnet values
    pub fn testnet(main: &ConsensusParams) -> Self {
        Self {
            target_spacing: 10,
            last_pow_block: 0x7fff_ffff,
            first_pos_block: 7_000,
            launch_time: 1_433_538_000,
            stake_min_age: 60 * 60,
            ..main.clone()
        }
    }

    /// Check if proof-of-work blocks are still accepted at a height
    pub fn is_pow_height(&self, height: u32) -> bool {
        height <= self.last_pow_block
    }

    /// Check if proof-of-stake blocks are accepted at a height
    pub fn is_pos_height(&self, height: u32) -> bool {
        height >= self.first_pos_block
    }
}
