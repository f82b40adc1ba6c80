//! Configuration

use serde::{Deserialize, Serialize};
use std::env;

/// Ledger client configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// JSON-RPC endpoint of the ledger node
    pub rpc_url: String,
    /// Distributor contract address
    pub distributor_address: String,
    /// Sender account; must be unlocked on the node (devnet accounts are)
    pub sender_address: String,
    /// Gas limit attached to submissions
    pub gas_limit: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            distributor_address: "0x0000000000000000000000000000000000000000".to_string(),
            sender_address: "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266".to_string(),
            gas_limit: 0x100000,
        }
    }
}

impl LedgerConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            rpc_url: env::var("DRIP_RPC_URL").unwrap_or(defaults.rpc_url),
            distributor_address: env::var("DRIP_DISTRIBUTOR_ADDRESS")
                .unwrap_or(defaults.distributor_address),
            sender_address: env::var("DRIP_SENDER_ADDRESS").unwrap_or(defaults.sender_address),
            gas_limit: env::var("DRIP_GAS_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.gas_limit),
        }
    }
}
