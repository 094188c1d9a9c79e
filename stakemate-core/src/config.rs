use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Static parameters of the join flow: the payment contract, commission
/// terms, fee ceiling and the service endpoints the clients talk to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinConfig {
    pub chain_id: u64,
    /// Fixed payment contract address (0x-prefixed, 20 bytes).
    pub contract_address: String,
    /// Contract entry point invoked to join a session.
    pub entry_point: String,
    /// Commission taken on top of the wager, in percent.
    pub commission_percent: u64,
    /// Upper gas-equivalent ceiling for the join call.
    pub max_fee_units: u64,
    /// Display currencies quoted beside the native wager.
    pub display_currencies: Vec<String>,
    pub signaling_url: String,
    pub oracle_url: String,
    pub wallet_url: String,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            chain_id: 80002, // Amoy testnet
            contract_address: "0x61c36a8d610b139f23cb1f7ef30ef89e96ef8515".to_string(),
            entry_point: "joinGame".to_string(),
            commission_percent: 5,
            max_fee_units: 150_000,
            display_currencies: vec!["USD".to_string(), "GBP".to_string()],
            signaling_url: "http://localhost:8000".to_string(),
            oracle_url: "http://localhost:8000/exchange".to_string(),
            wallet_url: "http://localhost:8545".to_string(),
        }
    }
}

impl JoinConfig {
    pub fn validate(&self) -> Result<()> {
        let addr = self
            .contract_address
            .strip_prefix("0x")
            .ok_or_else(|| CoreError::config("Contract address must be 0x-prefixed"))?;
        let bytes = hex::decode(addr)
            .map_err(|e| CoreError::config(format!("Contract address is not hex: {}", e)))?;
        if bytes.len() != 20 {
            return Err(CoreError::config("Contract address must be 20 bytes"));
        }

        if self.entry_point.is_empty() {
            return Err(CoreError::config("Entry point cannot be empty"));
        }

        if self.commission_percent > 100 {
            return Err(CoreError::config("Commission percent cannot exceed 100"));
        }

        if self.max_fee_units == 0 {
            return Err(CoreError::config("Fee ceiling must be greater than 0"));
        }

        for url in [&self.signaling_url, &self.oracle_url, &self.wallet_url] {
            if url.is_empty() {
                return Err(CoreError::config("Service URLs cannot be empty"));
            }
        }

        Ok(())
    }
}
