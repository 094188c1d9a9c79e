//! Price and network-fee oracle boundary.
//!
//! Both queries are best-effort: consumers degrade display precision when
//! the oracle is down and only treat a failure as fatal at the pre-payment
//! fee check.

use crate::error::{CoreError, Result};
use crate::types::Amount;
use async_trait::async_trait;
use serde::Deserialize;

#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Current native → `currency` exchange rate.
    async fn rate(&self, currency: &str) -> Result<f64>;

    /// Current fee estimate, in smallest units per gas-equivalent unit.
    async fn fee_per_unit(&self) -> Result<Amount>;
}

#[derive(Debug, Deserialize)]
struct RateResponse {
    rate: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeeResponse {
    fee_per_unit: Amount,
}

/// Oracle client over the exchange/fee HTTP endpoints.
pub struct HttpOracle {
    http: reqwest::Client,
    base_url: String,
    chain_id: u64,
}

impl HttpOracle {
    pub fn new(base_url: impl Into<String>, chain_id: u64) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            chain_id,
        }
    }
}

#[async_trait]
impl PriceOracle for HttpOracle {
    async fn rate(&self, currency: &str) -> Result<f64> {
        let response: RateResponse = self
            .http
            .get(format!("{}/rate", self.base_url))
            .query(&[("symbol", currency)])
            .send()
            .await
            .map_err(|e| CoreError::oracle(format!("rate lookup failed: {}", e)))?
            .error_for_status()
            .map_err(|e| CoreError::oracle(format!("rate lookup failed: {}", e)))?
            .json()
            .await
            .map_err(|e| CoreError::oracle(format!("malformed rate response: {}", e)))?;
        Ok(response.rate)
    }

    async fn fee_per_unit(&self) -> Result<Amount> {
        let response: FeeResponse = self
            .http
            .get(format!("{}/fee", self.base_url))
            .query(&[("chain", self.chain_id.to_string())])
            .send()
            .await
            .map_err(|e| CoreError::oracle(format!("fee estimate failed: {}", e)))?
            .error_for_status()
            .map_err(|e| CoreError::oracle(format!("fee estimate failed: {}", e)))?
            .json()
            .await
            .map_err(|e| CoreError::oracle(format!("malformed fee response: {}", e)))?;
        Ok(response.fee_per_unit)
    }
}
