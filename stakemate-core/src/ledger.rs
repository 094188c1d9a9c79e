//! Ledger wallet boundary.
//!
//! The wallet provider owns key material, ABI encoding and signing; this
//! side only describes the call (entry point, args, value, fee ceiling) and
//! takes back a receipt or a provider error. A failed write is never retried
//! here: resubmission is always a fresh user action.

use crate::error::{CoreError, Result};
use crate::types::{Amount, WriteReceipt};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A value-bearing contract call, described the way the wallet provider
/// accepts it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCall {
    pub chain_id: u64,
    pub contract_address: String,
    pub entry_point: String,
    pub args: Vec<String>,
    /// Value transferred with the call, in smallest units.
    pub value: Amount,
    /// Upper gas-equivalent ceiling the call may consume.
    pub max_fee_units: u64,
}

#[async_trait]
pub trait LedgerWallet: Send + Sync {
    /// Whether a wallet is connected and able to sign.
    async fn is_connected(&self) -> bool;

    /// Address of the connected wallet.
    async fn address(&self) -> Result<String>;

    /// Spendable balance of the connected wallet, in smallest units.
    async fn balance(&self) -> Result<Amount>;

    /// Submit a value-bearing call. Blocks until the provider returns a
    /// receipt or rejects (user decline, provider error, on-chain revert).
    async fn submit_call(&self, call: ContractCall) -> Result<WriteReceipt>;
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a, P: Serialize> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcError>,
}

/// JSON-RPC client for a wallet provider daemon.
pub struct RpcWallet {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcWallet {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    async fn call<P: Serialize + Send, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response: RpcResponse<R> = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(CoreError::ledger(error.message));
        }
        response
            .result
            .ok_or_else(|| CoreError::ledger("provider returned neither result nor error"))
    }
}

#[async_trait]
impl LedgerWallet for RpcWallet {
    async fn is_connected(&self) -> bool {
        self.call::<_, String>("wallet_getAddress", ()).await.is_ok()
    }

    async fn address(&self) -> Result<String> {
        self.call("wallet_getAddress", ()).await
    }

    async fn balance(&self) -> Result<Amount> {
        self.call("wallet_getBalance", ()).await
    }

    async fn submit_call(&self, call: ContractCall) -> Result<WriteReceipt> {
        self.call("wallet_submitCall", [call]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_call_wire_format() {
        let call = ContractCall {
            chain_id: 80002,
            contract_address: "0xabc".to_string(),
            entry_point: "joinGame".to_string(),
            args: vec!["ABCD".to_string()],
            value: Amount::from_units(2_100_000_000_000_000_000),
            max_fee_units: 150_000,
        };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["entryPoint"], "joinGame");
        assert_eq!(json["value"], "2100000000000000000");
        assert_eq!(json["maxFeeUnits"], 150_000);
    }
}
