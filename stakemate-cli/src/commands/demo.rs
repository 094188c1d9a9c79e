//! Loopback demo: the whole join flow against an in-process peer that plays
//! the signaling server, plus a funded demo wallet. Nothing leaves the
//! process.

use async_trait::async_trait;
use chrono::Utc;
use stakemate_core::ledger::{ContractCall, LedgerWallet};
use stakemate_core::oracle::PriceOracle;
use stakemate_core::signaling::{memory, ClientEvent, ServerEvent};
use stakemate_core::types::{Amount, Colour, GameInfo, SessionStart, WriteReceipt};
use stakemate_core::{currency, CoreError, JoinConfig};
use stakemate_join::JoinCoordinator;
use std::sync::Arc;
use uuid::Uuid;

const DEMO_TIME_CONTROL: u32 = 5;
const DEMO_ROUNDS: u32 = 3;

struct DemoWallet {
    balance: Amount,
}

#[async_trait]
impl LedgerWallet for DemoWallet {
    async fn is_connected(&self) -> bool {
        true
    }

    async fn address(&self) -> stakemate_core::Result<String> {
        Ok("0x00000000000000000000000000000000000000d1".to_string())
    }

    async fn balance(&self) -> stakemate_core::Result<Amount> {
        Ok(self.balance)
    }

    async fn submit_call(&self, call: ContractCall) -> stakemate_core::Result<WriteReceipt> {
        tracing::info!(
            "demo wallet: {}({}) with value {}",
            call.entry_point,
            call.args.join(", "),
            call.value
        );
        Ok(WriteReceipt {
            txid: format!("0x{}", Uuid::new_v4().simple()),
        })
    }
}

struct DemoOracle;

#[async_trait]
impl PriceOracle for DemoOracle {
    async fn rate(&self, currency: &str) -> stakemate_core::Result<f64> {
        match currency {
            "USD" => Ok(0.45),
            "GBP" => Ok(0.35),
            other => Err(CoreError::oracle(format!("no rate for {}", other))),
        }
    }

    async fn fee_per_unit(&self) -> stakemate_core::Result<Amount> {
        currency::parse_native("0.00000003")
    }
}

pub async fn demo(config: &JoinConfig, wager: f64) -> anyhow::Result<()> {
    let (client, mut peer) = memory::pair();

    // the simulated server: answer details requests, start on acceptance
    tokio::spawn(async move {
        while let Some(event) = peer.recv().await {
            match event {
                ClientEvent::GetGameDetails { code } => {
                    tracing::debug!("demo peer: details requested for {}", code);
                    peer.emit(ServerEvent::GameInfo(GameInfo {
                        time_control: DEMO_TIME_CONTROL,
                        total_rounds: DEMO_ROUNDS,
                        wager_amount: wager,
                    }));
                }
                ClientEvent::AcceptGame {
                    code,
                    wallet_address,
                } => {
                    tracing::debug!("demo peer: {} accepted by {}", code, wallet_address);
                    peer.emit(ServerEvent::Start(SessionStart {
                        colour: Colour::White,
                        time_remaining: (DEMO_TIME_CONTROL * 60) as u64,
                        round: 1,
                        total_rounds: DEMO_ROUNDS,
                        round_start: Utc::now(),
                    }));
                }
            }
        }
    });

    let wallet = DemoWallet {
        balance: currency::parse_native("1000")?,
    };
    let mut coordinator = JoinCoordinator::new(
        Arc::new(client),
        Arc::new(wallet),
        Arc::new(DemoOracle),
        config.clone(),
    );

    let code = Uuid::new_v4().simple().to_string()[..6].to_uppercase();
    println!("Demo session code: {}", code);
    super::run_flow(&mut coordinator, &code).await
}
