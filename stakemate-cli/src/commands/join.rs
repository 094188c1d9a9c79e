use stakemate_core::ledger::RpcWallet;
use stakemate_core::oracle::HttpOracle;
use stakemate_core::signaling::HttpSignaling;
use stakemate_core::JoinConfig;
use stakemate_join::JoinCoordinator;
use std::sync::Arc;

/// Join a live session against the configured signaling server, oracle and
/// wallet provider.
pub async fn join(config: &JoinConfig, code: &str) -> anyhow::Result<()> {
    let signaling = Arc::new(HttpSignaling::new(config.signaling_url.clone()));
    let wallet = Arc::new(RpcWallet::new(config.wallet_url.clone()));
    let oracle = Arc::new(HttpOracle::new(config.oracle_url.clone(), config.chain_id));

    let mut coordinator = JoinCoordinator::new(signaling, wallet, oracle, config.clone());
    super::run_flow(&mut coordinator, code).await
}
