use crate::error::{JoinError, Result};
use crate::quote::StakeQuote;
use crate::session::{JoinPhase, JoinSession};
use stakemate_core::config::JoinConfig;
use stakemate_core::ledger::{ContractCall, LedgerWallet};
use stakemate_core::oracle::PriceOracle;
use stakemate_core::signaling::{ClientEvent, EventSubscription, ServerEvent, Signaling};
use stakemate_core::types::SessionStart;
use std::sync::Arc;

/// Drives the join flow for one session: discovers terms over signaling,
/// quotes the exact stake, escrows it through the wallet provider and waits
/// for the authoritative start.
///
/// All transitions take `&mut self`, so they cannot be re-entered
/// concurrently; a second `confirm_join` while one is in flight is rejected
/// by the phase guard. Events that arrive while a write is pending queue in
/// the subscription and are handled once the write has returned.
pub struct JoinCoordinator {
    signaling: Arc<dyn Signaling>,
    wallet: Arc<dyn LedgerWallet>,
    oracle: Arc<dyn PriceOracle>,
    config: JoinConfig,
    session: JoinSession,
    events: Option<EventSubscription>,
}

impl JoinCoordinator {
    pub fn new(
        signaling: Arc<dyn Signaling>,
        wallet: Arc<dyn LedgerWallet>,
        oracle: Arc<dyn PriceOracle>,
        config: JoinConfig,
    ) -> Self {
        let events = signaling.subscribe();
        Self {
            signaling,
            wallet,
            oracle,
            config,
            session: JoinSession::new(),
            events: Some(events),
        }
    }

    /// Observable state for rendering.
    pub fn session(&self) -> &JoinSession {
        &self.session
    }

    pub fn phase(&self) -> JoinPhase {
        self.session.phase
    }

    /// Request the terms of the session identified by `code`.
    pub async fn submit_code(&mut self, code: &str) -> Result<()> {
        if self.session.phase != JoinPhase::Idle {
            return Err(self.invalid_phase("submit_code"));
        }
        let code = code.trim();
        if code.is_empty() {
            return Err(JoinError::EmptyCode);
        }

        let sent = self
            .signaling
            .send(ClientEvent::GetGameDetails {
                code: code.to_string(),
            })
            .await;
        if let Err(e) = sent {
            return Err(self.fail_to_idle(e.to_string()));
        }

        self.session.code = Some(code.to_string());
        self.session.phase = JoinPhase::FetchingDetails;
        self.session.last_error = None;
        tracing::info!("Requested details for game {}", code);
        Ok(())
    }

    /// Process the next server event.
    ///
    /// Returns the [`SessionStart`] once the session begins; `Ok(None)` for
    /// every other handled event. Remote failures (details error, channel
    /// error) move the session to its safe state and surface through
    /// [`JoinSession::last_error`] rather than as an `Err`.
    pub async fn process_next(&mut self) -> Result<Option<SessionStart>> {
        let events = self.events.as_mut().ok_or(JoinError::ChannelClosed)?;
        let event = match events.recv().await {
            Some(event) => event,
            None => {
                self.session.reset(Some("signaling channel closed".to_string()));
                self.events = None;
                return Err(JoinError::ChannelClosed);
            }
        };

        match event {
            ServerEvent::GameInfo(info) => {
                if self.session.phase != JoinPhase::FetchingDetails {
                    tracing::debug!("Ignoring stale gameInfo in phase {}", self.session.phase);
                    return Ok(None);
                }
                let quote = StakeQuote::compute(&info, self.oracle.as_ref(), &self.config).await?;
                tracing::info!(
                    "Game details received: wager {} + commission {} = {} total",
                    quote.wager,
                    quote.commission,
                    quote.total
                );
                self.session.game = Some(info);
                self.session.quote = Some(quote);
                self.session.phase = JoinPhase::DetailsReady;
                self.session.last_error = None;
                Ok(None)
            }
            ServerEvent::Error(msg) => {
                // No write can be in flight here: submissions block inside
                // confirm_join, so this event was queued until it returned.
                tracing::warn!("Signaling error in phase {}: {}", self.session.phase, msg);
                self.session.reset(Some(msg));
                Ok(None)
            }
            ServerEvent::Start(start) => {
                if self.session.phase != JoinPhase::Joining {
                    tracing::debug!("Ignoring stale start in phase {}", self.session.phase);
                    return Ok(None);
                }
                tracing::info!(
                    "Session started: {:?}, round {}/{}",
                    start.colour,
                    start.round,
                    start.total_rounds
                );
                self.session.phase = JoinPhase::Started;
                Ok(Some(start))
            }
        }
    }

    /// Escrow the stake and accept the session terms.
    ///
    /// The caller must have verified the user's affirmative terms acceptance
    /// before invoking this. Validation failures return to `DetailsReady`
    /// with no funds at risk; a rejected write also returns to
    /// `DetailsReady` since the terms remain valid for a fresh attempt.
    pub async fn confirm_join(&mut self) -> Result<()> {
        if self.session.phase != JoinPhase::DetailsReady {
            return Err(self.invalid_phase("confirm_join"));
        }
        let code = self
            .session
            .code
            .clone()
            .ok_or_else(|| JoinError::Core(stakemate_core::CoreError::internal("no session code")))?;
        let quote = self
            .session
            .quote
            .clone()
            .ok_or_else(|| JoinError::Core(stakemate_core::CoreError::internal("no stake quote")))?;

        if !self.wallet.is_connected().await {
            return Err(self.stay_ready(JoinError::WalletNotConnected));
        }
        let address = match self.wallet.address().await {
            Ok(address) => address,
            Err(e) => return Err(self.stay_ready(JoinError::Core(e))),
        };

        // Quote-time estimates may be stale; re-fetch at payment time.
        let fee_per_unit = match self.oracle.fee_per_unit().await {
            Ok(fee) => fee,
            Err(e) => {
                tracing::warn!("Fee estimate failed at payment time: {}", e);
                return Err(self.stay_ready(JoinError::FeeUnavailable));
            }
        };
        let quote = quote.with_fee(fee_per_unit);

        let balance = match self.wallet.balance().await {
            Ok(balance) => balance,
            Err(e) => return Err(self.stay_ready(JoinError::Core(e))),
        };

        // A write the wallet cannot afford (stake + fee) reverts on chain
        // and still burns the fee; refuse it client-side instead.
        let headroom = fee_per_unit
            .checked_mul(self.config.max_fee_units as u128)
            .unwrap_or(balance);
        let spendable = balance.saturating_sub(headroom);
        if quote.total >= spendable {
            return Err(self.stay_ready(JoinError::InsufficientBalance {
                need: quote.total,
                available: balance,
            }));
        }

        self.session.quote = Some(quote.clone());
        self.session.phase = JoinPhase::Joining;
        self.session.last_error = None;
        tracing::info!("Submitting join for game {} with stake {}", code, quote.total);

        let call = ContractCall {
            chain_id: self.config.chain_id,
            contract_address: self.config.contract_address.clone(),
            entry_point: self.config.entry_point.clone(),
            args: vec![code.clone()],
            value: quote.total,
            max_fee_units: self.config.max_fee_units,
        };
        let receipt = match self.wallet.submit_call(call).await {
            Ok(receipt) => receipt,
            Err(e) => {
                let msg = first_sentence(&e.to_string());
                tracing::error!("Join write rejected: {}", e);
                self.session.phase = JoinPhase::DetailsReady;
                self.session.last_error = Some(msg.clone());
                return Err(JoinError::WriteRejected(msg));
            }
        };
        tracing::info!("Stake committed in {}", receipt.txid);

        // Only after the write succeeded; the real acknowledgement is the
        // later start event, not this notification.
        let sent = self
            .signaling
            .send(ClientEvent::AcceptGame {
                code,
                wallet_address: address,
            })
            .await;
        if let Err(e) = sent {
            return Err(self.fail_to_idle(e.to_string()));
        }

        Ok(())
    }

    /// Leave the flow: unsubscribes from signaling and discards the session.
    /// Late events are never acted upon afterwards.
    pub fn cancel(&mut self) {
        tracing::info!("Join flow cancelled in phase {}", self.session.phase);
        self.events = None;
        self.session.reset(None);
    }

    fn invalid_phase(&self, action: &'static str) -> JoinError {
        JoinError::InvalidPhase {
            action,
            phase: self.session.phase.to_string(),
        }
    }

    /// Record a pre-payment failure without leaving `DetailsReady`.
    fn stay_ready(&mut self, error: JoinError) -> JoinError {
        self.session.last_error = Some(error.to_string());
        error
    }

    /// Channel-level failure: unwind to `Idle` with the message surfaced.
    fn fail_to_idle(&mut self, msg: String) -> JoinError {
        self.session.reset(Some(msg.clone()));
        JoinError::Core(stakemate_core::CoreError::Channel(msg))
    }
}

/// Wallet-provider errors are verbose; only the first sentence is
/// actionable for the user. Heuristic, not a guarantee across providers.
fn first_sentence(msg: &str) -> String {
    msg.split_terminator(['.', '!', '?'])
        .next()
        .unwrap_or(msg)
        .trim()
        .to_string()
}
