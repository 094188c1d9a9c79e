use crate::quote::StakeQuote;
use serde::{Deserialize, Serialize};
use stakemate_core::types::GameInfo;

/// Phase of the join flow.
///
/// `Idle` is initial and the re-entry point on error or cancel; `Started`
/// is terminal — ownership of the running session passes to game play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinPhase {
    Idle,
    FetchingDetails,
    DetailsReady,
    Joining,
    Started,
}

impl std::fmt::Display for JoinPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            JoinPhase::Idle => "idle",
            JoinPhase::FetchingDetails => "fetching details",
            JoinPhase::DetailsReady => "details ready",
            JoinPhase::Joining => "joining",
            JoinPhase::Started => "started",
        };
        f.write_str(name)
    }
}

/// The coordinator's working state, render-ready for a caller.
///
/// Mutated only by the coordinator's transition handlers; every observable
/// snapshot is fully consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinSession {
    pub code: Option<String>,
    pub game: Option<GameInfo>,
    pub quote: Option<StakeQuote>,
    pub phase: JoinPhase,
    pub last_error: Option<String>,
}

impl JoinSession {
    pub fn new() -> Self {
        Self {
            code: None,
            game: None,
            quote: None,
            phase: JoinPhase::Idle,
            last_error: None,
        }
    }

    /// Back to initial state, keeping only the error that caused the unwind
    /// so the caller can still surface it.
    pub fn reset(&mut self, error: Option<String>) {
        *self = Self::new();
        self.last_error = error;
    }
}

impl Default for JoinSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_keeps_only_the_error() {
        let mut session = JoinSession::new();
        session.code = Some("ABCD".to_string());
        session.phase = JoinPhase::FetchingDetails;
        session.reset(Some("game not found".to_string()));

        assert_eq!(session.phase, JoinPhase::Idle);
        assert!(session.code.is_none());
        assert_eq!(session.last_error.as_deref(), Some("game not found"));
    }
}
