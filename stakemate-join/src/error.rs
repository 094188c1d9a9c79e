use stakemate_core::types::Amount;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JoinError>;

#[derive(Error, Debug)]
pub enum JoinError {
    #[error(transparent)]
    Core(#[from] stakemate_core::CoreError),

    #[error("Invalid phase for {action}: {phase}")]
    InvalidPhase { action: &'static str, phase: String },

    #[error("Game code cannot be empty")]
    EmptyCode,

    #[error("Please connect your wallet")]
    WalletNotConnected,

    #[error("Insufficient balance: need {need}, have {available}")]
    InsufficientBalance { need: Amount, available: Amount },

    #[error("Could not estimate network fee")]
    FeeUnavailable,

    #[error("Transaction rejected: {0}")]
    WriteRejected(String),

    #[error("Signaling channel closed")]
    ChannelClosed,
}
