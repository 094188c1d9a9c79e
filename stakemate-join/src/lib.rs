//! Join coordination for wagered match sessions.
//!
//! The [`JoinCoordinator`] reconciles two independently-failing external
//! systems — the signaling channel and the ledger wallet — into a single
//! race-free join: discover terms by code, quote the exact stake, escrow it
//! on chain, then wait for the authoritative session start.

pub mod coordinator;
pub mod error;
pub mod quote;
pub mod session;

pub use coordinator::JoinCoordinator;
pub use error::{JoinError, Result};
pub use quote::{DisplayAmount, StakeQuote};
pub use session::{JoinPhase, JoinSession};
