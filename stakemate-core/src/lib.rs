//! Stakemate SDK - Core library for wagered match sessions
//!
//! This library provides the building blocks for joining wagered, timed game
//! sessions: exact native-currency conversion, the signaling channel, the
//! price/fee oracle and the ledger wallet boundaries.

pub mod config;
pub mod currency;
pub mod error;
pub mod ledger;
pub mod oracle;
pub mod signaling;
pub mod types;

pub use config::JoinConfig;
pub use error::{CoreError, Result};
pub use ledger::{ContractCall, LedgerWallet, RpcWallet};
pub use oracle::{HttpOracle, PriceOracle};
pub use signaling::{ClientEvent, EventSubscription, ServerEvent, Signaling};
pub use types::{Amount, Colour, GameInfo, SessionStart, WriteReceipt};
