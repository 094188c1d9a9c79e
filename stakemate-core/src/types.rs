use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decimal places of the native currency (smallest unit = 10^-18 native).
pub const NATIVE_DECIMALS: u32 = 18;

/// An amount in the ledger's smallest integer unit.
///
/// The ledger rejects fractional smallest units, so everything that can end
/// up on chain is carried as a `u128` and converted with integer arithmetic
/// only (see `currency`). Serialized as a decimal string: JSON numbers lose
/// precision past 2^53.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub const fn from_units(units: u128) -> Self {
        Amount(units)
    }

    pub const fn as_units(&self) -> u128 {
        self.0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_mul(self, factor: u128) -> Option<Amount> {
        self.0.checked_mul(factor).map(Amount)
    }

    pub fn saturating_sub(self, other: Amount) -> Amount {
        Amount(self.0.saturating_sub(other.0))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::currency::format_native(*self))
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.0.to_string()
    }
}

impl TryFrom<String> for Amount {
    type Error = crate::error::CoreError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse::<u128>()
            .map(Amount)
            .map_err(|e| crate::error::CoreError::amount(format!("invalid unit amount '{}': {}", s, e)))
    }
}

/// Terms of a discovered session, as sent by the signaling server.
///
/// Immutable once received; a re-fetch replaces the whole value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    /// Time control per round, in minutes.
    pub time_control: u32,
    /// Number of rounds in the match.
    pub total_rounds: u32,
    /// Wager in native currency units (decimal, as the server quotes it).
    pub wager_amount: f64,
}

/// Side assigned to a player when the session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colour {
    White,
    Black,
}

/// Payload of the signaling `start` event. Delivered once; ownership passes
/// to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStart {
    pub colour: Colour,
    /// Clock remaining for the round, in seconds.
    pub time_remaining: u64,
    pub round: u32,
    pub total_rounds: u32,
    /// Authoritative round start, epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds", rename = "roundStartTimestamp")]
    pub round_start: DateTime<Utc>,
}

/// Receipt for a submitted ledger write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteReceipt {
    pub txid: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_serde_roundtrips_as_string() {
        let amount = Amount::from_units(2_100_000_000_000_000_000);
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"2100000000000000000\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }

    #[test]
    fn session_start_wire_format() {
        let json = r#"{
            "colour": "white",
            "timeRemaining": 300,
            "round": 1,
            "totalRounds": 3,
            "roundStartTimestamp": 1722945600000
        }"#;
        let start: SessionStart = serde_json::from_str(json).unwrap();
        assert_eq!(start.colour, Colour::White);
        assert_eq!(start.round, 1);
        assert_eq!(start.round_start.timestamp(), 1_722_945_600);
    }
}
