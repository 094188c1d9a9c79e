use crate::error::Result;
use serde::{Deserialize, Serialize};
use stakemate_core::config::JoinConfig;
use stakemate_core::currency;
use stakemate_core::error::CoreError;
use stakemate_core::oracle::PriceOracle;
use stakemate_core::types::{Amount, GameInfo};

/// Wager expressed in one display currency, advisory only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayAmount {
    pub currency: String,
    pub amount: f64,
}

/// Point-in-time snapshot of what joining will cost.
///
/// The integer fields are exact and match the receiving contract's own
/// arithmetic; `display` and `fee_per_unit` are advisory and may be empty or
/// zero when the oracle is unavailable. Never mutated, only replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeQuote {
    pub wager: Amount,
    pub commission: Amount,
    pub total: Amount,
    pub fee_per_unit: Amount,
    pub display: Vec<DisplayAmount>,
}

impl StakeQuote {
    /// Derive a quote from received terms and the current oracle view.
    ///
    /// Fails only on an invalid wager; oracle failures degrade the advisory
    /// fields and let the flow proceed on the exact on-chain figures.
    pub async fn compute(
        game: &GameInfo,
        oracle: &dyn PriceOracle,
        config: &JoinConfig,
    ) -> Result<StakeQuote> {
        let wager = currency::to_smallest_unit(game.wager_amount)?;
        let commission = currency::commission(wager, config.commission_percent);
        let total = wager
            .checked_add(commission)
            .ok_or_else(|| CoreError::amount("stake overflows the ledger unit"))?;

        let mut display = Vec::new();
        for symbol in &config.display_currencies {
            match oracle.rate(symbol).await {
                Ok(rate) => display.push(DisplayAmount {
                    currency: symbol.clone(),
                    amount: currency::to_display_currency(wager, rate),
                }),
                Err(e) => tracing::warn!("No {} rate for wager display: {}", symbol, e),
            }
        }

        let fee_per_unit = match oracle.fee_per_unit().await {
            Ok(fee) => fee,
            Err(e) => {
                tracing::warn!("No fee estimate for quote: {}", e);
                Amount::ZERO
            }
        };

        Ok(StakeQuote {
            wager,
            commission,
            total,
            fee_per_unit,
            display,
        })
    }

    /// Same snapshot with a freshly fetched fee estimate.
    pub fn with_fee(&self, fee_per_unit: Amount) -> StakeQuote {
        StakeQuote {
            fee_per_unit,
            ..self.clone()
        }
    }
}
