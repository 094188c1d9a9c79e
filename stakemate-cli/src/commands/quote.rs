use comfy_table::{presets::UTF8_FULL, Table};
use stakemate_core::oracle::{HttpOracle, PriceOracle};
use stakemate_core::{currency, JoinConfig};

/// Price a hypothetical wager without touching any session.
pub async fn quote(config: &JoinConfig, wager: &str) -> anyhow::Result<()> {
    let wager = currency::parse_native(wager)?;
    let commission = currency::commission(wager, config.commission_percent);
    let total = wager
        .checked_add(commission)
        .ok_or_else(|| anyhow::anyhow!("stake overflows the ledger unit"))?;

    let oracle = HttpOracle::new(config.oracle_url.clone(), config.chain_id);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Term", "Value"]);
    table.add_row(vec!["Wager", &wager.to_string()]);
    table.add_row(vec![
        "Commission",
        &format!("{} ({}%)", commission, config.commission_percent),
    ]);
    table.add_row(vec!["Total stake", &total.to_string()]);

    for symbol in &config.display_currencies {
        match oracle.rate(symbol).await {
            Ok(rate) => {
                table.add_row(vec![
                    &format!("Wager ({})", symbol),
                    &format!("{:.2}", currency::to_display_currency(wager, rate)),
                ]);
            }
            Err(e) => tracing::warn!("No {} rate: {}", symbol, e),
        }
    }
    match oracle.fee_per_unit().await {
        Ok(fee) => {
            table.add_row(vec!["Fee per unit", &fee.to_string()]);
        }
        Err(e) => tracing::warn!("No fee estimate: {}", e),
    }

    println!("{}", table);
    Ok(())
}
