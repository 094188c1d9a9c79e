mod demo;
mod join;
mod quote;

pub use demo::demo;
pub use join::join;
pub use quote::quote;

use comfy_table::{presets::UTF8_FULL, Table};
use stakemate_join::{JoinCoordinator, JoinPhase};

/// Drive one full join: fetch terms, gate on explicit acceptance, escrow the
/// stake, wait for the start event.
pub(crate) async fn run_flow(coordinator: &mut JoinCoordinator, code: &str) -> anyhow::Result<()> {
    coordinator.submit_code(code).await?;
    println!("Fetching game details...");
    loop {
        coordinator.process_next().await?;
        match coordinator.phase() {
            JoinPhase::DetailsReady => break,
            JoinPhase::Idle => {
                anyhow::bail!(session_error(coordinator));
            }
            _ => {}
        }
    }

    print_terms(coordinator);

    let accepted = dialoguer::Confirm::new()
        .with_prompt("I accept the terms of play and this stake")
        .default(false)
        .interact()?;
    if !accepted {
        coordinator.cancel();
        println!("Join cancelled.");
        return Ok(());
    }

    coordinator.confirm_join().await?;
    println!("Stake committed; waiting for the session to start...");

    loop {
        if let Some(start) = coordinator.process_next().await? {
            println!(
                "Session started: playing {:?}, round {}/{}, {}s on the clock",
                start.colour, start.round, start.total_rounds, start.time_remaining
            );
            return Ok(());
        }
        if coordinator.phase() == JoinPhase::Idle {
            anyhow::bail!(session_error(coordinator));
        }
    }
}

fn session_error(coordinator: &JoinCoordinator) -> String {
    coordinator
        .session()
        .last_error
        .clone()
        .unwrap_or_else(|| "join flow failed".to_string())
}

fn print_terms(coordinator: &JoinCoordinator) {
    let session = coordinator.session();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Term", "Value"]);

    if let Some(code) = &session.code {
        table.add_row(vec!["Game code", code]);
    }
    if let Some(game) = &session.game {
        table.add_row(vec!["Time control", &format!("{}m", game.time_control)]);
        table.add_row(vec!["Rounds", &game.total_rounds.to_string()]);
    }
    if let Some(quote) = &session.quote {
        let mut wager = quote.wager.to_string();
        for display in &quote.display {
            wager.push_str(&format!(" / {:.2} {}", display.amount, display.currency));
        }
        table.add_row(vec!["Wager", &wager]);
        table.add_row(vec!["Commission", &quote.commission.to_string()]);
        table.add_row(vec!["Total stake", &quote.total.to_string()]);
        table.add_row(vec!["Fee per unit", &quote.fee_per_unit.to_string()]);
    }

    println!("{}", table);
}
