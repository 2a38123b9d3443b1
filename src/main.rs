//! Handle one chess issue: play the move, store the record, list next moves.
//!
//! ```bash
//! REPOSITORY=octo/chess EVENT_ISSUE_NUMBER=12 \
//! EVENT_ISSUE_TITLE='chess|move|e2e4|1' EVENT_USER_LOGIN=alice \
//! issue_chess --events closed_issues.json
//! ```
//!
//! The outcome and the notifications go to stdout as JSON. The process exits
//! successfully even when the move was refused, the refusal is in the outcome.

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use issue_chess::config::ControllerArgs;
use issue_chess::rules::shakmaty_rules::ShakmatyRules;
use issue_chess::turns::event_log::Event;
use issue_chess::turns::game_store::FileGameStore;
use issue_chess::turns::lifecycle::{Lifecycle, Outcome};
use issue_chess::turns::notifications::{Notification, RecordingNotifier};
use issue_chess::utils::render_game_state::render_game_state;

#[derive(Serialize)]
struct Report<'a> {
    outcome: &'a Outcome,
    notifications: &'a [Notification],
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ControllerArgs::parse();
    let config = args.to_config();

    let events: Vec<Event> = match &args.events {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading event log {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("parsing event log {}", path.display()))?
        }
        None => Vec::new(),
    };

    let store = FileGameStore::new(&config.game_data_path);
    let mut lifecycle = Lifecycle::new(config, ShakmatyRules::new(), RecordingNotifier::new(), store);
    let outcome = lifecycle.run(events);
    let (notifier, _) = lifecycle.into_parts();

    if args.show_board {
        if let Some(position) = &outcome.position {
            eprintln!("{}", render_game_state(position));
        }
    }

    let report = Report {
        outcome: &outcome,
        notifications: &notifier.sent,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serializing outcome")?
    );

    Ok(())
}
