//! Gift Exchange - Binary Entry Point
//!
//! Builds a sample roster with a few couples who may not draw each other,
//! runs one draw and prints the result with its digest.
//!
//! Solver settings come from `GIFT_EXCHANGE_*` environment variables and
//! log verbosity from `RUST_LOG`.

use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use gift_exchange::{DirectoryError, MatchingEngine, Roster, SolverConfig};

/// Sample group
const PARTICIPANTS: [&str; 8] = [
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi",
];

/// Couples who may not draw each other
const COUPLES: [(&str, &str); 3] = [("Alice", "Bob"), ("Carol", "Dave"), ("Erin", "Frank")];

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match SolverConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    let mut engine = match MatchingEngine::with_config(config) {
        Ok(engine) => engine,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let roster = match build_roster() {
        Ok(roster) => roster,
        Err(err) => {
            error!(error = %err, "failed to build roster");
            return ExitCode::FAILURE;
        }
    };
    info!(
        participants = roster.len(),
        restrictions = roster.restrictions().len(),
        "roster ready"
    );

    let (participants, restrictions) = roster.snapshot();
    let assignment = match engine.draw(&participants, &restrictions) {
        Ok(assignment) => assignment,
        Err(err) => {
            error!(error = %err, reason = ?err.reason(), "draw failed");
            return ExitCode::FAILURE;
        }
    };

    println!("===========================================");
    println!("  Gift Exchange");
    println!("===========================================");
    println!();
    for pair in &assignment {
        println!("  {:<8} -> {}", pair.giver.display_name(), pair.recipient.display_name());
    }
    println!();

    let stats = engine.last_stats();
    println!(
        "attempts: {}  steps: {}  backtracks: {}  fallback: {}",
        stats.attempts, stats.steps, stats.backtracks, stats.used_fallback
    );
    match assignment.digest_hex() {
        Ok(digest) => println!("digest: {digest}"),
        Err(err) => {
            error!(error = ?err, "failed to encode assignment");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn build_roster() -> Result<Roster, DirectoryError> {
    let mut roster = Roster::with_capacity(PARTICIPANTS.len());
    for name in PARTICIPANTS {
        roster.add(name)?;
    }
    for (a, b) in COUPLES {
        roster.forbid_mutual(a, b)?;
    }
    Ok(roster)
}
