//! Trainer Earnings Engine CLI
//!
//! Command-line interface for rebuilding trainer wallets from a
//! payment-gateway export.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- payments.csv > wallets.csv
//! cargo run -- --min-withdrawal 1000 payments.csv > wallets.csv
//! ```
//!
//! The program replays each payment event through the earnings engine
//! (commission split, trainer-share credit) and writes the final wallet
//! summaries to stdout. Malformed rows are logged and skipped.
//!
//! Log verbosity follows `RUST_LOG` (default: `info`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, I/O error, etc.)

use std::process;
use tracing_subscriber::EnvFilter;
use trainer_earnings_engine::cli;
use trainer_earnings_engine::core::EarningsEngine;
use trainer_earnings_engine::replay::Replayer;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    let engine = EarningsEngine::with_config(args.to_engine_config());
    let replayer = Replayer::new(engine);

    // Summary CSV goes to stdout; logs go to stderr
    let mut output = std::io::stdout();
    match replayer.process(&args.input_file, &mut output) {
        Ok(stats) => {
            tracing::info!(
                processed = stats.processed,
                skipped = stats.skipped,
                "replay finished"
            );
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
