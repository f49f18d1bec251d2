//! Payment-event replay
//!
//! This module replays a payment-gateway export through the engine and
//! writes the resulting per-trainer wallet summary. It is the offline
//! counterpart of the live `on_payment_completed` feed: rebuilding
//! wallets from an export must produce exactly the balances the live
//! feed would have.
//!
//! # Error Handling
//!
//! Fatal errors (file not found, I/O) abort the replay. Per-row errors —
//! unparsable rows, non-positive amounts — are logged at `warn`, counted,
//! and skipped; one bad row never aborts the rest of the export.

use crate::core::EarningsEngine;
use crate::io::event_reader::EventReader;
use crate::io::write_wallets_csv;
use crate::types::EarningsError;
use std::io::Write;
use std::path::Path;
use tracing::warn;

/// Outcome counters of a replay run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplayStats {
    /// Rows credited into the ledger
    pub processed: usize,

    /// Rows skipped with a recoverable error
    pub skipped: usize,
}

/// Replays payment-event exports through an engine
#[derive(Debug)]
pub struct Replayer {
    engine: EarningsEngine,
}

impl Replayer {
    /// Create a replayer over an engine
    pub fn new(engine: EarningsEngine) -> Self {
        Replayer { engine }
    }

    /// The engine the replayer feeds
    pub fn engine(&self) -> &EarningsEngine {
        &self.engine
    }

    /// Replay an export file and write the wallet summary CSV
    ///
    /// # Errors
    ///
    /// Returns the underlying error if the input cannot be opened or the
    /// summary cannot be written. Per-row failures are logged and counted
    /// in the returned stats instead.
    pub fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ReplayStats, EarningsError> {
        let reader = EventReader::new(input_path)?;
        let mut stats = ReplayStats::default();

        for row in reader {
            match row {
                Ok(event) => match self.engine.on_payment_completed(event) {
                    Ok(_) => stats.processed += 1,
                    Err(error) => {
                        warn!("skipping payment event: {error}");
                        stats.skipped += 1;
                    }
                },
                Err(error) => {
                    warn!("skipping row: {error}");
                    stats.skipped += 1;
                }
            }
        }

        let wallets = self.engine.wallets()?;
        write_wallets_csv(&wallets, output)?;

        Ok(stats)
    }
}
