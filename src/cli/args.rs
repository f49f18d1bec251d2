use crate::core::EngineConfig;
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Rebuild trainer wallets from a payment-event export
#[derive(Parser, Debug)]
#[command(name = "trainer-earnings-engine")]
#[command(about = "Replay a payment-event export into trainer wallet summaries", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing the payment-event export
    #[arg(value_name = "INPUT", help = "Path to the payment-event export CSV")]
    pub input_file: PathBuf,

    /// Minimum withdrawal amount in rupees
    #[arg(
        long = "min-withdrawal",
        value_name = "AMOUNT",
        allow_negative_numbers = true,
        help = "Minimum withdrawal amount in rupees (default: 500)"
    )]
    pub min_withdrawal: Option<Decimal>,
}

impl CliArgs {
    /// Create an EngineConfig from CLI arguments
    ///
    /// Uses the default configuration where no override is given;
    /// out-of-range overrides fall back to the defaults.
    pub fn to_engine_config(&self) -> EngineConfig {
        let default = EngineConfig::default();
        match self.min_withdrawal {
            Some(min) => EngineConfig::new(default.commission_rate, min),
            None => default,
        }
    }
}

/// Parse command-line arguments
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
