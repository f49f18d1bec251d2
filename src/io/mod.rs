//! I/O module for the replay CLI
//!
//! - `csv_format` - Pure CSV parsing and output formatting
//! - `event_reader` - Streaming reader over payment-event exports

pub mod csv_format;
pub mod event_reader;

pub use csv_format::{convert_event_record, write_wallets_csv, CsvEventRecord};
pub use event_reader::EventReader;
