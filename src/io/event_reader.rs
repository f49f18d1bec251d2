//! Streaming CSV reader for payment-event exports
//!
//! Provides an iterator over payment events from a CSV file, one row at a
//! time without loading the file into memory. Delegates CSV format
//! concerns to the `csv_format` module.
//!
//! Fatal errors (file not found, I/O) are returned from `new()`; per-row
//! parse errors are yielded as `Err` items with the offending line number
//! so the replay loop can log and continue.

use crate::io::csv_format::{convert_event_record, CsvEventRecord};
use crate::types::{EarningsError, PaymentEvent};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming payment-event reader
#[derive(Debug)]
pub struct EventReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl EventReader {
    /// Open a payment-event CSV for streaming iteration
    ///
    /// The reader trims whitespace from all fields and tolerates
    /// flexible field counts so one short row cannot abort the stream.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` when the path does not exist
    /// - `IoError` for any other open failure
    pub fn new(path: &Path) -> Result<Self, EarningsError> {
        let file = File::open(path).map_err(|error| match error.kind() {
            std::io::ErrorKind::NotFound => EarningsError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => EarningsError::from(error),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }

    /// Attach the current line number to a per-row error
    fn at_line(&self, error: EarningsError) -> EarningsError {
        match error {
            EarningsError::ParseError { message, .. } => EarningsError::ParseError {
                // +1 for the header row
                line: Some(self.line_num + 1),
                message,
            },
            other => other,
        }
    }
}

impl Iterator for EventReader {
    type Item = Result<PaymentEvent, EarningsError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvEventRecord>();

        match deserializer.next()? {
            Ok(record) => {
                self.line_num += 1;
                Some(convert_event_record(record).map_err(|e| self.at_line(e)))
            }
            Err(error) => {
                self.line_num += 1;
                Some(Err(self.at_line(EarningsError::from(error))))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "order_id,trainer,student,amount,plan,timestamp\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_reader_opens_existing_file() {
        let file = create_temp_csv(HEADER);
        assert!(EventReader::new(file.path()).is_ok());
    }

    #[test]
    fn test_reader_fails_on_missing_file() {
        let result = EventReader::new(Path::new("nonexistent.csv"));
        assert!(matches!(
            result.unwrap_err(),
            EarningsError::FileNotFound { .. }
        ));
    }

    #[test]
    fn test_reader_iterates_valid_rows() {
        let content = format!(
            "{HEADER}ORD-1,1,10,1000,City Driving,2025-06-01T10:00:00Z\n\
             ORD-2,2,11,500.50,Highway Basics,2025-06-02T11:00:00Z\n"
        );
        let file = create_temp_csv(&content);

        let events: Vec<_> = EventReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].order_id, "ORD-1");
        assert_eq!(events[0].amount, Decimal::new(1000, 0));
        assert_eq!(events[1].trainer, 2);
        assert_eq!(events[1].amount, Decimal::new(50050, 2));
    }

    #[test]
    fn test_reader_handles_whitespace() {
        let content = format!("{HEADER}  ORD-1 , 1 , 10 , 1000 , City Driving , 2025-06-01T10:00:00Z \n");
        let file = create_temp_csv(&content);

        let events: Vec<_> = EventReader::new(file.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].order_id, "ORD-1");
        assert_eq!(events[0].amount, Decimal::new(1000, 0));
    }

    #[test]
    fn test_reader_yields_error_with_line_number() {
        let content = format!(
            "{HEADER}ORD-1,1,10,1000,City Driving,2025-06-01T10:00:00Z\n\
             ORD-2,2,11,not-a-number,Highway Basics,2025-06-02T11:00:00Z\n"
        );
        let file = create_temp_csv(&content);

        let rows: Vec<_> = EventReader::new(file.path()).unwrap().collect();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_ok());

        let error = rows[1].as_ref().unwrap_err();
        assert!(matches!(
            error,
            EarningsError::ParseError { line: Some(3), .. }
        ));
    }

    #[test]
    fn test_reader_continues_after_error() {
        let content = format!(
            "{HEADER}ORD-1,1,10,1000,City Driving,2025-06-01T10:00:00Z\n\
             ORD-2,not-a-trainer,11,500,Highway Basics,2025-06-02T11:00:00Z\n\
             ORD-3,3,12,750,Parking Drills,2025-06-03T11:00:00Z\n"
        );
        let file = create_temp_csv(&content);

        let rows: Vec<_> = EventReader::new(file.path()).unwrap().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_ok());
        assert!(rows[1].is_err());
        assert!(rows[2].is_ok());
    }

    #[test]
    fn test_reader_empty_file_after_header() {
        let file = create_temp_csv(HEADER);

        let rows: Vec<_> = EventReader::new(file.path()).unwrap().collect();
        assert!(rows.is_empty());
    }
}
