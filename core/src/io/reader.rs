use crate::error::{Csv2JsonError, Result};
use crate::types::LandmarkRow;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Lazily parses landmark rows from comma-separated text
///
/// No header row is expected and empty lines are skipped. Each item is
/// either a complete [`LandmarkRow`] or a [`Csv2JsonError::MalformedRow`];
/// rows are never partially applied.
pub struct LandmarkReader<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
}

impl LandmarkReader<File> {
    /// Opens a CSV file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> LandmarkReader<R> {
    pub fn from_reader(reader: R) -> Self {
        let records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();
        Self { records }
    }
}

impl<R: Read> Iterator for LandmarkReader<R> {
    type Item = Result<LandmarkRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) {
                    return Some(Err(Csv2JsonError::malformed(
                        line,
                        None,
                        "row is not valid UTF-8",
                    )));
                }
                return Some(Err(Csv2JsonError::from(e)));
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let fields: Vec<&str> = record.iter().collect();
        Some(LandmarkRow::from_fields(&fields, line))
    }
}
