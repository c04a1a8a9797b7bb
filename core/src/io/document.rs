use crate::error::{Csv2JsonError, Result};
use crate::record::OutputRecord;
use crate::types::OutputLayout;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Mapping from key to rendered record, in first-seen key order
///
/// Inserting an existing key replaces its value in place.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    layout: OutputLayout,
    records: Map<String, Value>,
}

impl OutputDocument {
    pub fn new(layout: OutputLayout) -> Self {
        Self {
            layout,
            records: Map::new(),
        }
    }

    /// Stores a record under `key`
    ///
    /// Returns `true` if an earlier record for the key was replaced.
    pub fn insert(&mut self, key: &str, record: &OutputRecord) -> bool {
        self.records
            .insert(key.to_string(), record.to_json(self.layout))
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.records.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Serializes the document with 4-space indentation
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(writer, formatter);
        self.records.serialize(&mut serializer)?;
        Ok(())
    }

    /// Writes the document to `path`
    ///
    /// # Errors
    ///
    /// Returns [`Csv2JsonError::Write`] if the file cannot be created or
    /// written. The parent directory is not created.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let write_error = |source: std::io::Error| Csv2JsonError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer).map_err(|e| match e {
            Csv2JsonError::JsonError(e) => write_error(e.into()),
            other => other,
        })?;
        writer.flush().map_err(write_error)
    }
}
