use crate::error::Result;
use crate::extraction::{resolve_tag, MetadataResolver};
use crate::io::{find_files, GlobPattern, LandmarkReader, OutputDocument};
use crate::observer::RunObserver;
use crate::record::OutputRecord;
use crate::types::{ConvertOptions, RowPolicy};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Outcome of a conversion run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// CSV that was converted, `None` when no file matched the filter
    pub csv_path: Option<PathBuf>,

    /// Output document, `None` when nothing was written
    pub output_path: Option<PathBuf>,

    /// Rows converted into records
    pub rows_converted: usize,

    /// Malformed rows skipped under [`RowPolicy::Skip`]
    pub rows_skipped: usize,

    /// Distinct keys in the output document
    pub records_written: usize,
}

impl RunSummary {
    /// Whether a CSV was found and converted
    pub fn converted(&self) -> bool {
        self.output_path.is_some()
    }
}

/// Converts the landmark CSV found under `options.input_dir`
///
/// Finds the first CSV matching `input_file_filter`, resolves auxiliary
/// metadata for every row from files matching `tag_file_filter`, and writes
/// one JSON document to [`ConvertOptions::output_path`].
///
/// When no CSV matches, nothing is written and the run still succeeds.
///
/// # Errors
///
/// Returns an error if:
/// - A filter is not a valid glob
/// - The input directory cannot be read
/// - A row is malformed and the row policy is [`RowPolicy::Abort`]
/// - The output document cannot be written
///
/// # Example
///
/// ```no_run
/// use csv2json_core::{convert, ConvertOptions, LogObserver};
///
/// let options = ConvertOptions::new("/incoming", "/outgoing");
/// let summary = convert(&options, &mut LogObserver).unwrap();
/// println!("{} record(s) written", summary.records_written);
/// ```
pub fn convert(options: &ConvertOptions, observer: &mut dyn RunObserver) -> Result<RunSummary> {
    let started = Instant::now();
    let result = run(options, observer);
    observer.on_run_complete(started.elapsed());
    result
}

fn run(options: &ConvertOptions, observer: &mut dyn RunObserver) -> Result<RunSummary> {
    let input_filter = GlobPattern::new(&options.input_file_filter)?;
    let tag_filter = GlobPattern::new(&options.tag_file_filter)?;

    let csv_path = match find_files(&options.input_dir, &input_filter)?
        .into_iter()
        .next()
    {
        Some(path) => path,
        None => {
            info!(
                "No input file matching '{}' found in {}, nothing to convert",
                options.input_file_filter,
                options.input_dir.display()
            );
            return Ok(RunSummary::default());
        }
    };
    info!("Converting {}", csv_path.display());

    for name in &options.add_tags {
        if resolve_tag(name).is_none() {
            warn!(
                "'{}' is not a DICOM dictionary keyword; only text dumps can supply it",
                name
            );
        }
    }

    let aux_files = find_files(&options.input_dir, &tag_filter)?;
    let mut resolver = MetadataResolver::new(
        &options.input_dir,
        aux_files,
        options.match_mode,
        options.add_tags.clone(),
    );
    info!(
        "Found {} auxiliary file(s) matching '{}'",
        resolver.file_count(),
        options.tag_file_filter
    );

    let mut document = OutputDocument::new(options.layout);
    let mut summary = RunSummary {
        csv_path: Some(csv_path.clone()),
        ..RunSummary::default()
    };

    for row in LandmarkReader::from_path(&csv_path)? {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_row_error() && options.row_policy == RowPolicy::Skip => {
                observer.on_warning(e.row_key().unwrap_or(""), &format!("skipping row: {}", e));
                summary.rows_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        let metadata = resolver.resolve(&row.key, observer);
        let record = OutputRecord::build(&row, &metadata);
        if document.insert(&row.key, &record) {
            debug!("Key {} seen again, keeping the later row", row.key);
        }
        summary.rows_converted += 1;
    }

    let output_path = options.output_path();
    document.write_to_file(&output_path)?;
    info!(
        "Wrote {} record(s) to {}",
        document.len(),
        output_path.display()
    );

    summary.records_written = document.len();
    summary.output_path = Some(output_path);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_no_input_is_a_successful_no_op() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let options = ConvertOptions::new(input.path(), output.path());

        let mut observer = RecordingObserver::new();
        let summary = convert(&options, &mut observer).unwrap();

        assert!(!summary.converted());
        assert_eq!(summary, RunSummary::default());
        assert!(!options.output_path().exists());
        assert!(observer.completed.is_some());
    }

    #[test]
    fn test_invalid_filter_is_an_error() {
        let input = TempDir::new().unwrap();
        let options =
            ConvertOptions::new(input.path(), input.path()).with_input_file_filter("[csv");

        let mut observer = RecordingObserver::new();
        assert!(convert(&options, &mut observer).is_err());
        assert!(observer.completed.is_some());
    }

    #[test]
    fn test_skip_policy_counts_rows() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(
            input.path().join("landmarks.csv"),
            "P001,1,2,3,4,5,6,7,8,9,10,11,12\nP002,1,2\n",
        )
        .unwrap();

        let options = ConvertOptions::new(input.path(), output.path())
            .with_tags(Vec::<String>::new())
            .with_row_policy(RowPolicy::Skip);
        let mut observer = RecordingObserver::new();
        let summary = convert(&options, &mut observer).unwrap();

        assert_eq!(summary.rows_converted, 1);
        assert_eq!(summary.rows_skipped, 1);
        assert_eq!(summary.records_written, 1);
        assert!(observer.warnings_for("P002")[0].starts_with("skipping row"));
    }
}
