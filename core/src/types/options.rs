use crate::types::{MatchMode, OutputLayout, RowPolicy};
use std::path::PathBuf;

/// Default glob for the landmark CSV
pub const DEFAULT_INPUT_FILE_FILTER: &str = "**/*.csv";

/// Default glob for auxiliary tag files
pub const DEFAULT_TAG_FILE_FILTER: &str = "**/*.dcm";

/// Default tag copied into `info`
pub const DEFAULT_TAGS: &str = "PatientID";

/// Default output file stem
pub const DEFAULT_OUTPUT_FILE_STEM: &str = "csv2jsonoutput";

/// Configuration for one conversion run
///
/// # Example
///
/// ```
/// use csv2json_core::{ConvertOptions, MatchMode};
///
/// let options = ConvertOptions::new("/incoming", "/outgoing")
///     .with_tags_from_list("PatientID, StudyDate")
///     .with_match_mode(MatchMode::Exact);
///
/// assert_eq!(options.add_tags, vec!["PatientID", "StudyDate"]);
/// assert_eq!(
///     options.output_path(),
///     std::path::PathBuf::from("/outgoing/csv2jsonoutput.json")
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Directory scanned for the CSV and auxiliary files
    pub input_dir: PathBuf,

    /// Directory receiving the output document
    pub output_dir: PathBuf,

    /// Glob selecting the CSV (first match is used)
    pub input_file_filter: String,

    /// Glob selecting auxiliary tag files
    pub tag_file_filter: String,

    /// Tag names copied into `info`
    pub add_tags: Vec<String>,

    /// Output file name without the `.json` extension
    pub output_file_stem: String,

    pub match_mode: MatchMode,

    pub layout: OutputLayout,

    pub row_policy: RowPolicy,
}

impl ConvertOptions {
    /// Creates options with default filters, tags and output stem
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            input_file_filter: DEFAULT_INPUT_FILE_FILTER.to_string(),
            tag_file_filter: DEFAULT_TAG_FILE_FILTER.to_string(),
            add_tags: parse_tag_list(DEFAULT_TAGS),
            output_file_stem: DEFAULT_OUTPUT_FILE_STEM.to_string(),
            match_mode: MatchMode::default(),
            layout: OutputLayout::default(),
            row_policy: RowPolicy::default(),
        }
    }

    /// Path of the output document: `<output_dir>/<stem>.json`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.output_file_stem))
    }

    /// Builder: Set the CSV glob
    pub fn with_input_file_filter(mut self, filter: impl Into<String>) -> Self {
        self.input_file_filter = filter.into();
        self
    }

    /// Builder: Set the auxiliary file glob
    pub fn with_tag_file_filter(mut self, filter: impl Into<String>) -> Self {
        self.tag_file_filter = filter.into();
        self
    }

    /// Builder: Set the requested tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_tags = normalize_tags(tags);
        self
    }

    /// Builder: Set the requested tags from a comma-separated list
    pub fn with_tags_from_list(mut self, list: &str) -> Self {
        self.add_tags = parse_tag_list(list);
        self
    }

    /// Builder: Set the output file stem
    pub fn with_output_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.output_file_stem = stem.into();
        self
    }

    /// Builder: Set the key matching mode
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Builder: Set the output layout
    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Builder: Set the malformed row policy
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }
}

/// Splits a comma-separated tag list
///
/// Names are trimmed; empty names and repeats are dropped.
pub fn parse_tag_list(list: &str) -> Vec<String> {
    normalize_tags(list.split(','))
}

fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !result.iter().any(|t| t == tag) {
            result.push(tag.to_string());
        }
    }
    result
}
