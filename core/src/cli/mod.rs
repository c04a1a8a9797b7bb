pub mod report;

use crate::types::{
    ConvertOptions, MatchMode, OutputLayout, RowPolicy, DEFAULT_INPUT_FILE_FILTER,
    DEFAULT_OUTPUT_FILE_STEM, DEFAULT_TAGS, DEFAULT_TAG_FILE_FILTER,
};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for csv2json
#[derive(Parser, Debug)]
#[command(name = "csv2json")]
#[command(about = "Convert landmark CSV predictions to a JSON representation")]
#[command(version)]
pub struct Cli {
    /// Directory containing the landmark CSV and auxiliary tag files
    #[arg(value_name = "INPUT_DIR", required_unless_present = "man")]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the JSON document
    #[arg(value_name = "OUTPUT_DIR", required_unless_present = "man")]
    pub output_dir: Option<PathBuf>,

    /// Glob selecting the landmark CSV (first match is used)
    #[arg(long = "inputFileFilter", default_value = DEFAULT_INPUT_FILE_FILTER)]
    pub input_file_filter: String,

    /// Glob selecting auxiliary tag files (DICOM or text dumps)
    #[arg(long = "tagFileFilter", default_value = DEFAULT_TAG_FILE_FILTER)]
    pub tag_file_filter: String,

    /// Comma-separated tag names copied into each record's info
    #[arg(long = "addTags", default_value = DEFAULT_TAGS)]
    pub add_tags: String,

    /// Output file name without extension
    #[arg(long = "outputFileStem", default_value = DEFAULT_OUTPUT_FILE_STEM)]
    pub output_file_stem: String,

    /// How CSV keys are matched against auxiliary file paths
    #[arg(long = "matchMode", default_value = "substring")]
    pub match_mode: MatchModeArg,

    /// Field naming of the output document
    #[arg(long, default_value = "current")]
    pub layout: LayoutArg,

    /// Skip malformed CSV rows instead of stopping
    #[arg(long = "skipMalformedRows")]
    pub skip_malformed_rows: bool,

    /// Print the manual page and exit
    #[arg(long)]
    pub man: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Key matching mode
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MatchModeArg {
    /// Key appears anywhere in the path; last match wins
    Substring,
    /// Key equals a path component or file stem; smallest path wins
    Exact,
}

impl From<MatchModeArg> for MatchMode {
    fn from(arg: MatchModeArg) -> Self {
        match arg {
            MatchModeArg::Substring => MatchMode::Substring,
            MatchModeArg::Exact => MatchMode::Exact,
        }
    }
}

/// Output layout
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LayoutArg {
    /// drawXLine / measureXDist / origHeight with unit and info
    Current,
    /// drawLine / measureLine / originalHeight
    Legacy,
}

impl From<LayoutArg> for OutputLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Current => OutputLayout::Current,
            LayoutArg::Legacy => OutputLayout::Legacy,
        }
    }
}

impl Cli {
    /// Builds run options from the parsed arguments
    ///
    /// Returns `None` when a directory is missing, which only happens
    /// together with `--man`.
    pub fn to_options(&self) -> Option<ConvertOptions> {
        let input_dir = self.input_dir.clone()?;
        let output_dir = self.output_dir.clone()?;

        let row_policy = if self.skip_malformed_rows {
            RowPolicy::Skip
        } else {
            RowPolicy::Abort
        };

        Some(
            ConvertOptions::new(input_dir, output_dir)
                .with_input_file_filter(self.input_file_filter.as_str())
                .with_tag_file_filter(self.tag_file_filter.as_str())
                .with_tags_from_list(&self.add_tags)
                .with_output_file_stem(self.output_file_stem.as_str())
                .with_match_mode(self.match_mode.into())
                .with_layout(self.layout.into())
                .with_row_policy(row_policy),
        )
    }
}
