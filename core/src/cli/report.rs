use crate::api::RunSummary;
use crate::types::ConvertOptions;
use std::fmt;

/// Text report of a finished run
pub struct SummaryReport<'a> {
    summary: &'a RunSummary,
}

impl<'a> SummaryReport<'a> {
    /// Creates a new summary report
    pub fn new(summary: &'a RunSummary) -> Self {
        Self { summary }
    }
}

impl<'a> fmt::Display for SummaryReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(csv_path) = &self.summary.csv_path else {
            return write!(f, "No input CSV found, nothing converted");
        };

        writeln!(f, "Conversion Summary")?;
        writeln!(f, "==================")?;
        writeln!(f, "Input:          {}", csv_path.display())?;
        writeln!(
            f,
            "Output:         {}",
            self.summary
                .output_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        )?;
        writeln!(f, "Rows converted: {}", self.summary.rows_converted)?;
        writeln!(f, "Rows skipped:   {}", self.summary.rows_skipped)?;
        write!(f, "Records:        {}", self.summary.records_written)
    }
}

/// Effective run options, one per line
pub struct OptionsReport<'a> {
    options: &'a ConvertOptions,
}

impl<'a> OptionsReport<'a> {
    pub fn new(options: &'a ConvertOptions) -> Self {
        Self { options }
    }
}

impl<'a> fmt::Display for OptionsReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.options;
        writeln!(f, "{:>20}: {}", "inputdir", o.input_dir.display())?;
        writeln!(f, "{:>20}: {}", "outputdir", o.output_dir.display())?;
        writeln!(f, "{:>20}: {}", "inputFileFilter", o.input_file_filter)?;
        writeln!(f, "{:>20}: {}", "tagFileFilter", o.tag_file_filter)?;
        writeln!(f, "{:>20}: {}", "addTags", o.add_tags.join(","))?;
        writeln!(f, "{:>20}: {}", "outputFileStem", o.output_file_stem)?;
        writeln!(f, "{:>20}: {}", "matchMode", o.match_mode)?;
        writeln!(f, "{:>20}: {}", "layout", o.layout)?;
        write!(f, "{:>20}: {}", "malformedRows", o.row_policy)
    }
}

/// Banner logged at startup
pub const TITLE: &str = r#"
                 _____ _
                / __  (_)
  ___ _____   __`' / /'_ ___  ___  _ __
 / __/ __\ \ / /  / / | / __|/ _ \| '_ \
| (__\__ \\ V / ./ /__| \__ \ (_) | | | |
 \___|___/ \_/  \_____/ |___/\___/|_| |_|
                     _/ |
                    |__/
"#;

/// Manual page printed by `--man`
pub const MAN_PAGE: &str = r#"
    NAME

        csv2json

    SYNOPSIS

        csv2json                                                        \
            [-h] [--help]                                               \
            [--man]                                                     \
            [-v] [--verbose]                                            \
            [-V] [--version]                                            \
            [--inputFileFilter <glob>]                                  \
            [--tagFileFilter <glob>]                                    \
            [--addTags <tag>[,<tag>...]]                                \
            [--outputFileStem <stem>]                                   \
            [--matchMode substring|exact]                               \
            [--layout current|legacy]                                   \
            [--skipMalformedRows]                                       \
            <inputDir>                                                  \
            <outputDir>

    DESCRIPTION

        Converts the landmark CSV produced by an upstream inference step
        into a JSON document. Each CSV row holds a key followed by the
        x/y coordinates of six landmarks (femur heads, knees, ankles).
        Per-key image dimensions and tags are read from DICOM files or
        text tag dumps whose path contains the key.

    ARGS

        [--inputFileFilter <glob>]
        Glob selecting the CSV inside <inputDir>. Default: **/*.csv

        [--tagFileFilter <glob>]
        Glob selecting auxiliary tag files. Default: **/*.dcm

        [--addTags <tag>[,<tag>...]]
        Tags copied into each record's "info". Default: PatientID

        [--outputFileStem <stem>]
        Output file is <outputDir>/<stem>.json. Default: csv2jsonoutput

        [--matchMode substring|exact]
        substring: the key appears anywhere in the file path, last match
        wins. exact: the key equals a path component or file stem,
        smallest path wins. Default: substring

        [--layout current|legacy]
        Field naming of the output document. Default: current

        [--skipMalformedRows]
        Skip rows that do not hold a key and twelve numbers instead of
        stopping the conversion.
"#;
