use std::fmt;

/// How a CSV key is associated with an auxiliary file path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchMode {
    /// Key appears anywhere in the path string; the last match in
    /// enumeration order wins
    #[default]
    Substring,

    /// Key equals a path component or the file stem; the
    /// lexicographically smallest matching path wins
    Exact,
}

impl MatchMode {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            MatchMode::Substring => "substring",
            MatchMode::Exact => "exact",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// Field naming of the output document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputLayout {
    /// `drawXLine` / `measureXDist` / `origHeight`, with `unit` and `info`
    #[default]
    Current,

    /// `drawLine` / `measureLine` / `originalHeight`, without `unit` and `info`
    Legacy,
}

impl OutputLayout {
    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            OutputLayout::Current => "current",
            OutputLayout::Legacy => "legacy",
        }
    }

    pub fn draw_lines_field(&self) -> &'static str {
        match self {
            OutputLayout::Current => "drawXLine",
            OutputLayout::Legacy => "drawLine",
        }
    }

    pub fn measure_names_field(&self) -> &'static str {
        match self {
            OutputLayout::Current => "measureXDist",
            OutputLayout::Legacy => "measureLine",
        }
    }

    pub fn height_field(&self) -> &'static str {
        match self {
            OutputLayout::Current => "origHeight",
            OutputLayout::Legacy => "originalHeight",
        }
    }

    pub fn width_field(&self) -> &'static str {
        match self {
            OutputLayout::Current => "origWidth",
            OutputLayout::Legacy => "originalWidth",
        }
    }

    /// Whether `unit` and `info` are written
    pub fn has_metadata_fields(&self) -> bool {
        matches!(self, OutputLayout::Current)
    }
}

impl fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simple_name())
    }
}

/// What to do with a CSV row that cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowPolicy {
    /// Stop the run with an error
    #[default]
    Abort,

    /// Report a warning and continue with the next row
    Skip,
}

impl fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowPolicy::Abort => write!(f, "abort"),
            RowPolicy::Skip => write!(f, "skip"),
        }
    }
}
