use std::fmt;

/// Original image dimensions (height, width) in pixels
///
/// Values are kept as read from the auxiliary source and truncated
/// toward zero when written to the output document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
}

impl Dimensions {
    pub fn new(height: f64, width: f64) -> Self {
        Self { height, width }
    }

    /// Parses a Field of View Dimension(s) value from a tag dump
    ///
    /// Brackets, quotes and spaces are ignored; the two numbers are
    /// separated by `,` or `\`, e.g. `[430, 350]`, `['430', '350']` or
    /// `430\350`.
    pub fn from_field_of_view(value: &str) -> Result<Self, String> {
        let cleaned: String = value
            .chars()
            .filter(|c| !matches!(c, '[' | ']' | '\'' | '"') && !c.is_whitespace())
            .collect();

        let parts: Vec<&str> = cleaned.split([',', '\\']).collect();
        let [height, width] = parts.as_slice() else {
            return Err(format!(
                "expected two values in field of view '{}', found {}",
                value.trim(),
                parts.iter().filter(|p| !p.is_empty()).count()
            ));
        };

        Ok(Self::new(parse_extent(height)?, parse_extent(width)?))
    }

    /// Height and width truncated toward zero
    pub fn truncated(&self) -> (i64, i64) {
        (self.height.trunc() as i64, self.width.trunc() as i64)
    }
}

fn parse_extent(text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("'{}' is not a valid dimension", text))
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.height, self.width)
    }
}
