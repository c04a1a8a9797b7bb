//! Auxiliary metadata sources
//!
//! An auxiliary file is either a line-oriented text dump of tag values or a
//! DICOM file. Both expose the same two lookups through [`MetadataSource`].

use crate::error::{Csv2JsonError, Result};
use crate::extraction::tags::{
    get_multi_float_value, get_string_value, resolve_tag, FIELD_OF_VIEW_DIMENSIONS,
};
use crate::types::Dimensions;
use dicom_object::{open_file, DefaultDicomObject};
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

/// Marker of the dimensions line in a text dump
const FIELD_OF_VIEW_MARKER: &str = "Field of View Dimension";

/// Per-image side information lookups
pub trait MetadataSource {
    /// Original image dimensions (height, width)
    fn dimensions(&self) -> Result<Dimensions>;

    /// Value of a named tag, or `None` when absent
    fn tag(&self, name: &str) -> Option<String>;
}

/// Kind of auxiliary file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuxFormat {
    TextDump,
    Dicom,
}

impl AuxFormat {
    /// Detects the format of a file
    ///
    /// `.dcm` / `.dicom` files (any case) and files carrying the DICOM
    /// preamble are DICOM; everything else is read as a text dump.
    pub fn detect(path: &Path) -> Self {
        let has_dicom_ext = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom"))
            .unwrap_or(false);

        if has_dicom_ext || is_dicom_file(path) {
            AuxFormat::Dicom
        } else {
            AuxFormat::TextDump
        }
    }
}

/// Opens an auxiliary file as a metadata source
pub fn open_source(path: &Path) -> Result<Box<dyn MetadataSource>> {
    match AuxFormat::detect(path) {
        AuxFormat::Dicom => Ok(Box::new(DicomTags::open(path)?)),
        AuxFormat::TextDump => Ok(Box::new(TextDump::open(path)?)),
    }
}

/// Checks if a file has a DICOM header
///
/// DICOM files have a 128-byte preamble followed by the 4-byte
/// "DICM" magic string.
pub fn is_dicom_file(path: &Path) -> bool {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return false,
    };

    let mut buffer = [0u8; 132];
    match file.read_exact(&mut buffer) {
        Ok(()) => &buffer[128..132] == b"DICM",
        Err(_) => false,
    }
}

/// DICOM file with structured tag/value pairs
pub struct DicomTags {
    dcm: DefaultDicomObject,
}

impl DicomTags {
    pub fn open(path: &Path) -> Result<Self> {
        let dcm = open_file(path)?;
        Ok(Self { dcm })
    }

    pub fn from_object(dcm: DefaultDicomObject) -> Self {
        Self { dcm }
    }
}

impl MetadataSource for DicomTags {
    fn dimensions(&self) -> Result<Dimensions> {
        let values = get_multi_float_value(&self.dcm, FIELD_OF_VIEW_DIMENSIONS)
            .ok_or_else(|| Csv2JsonError::TagNotFound("FieldOfViewDimensions".to_string()))?;

        match values.as_slice() {
            [height, width, ..] => Ok(Dimensions::new(*height, *width)),
            _ => Err(Csv2JsonError::InvalidValue(format!(
                "FieldOfViewDimensions has {} value(s), expected 2",
                values.len()
            ))),
        }
    }

    fn tag(&self, name: &str) -> Option<String> {
        let tag = resolve_tag(name)?;
        get_string_value(&self.dcm, tag)
    }
}

/// Line-oriented text dump of tag values
///
/// Lines look like `(0010, 0020) Patient ID    LO: 'P001'` or
/// `Patient ID: P001`.
#[derive(Debug, Clone, Default)]
pub struct TextDump {
    lines: Vec<String>,
}

impl TextDump {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }
}

impl MetadataSource for TextDump {
    fn dimensions(&self) -> Result<Dimensions> {
        let line = self
            .lines
            .iter()
            .find(|line| line.contains(FIELD_OF_VIEW_MARKER))
            .ok_or_else(|| Csv2JsonError::TagNotFound(FIELD_OF_VIEW_MARKER.to_string()))?;

        let value = value_after_colon(line).ok_or_else(|| {
            Csv2JsonError::InvalidValue(format!("no value on line '{}'", line.trim()))
        })?;

        Dimensions::from_field_of_view(value).map_err(Csv2JsonError::InvalidValue)
    }

    fn tag(&self, name: &str) -> Option<String> {
        let wanted = squash(name);
        if wanted.is_empty() {
            return None;
        }

        self.lines.iter().find_map(|line| {
            let (label, value) = line.split_once(':')?;
            label_matches(label, &wanted).then(|| clean_value(value).to_string())
        })
    }
}

/// Compares a dump label against a squashed tag name
///
/// The label may start with a `(gggg, eeee)` group and end with a VR token.
fn label_matches(label: &str, wanted: &str) -> bool {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| {
        Regex::new(r"^\s*\([0-9A-Fa-f]{4},\s*[0-9A-Fa-f]{4}\)").expect("Failed to compile regex")
    });
    let label = re.replace(label, "");

    if squash(&label).eq_ignore_ascii_case(wanted) {
        return true;
    }

    let mut words: Vec<&str> = label.split_whitespace().collect();
    match words.pop() {
        Some(vr) if !words.is_empty() && is_vr(vr) => words.concat().eq_ignore_ascii_case(wanted),
        _ => false,
    }
}

fn is_vr(token: &str) -> bool {
    token.len() == 2 && token.chars().all(|c| c.is_ascii_uppercase())
}

fn value_after_colon(line: &str) -> Option<&str> {
    line.split_once(':').map(|(_, value)| value)
}

/// Trims whitespace and one pair of surrounding quotes
fn clean_value(value: &str) -> &str {
    let value = value.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

fn squash(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
