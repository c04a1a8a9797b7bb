pub mod resolver;
pub mod source;
pub mod tags;

pub use resolver::{find_match, AuxMetadata, MetadataResolver};
pub use source::{is_dicom_file, open_source, AuxFormat, DicomTags, MetadataSource, TextDump};
pub use tags::*;
