//! File discovery, CSV input and JSON output

pub mod discovery;
pub mod document;
pub mod reader;

pub use discovery::{find_files, GlobPattern};
pub use document::OutputDocument;
pub use reader::LandmarkReader;
