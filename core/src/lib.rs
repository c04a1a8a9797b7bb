pub mod api;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod io;
pub mod observer;
pub mod record;
pub mod types;

pub use api::{convert, RunSummary};
pub use cli::report::{OptionsReport, SummaryReport};
pub use error::{Csv2JsonError, Result};
pub use extraction::{AuxMetadata, MetadataResolver, MetadataSource};
pub use io::{GlobPattern, LandmarkReader, OutputDocument};
pub use observer::{LogObserver, RecordingObserver, RunObserver};
pub use record::OutputRecord;
pub use types::*;
