//! Core type definitions for landmark conversion
//!
//! This module provides the fundamental types used throughout the csv2json library:
//! - [`Landmark`], [`LandmarkPoint`], [`LandmarkRow`]: Parsed CSV coordinates
//! - [`Segment`]: Fixed connecting lines between landmarks
//! - [`Dimensions`]: Original image height and width
//! - [`MatchMode`], [`OutputLayout`], [`RowPolicy`]: Run behavior switches
//! - [`ConvertOptions`]: Configuration for one conversion run

mod dimensions;
mod enums;
mod landmark;
mod options;
mod segment;

pub use dimensions::Dimensions;
pub use enums::{MatchMode, OutputLayout, RowPolicy};
pub use landmark::{Landmark, LandmarkPoint, LandmarkRow, ROW_WIDTH};
pub use options::{
    parse_tag_list, ConvertOptions, DEFAULT_INPUT_FILE_FILTER, DEFAULT_OUTPUT_FILE_STEM,
    DEFAULT_TAGS, DEFAULT_TAG_FILE_FILTER,
};
pub use segment::Segment;
