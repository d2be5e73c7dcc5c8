//! tour2gpx - GPX generator from tour pages
//!
//! The page is downloaded, the JSON payload embedded in it is extracted and
//! its coordinates are written as a single track GPX file.

mod config;
mod converter;
mod error;
mod generator;
pub mod sources;

pub use config::{Configuration, Deadline};
pub use converter::Converter;
pub use error::{AttemptError, ConversionError, Error, ExtractionError, FetchError, Stage, WriteError};
pub use generator::gpx::GpxGenerator;
pub use generator::position::TourPosition;
pub use generator::tracker::Tracker;
