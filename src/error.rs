//! Errors of each conversion stage

use std::fmt;
use std::io;

use gpx::errors::GpxError;
use thiserror::Error;

/// Failure of a single HTTP attempt
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error("error creating request: {0}")]
    Request(#[source] reqwest::Error),
    #[error("error making request: {0}")]
    Send(#[source] reqwest::Error),
    #[error("unexpected status code: {0}")]
    Status(u16),
    #[error("error reading response body: {0}")]
    Body(#[source] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("all {attempts} retry attempts failed: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: AttemptError,
    },
    #[error("deadline exceeded after {attempts} attempt(s){}", last_cause(.last))]
    DeadlineExceeded {
        attempts: u32,
        #[source]
        last: Option<AttemptError>,
    },
}

fn last_cause(last: &Option<AttemptError>) -> String {
    match last {
        Some(e) => format!(", last error: {}", e),
        None => String::new(),
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("start marker not found")]
    StartMarkerNotFound,
    #[error("end marker not found")]
    EndMarkerNotFound,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("no coordinates found in tour data")]
    NoCoordinates,
    #[error("invalid point data at index {index}: invalid latitude: {lat} (lon {lon})")]
    InvalidLatitude { index: usize, lat: f64, lon: f64 },
    #[error("invalid point data at index {index}: invalid longitude: {lon} (lat {lat})")]
    InvalidLongitude { index: usize, lat: f64, lon: f64 },
}

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("error creating file: {0}")]
    Create(#[source] io::Error),
    #[error("error writing file: {0}")]
    Write(#[source] io::Error),
    #[error("error encoding GPX: {0}")]
    Encode(#[source] GpxError),
}

/// Pipeline stage, used to report where the deadline ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Extract,
    Parse,
    Convert,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Extract => "extract",
            Stage::Parse => "parse",
            Stage::Convert => "convert",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Error returned by [`crate::Converter::convert`]
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to download tour data: {0}")]
    Fetch(#[from] FetchError),
    #[error("failed to extract JSON data: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("failed to parse JSON data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to convert to GPX: {0}")]
    Conversion(#[from] ConversionError),
    #[error("failed to write GPX file: {0}")]
    Write(#[from] WriteError),
    #[error("deadline exceeded before the {0} stage")]
    DeadlineExceeded(Stage),
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::Fetch(_) => Stage::Fetch,
            Error::Extraction(_) => Stage::Extract,
            Error::Parse(_) => Stage::Parse,
            Error::Conversion(_) => Stage::Convert,
            Error::Write(_) => Stage::Write,
            Error::DeadlineExceeded(stage) => *stage,
        }
    }
}
