//! GPX generator API

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use gpx::{Gpx, GpxVersion, Metadata, Track};
use time::OffsetDateTime;

use crate::error::WriteError;

#[derive(Debug)]
pub struct GpxGenerator {
    /// Written as the `creator` attribute
    pub creator: String,
    /// Document name
    pub name: Option<String>,
    /// Document time
    pub time: Option<OffsetDateTime>,
    pub tracks: Vec<Track>,
}

impl GpxGenerator {
    pub fn empty(creator: String) -> Self {
        Self {
            creator,
            name: None,
            time: None,
            tracks: vec![],
        }
    }

    pub fn generate(&self) -> Gpx {
        let mut gpx: Gpx = Default::default();
        gpx.version = GpxVersion::Gpx11;
        gpx.creator = Some(self.creator.clone());
        gpx.tracks = self.tracks.clone();

        if self.name.is_some() || self.time.is_some() {
            let mut metadata: Metadata = Default::default();
            metadata.name = self.name.clone();
            metadata.time = self.time.map(|t| t.into());
            gpx.metadata = Some(metadata);
        }

        gpx
    }

    /// Write the document to `sink`, XML declaration included
    pub fn write_to<W: Write>(&self, sink: W) -> Result<(), WriteError> {
        gpx::write(&self.generate(), sink).map_err(WriteError::Encode)
    }

    /// Create, or truncate, the file at `path` and write the document
    pub fn write(&self, path: &Path) -> Result<(), WriteError> {
        let file = File::create(path).map_err(WriteError::Create)?;

        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush().map_err(WriteError::Write)
    }
}
