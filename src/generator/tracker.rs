//! Track generator API

use geo::{HaversineLength, LineString};
use gpx::{Link, Track, TrackSegment, Waypoint};
use log::info;

use super::position::TourPosition;
use crate::error::ConversionError;

pub struct Tracker {
    /// Tour name
    pub name: String,
    /// Tour page, written as track link
    pub link: Option<String>,
}

impl Tracker {
    /// Start a new tracker instance
    pub fn new(name: String) -> Self {
        Self { name, link: None }
    }

    pub fn link(&mut self, href: String) -> &mut Self {
        self.link = Some(href);

        self
    }

    /// Build a single segment track, keeping the path order
    ///
    /// Fails on an empty path or on the first out of range position.
    pub fn build(&self, positions: &[TourPosition]) -> Result<Track, ConversionError> {
        if positions.is_empty() {
            return Err(ConversionError::NoCoordinates);
        }

        let mut track = Track::new();
        track.name = Some(self.name.clone());

        if let Some(href) = &self.link {
            track.links.push(Link {
                href: href.clone(),
                ..Default::default()
            });
        }

        let mut segment = TrackSegment::new();

        for (index, poi) in positions.iter().enumerate() {
            poi.validate(index)?;

            let mut wp = Waypoint::new(poi.coordinates);
            wp.elevation = poi.elevation;
            wp.time = poi.time.map(|t| t.into());

            segment.points.push(wp);
        }

        let path: LineString = positions.iter().map(|p| p.coordinates).collect();
        info!(
            "Track `{}` has {} points over {:.2} km",
            self.name,
            positions.len(),
            path.haversine_length() / 1000.0
        );

        track.segments.push(segment);

        Ok(track)
    }
}
