//! Tour payload decoding

use geo::geometry::Point;
use log::warn;
use serde::Deserialize;
use time::format_description::well_known;
use time::{Duration, OffsetDateTime};

use crate::generator::position::TourPosition;

#[derive(Debug, Deserialize)]
struct Payload {
    page: Page,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(rename = "_embedded")]
    embedded: PageEmbedded,
}

#[derive(Debug, Deserialize)]
struct PageEmbedded {
    tour: SourceTour,
}

#[derive(Debug, Deserialize)]
struct TourEmbedded {
    coordinates: Coordinates,
}

#[derive(Debug, Deserialize)]
struct Coordinates {
    items: Vec<RawCoordinate>,
}

/// Tour as found in the page payload
#[derive(Debug, Deserialize)]
pub struct SourceTour {
    #[serde(default)]
    pub name: String,
    /// Start of the tour, RFC3339
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "_embedded")]
    embedded: TourEmbedded,
}

/// Coordinate item of the tour
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawCoordinate {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub alt: Option<f64>,
    /// Milliseconds since the tour start
    #[serde(default)]
    pub t: Option<i64>,
}

impl SourceTour {
    /// Decode the extracted payload
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let payload: Payload = serde_json::from_str(json)?;

        Ok(payload.page.embedded.tour)
    }

    pub fn coordinates(&self) -> &[RawCoordinate] {
        &self.embedded.coordinates.items
    }

    /// Tour start, if the payload carries a valid one
    pub fn start(&self) -> Option<OffsetDateTime> {
        let date = self.date.as_deref()?;

        match OffsetDateTime::parse(date, &well_known::Rfc3339) {
            Ok(start) => Some(start),
            Err(e) => {
                warn!("Ignoring the tour date `{}`: {}", date, e);
                None
            }
        }
    }

    /// Positions in path order, not validated yet
    pub fn positions(&self) -> Vec<TourPosition> {
        let start = self.start();

        self.coordinates()
            .iter()
            .map(|item| {
                let mut pos = TourPosition::basic(Point::new(item.lng, item.lat));
                pos.elevation = item.alt;
                pos.time = match (start, item.t) {
                    (Some(start), Some(t)) => start.checked_add(Duration::milliseconds(t)),
                    _ => None,
                };
                pos
            })
            .collect()
    }
}
