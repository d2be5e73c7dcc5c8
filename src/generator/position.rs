//! Position definition

use geo::geometry::Point;
use time::OffsetDateTime;

use crate::error::ConversionError;

/// Position of a tour path
#[derive(Clone, Debug, PartialEq)]
pub struct TourPosition {
    /// x: longitude, y: latitude
    pub coordinates: Point,
    pub elevation: Option<f64>,
    pub time: Option<OffsetDateTime>,
}

impl TourPosition {
    pub fn basic(coordinates: Point) -> Self {
        Self {
            coordinates,
            elevation: None,
            time: None,
        }
    }

    pub fn lat(&self) -> f64 {
        self.coordinates.y()
    }

    pub fn lon(&self) -> f64 {
        self.coordinates.x()
    }

    /// Check the coordinate ranges, `index` is the position in the path
    pub fn validate(&self, index: usize) -> Result<(), ConversionError> {
        let (lat, lon) = (self.lat(), self.lon());

        if !(-90.0..=90.0).contains(&lat) {
            return Err(ConversionError::InvalidLatitude { index, lat, lon });
        }

        if !(-180.0..=180.0).contains(&lon) {
            return Err(ConversionError::InvalidLongitude { index, lat, lon });
        }

        Ok(())
    }
}
