//! Location models for geographic coordinates and resolved destinations

use serde::{Deserialize, Serialize};

use crate::WheelError;

/// Geographic coordinate in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, [-180, 180]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the valid ranges
    pub fn new(latitude: f64, longitude: f64) -> crate::Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(WheelError::validation(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(WheelError::validation(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Format as a coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A place name resolved from a coordinate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Place {
    /// State, province or city
    pub state: String,
    pub country: String,
}

impl Place {
    #[must_use]
    pub fn new(state: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            country: country.into(),
        }
    }

    /// Display string shown on the globe, `"state, country"`
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}, {}", self.state, self.country)
    }
}

/// The destination currently marked on the globe.
///
/// Replaced on every spin; never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HighlightedLocation {
    pub coordinate: Coordinate,
    pub address: String,
}

impl HighlightedLocation {
    #[must_use]
    pub fn new(coordinate: Coordinate, place: &Place) -> Self {
        Self {
            coordinate,
            address: place.address(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.5, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.1).is_err());
    }

    #[test]
    fn test_coordinate_rejects_nan() {
        let err = Coordinate::new(f64::NAN, 0.0).unwrap_err();
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_highlighted_address() {
        let coordinate = Coordinate::new(25.03, 121.56).unwrap();
        let place = Place::new("Taipei", "Taiwan");
        let location = HighlightedLocation::new(coordinate, &place);

        assert_eq!(location.address, "Taipei, Taiwan");
        assert_eq!(coordinate.format_coordinates(), "25.0300, 121.5600");
    }
}
