//! Regions bias where the wheel lands.
//!
//! Each region carries an approximate bounding box used for sampling, the
//! countries a reverse-geocoded result must belong to, and a table of
//! well-known destinations used when geocoding does not produce one.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use rand::RngExt;
use serde::{Deserialize, Serialize};

use super::{Coordinate, Place};
use crate::WheelError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    #[default]
    Global,
    Asia,
    Europe,
    NorthAmerica,
    SouthAmerica,
    Africa,
    Oceania,
}

/// Latitude/longitude sampling box, half-open on the upper end
#[derive(Debug, Clone, PartialEq)]
pub struct RegionBounds {
    pub latitude: Range<f64>,
    pub longitude: Range<f64>,
}

impl RegionBounds {
    #[must_use]
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.latitude.contains(&coordinate.latitude) && self.longitude.contains(&coordinate.longitude)
    }
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Global,
        Region::Asia,
        Region::Europe,
        Region::NorthAmerica,
        Region::SouthAmerica,
        Region::Africa,
        Region::Oceania,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Region::Global => "global",
            Region::Asia => "asia",
            Region::Europe => "europe",
            Region::NorthAmerica => "north-america",
            Region::SouthAmerica => "south-america",
            Region::Africa => "africa",
            Region::Oceania => "oceania",
        }
    }

    #[must_use]
    pub fn bounds(self) -> RegionBounds {
        let (latitude, longitude) = match self {
            Region::Global => (-90.0..90.0, -180.0..180.0),
            Region::Asia => (-10.0..65.0, 30.0..130.0),
            Region::Europe => (35.0..70.0, -10.0..50.0),
            Region::NorthAmerica => (15.0..75.0, -170.0..-30.0),
            Region::SouthAmerica => (-55.0..5.0, -80.0..0.0),
            Region::Africa => (-35.0..35.0, -20.0..50.0),
            Region::Oceania => (-45.0..5.0, 110.0..175.0),
        };
        RegionBounds {
            latitude,
            longitude,
        }
    }

    /// Sample a coordinate uniformly inside the region's box
    pub fn random_coordinate<R: RngExt + ?Sized>(self, rng: &mut R) -> Coordinate {
        let bounds = self.bounds();
        Coordinate {
            latitude: rng.random_range(bounds.latitude),
            longitude: rng.random_range(bounds.longitude),
        }
    }

    /// Countries a geocoded result must belong to. `None` accepts any country.
    #[must_use]
    pub fn allowed_countries(self) -> Option<&'static [&'static str]> {
        match self {
            Region::Global => None,
            Region::Asia => Some(&[
                "China",
                "Japan",
                "South Korea",
                "India",
                "Thailand",
                "Vietnam",
                "Indonesia",
                "Malaysia",
                "Singapore",
                "Philippines",
            ]),
            Region::Europe => Some(&[
                "France",
                "Germany",
                "United Kingdom",
                "Italy",
                "Spain",
                "Netherlands",
                "Belgium",
                "Switzerland",
                "Austria",
                "Sweden",
            ]),
            Region::NorthAmerica => Some(&["United States", "Canada", "Mexico"]),
            Region::SouthAmerica => Some(&["Brazil", "Argentina", "Chile", "Colombia", "Peru"]),
            Region::Africa => Some(&["Egypt", "South Africa", "Kenya", "Nigeria", "Morocco"]),
            Region::Oceania => Some(&["Australia", "New Zealand", "Fiji", "Papua New Guinea"]),
        }
    }

    #[must_use]
    pub fn accepts_country(self, country: &str) -> bool {
        self.allowed_countries()
            .is_none_or(|countries| countries.contains(&country))
    }

    /// Well-known `(state, country)` destinations for this region
    #[must_use]
    pub fn fallback_destinations(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Region::Global => &[
                ("New York", "United States"),
                ("Beijing", "China"),
                ("London", "United Kingdom"),
                ("Tokyo", "Japan"),
                ("São Paulo", "Brazil"),
            ],
            Region::Asia => &[
                ("Beijing", "China"),
                ("Tokyo", "Japan"),
                ("Seoul", "South Korea"),
                ("New Delhi", "India"),
                ("Bangkok", "Thailand"),
            ],
            Region::Europe => &[
                ("Paris", "France"),
                ("Berlin", "Germany"),
                ("London", "United Kingdom"),
                ("Rome", "Italy"),
                ("Madrid", "Spain"),
            ],
            Region::NorthAmerica => &[
                ("New York", "United States"),
                ("Toronto", "Canada"),
                ("Mexico City", "Mexico"),
            ],
            Region::SouthAmerica => &[
                ("São Paulo", "Brazil"),
                ("Buenos Aires", "Argentina"),
                ("Santiago", "Chile"),
            ],
            Region::Africa => &[
                ("Cairo", "Egypt"),
                ("Johannesburg", "South Africa"),
                ("Nairobi", "Kenya"),
            ],
            Region::Oceania => &[("Sydney", "Australia"), ("Auckland", "New Zealand")],
        }
    }

    /// Pick a fallback destination uniformly at random
    pub fn random_fallback<R: RngExt + ?Sized>(self, rng: &mut R) -> Place {
        let destinations = self.fallback_destinations();
        let (state, country) = destinations[rng.random_range(0..destinations.len())];
        Place::new(state, country)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = WheelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Region::ALL
            .into_iter()
            .find(|region| region.name() == normalized)
            .ok_or_else(|| {
                WheelError::validation(format!(
                    "Unknown region '{s}'. Must be one of: {}",
                    Region::ALL.map(Region::name).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    #[rstest]
    #[case(Region::Global)]
    #[case(Region::Asia)]
    #[case(Region::Europe)]
    #[case(Region::NorthAmerica)]
    #[case(Region::SouthAmerica)]
    #[case(Region::Africa)]
    #[case(Region::Oceania)]
    fn test_random_coordinates_stay_in_bounds(#[case] region: Region) {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = region.bounds();
        for _ in 0..2_000 {
            let coordinate = region.random_coordinate(&mut rng);
            assert!(
                bounds.contains(&coordinate),
                "{region}: {coordinate:?} outside {bounds:?}"
            );
            assert!(Coordinate::new(coordinate.latitude, coordinate.longitude).is_ok());
        }
    }

    #[test]
    fn test_fallback_tables_are_consistent() {
        for region in Region::ALL {
            let destinations = region.fallback_destinations();
            assert!(!destinations.is_empty(), "{region} has no fallbacks");
            for (_, country) in destinations {
                assert!(region.accepts_country(country), "{region} rejects {country}");
            }
        }
    }

    #[test]
    fn test_random_fallback_is_from_table() {
        let mut rng = StdRng::seed_from_u64(42);
        for region in Region::ALL {
            for _ in 0..50 {
                let place = region.random_fallback(&mut rng);
                assert!(
                    region
                        .fallback_destinations()
                        .contains(&(place.state.as_str(), place.country.as_str()))
                );
            }
        }
    }

    #[test]
    fn test_country_allow_list() {
        assert!(Region::Global.accepts_country("Atlantis"));
        assert!(Region::Europe.accepts_country("Austria"));
        assert!(!Region::Europe.accepts_country("Japan"));
        assert!(!Region::Oceania.accepts_country(""));
    }

    #[rstest]
    #[case("global", Region::Global)]
    #[case("North-America", Region::NorthAmerica)]
    #[case("south_america", Region::SouthAmerica)]
    #[case(" oceania ", Region::Oceania)]
    fn test_region_parsing(#[case] input: &str, #[case] expected: Region) {
        assert_eq!(input.parse::<Region>().unwrap(), expected);
    }

    #[test]
    fn test_region_parsing_rejects_unknown() {
        let err = "antarctica".parse::<Region>().unwrap_err();
        assert!(err.to_string().contains("Unknown region"));
    }

    #[test]
    fn test_region_serde_names() {
        let json = serde_json::to_string(&Region::NorthAmerica).unwrap();
        assert_eq!(json, "\"north-america\"");
        for region in Region::ALL {
            let json = serde_json::to_string(&region).unwrap();
            assert_eq!(json.trim_matches('"'), region.name());
        }
    }
}
