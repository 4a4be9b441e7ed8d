//! Destination resolution
//!
//! Samples a coordinate inside the selected region and asks the reverse
//! geocoder for a place name. The lookup races a timeout; any failure is
//! absorbed by the region's fallback table, so a destination is always
//! produced.

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{debug, instrument, warn};

use crate::geocoding::ReverseGeocoder;
use crate::models::{Coordinate, Place, Region};

/// Where the wheel landed
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub coordinate: Coordinate,
    pub place: Place,
    /// True when the place came from the region's fallback table
    pub from_fallback: bool,
}

pub struct DestinationResolver {
    geocoder: Arc<dyn ReverseGeocoder>,
    timeout: Duration,
}

impl DestinationResolver {
    #[must_use]
    pub fn new(geocoder: Arc<dyn ReverseGeocoder>, timeout: Duration) -> Self {
        Self { geocoder, timeout }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Pick a destination in `region`. Never fails.
    #[instrument(skip(self))]
    pub async fn resolve(&self, region: Region) -> Destination {
        let coordinate = region.random_coordinate(&mut rand::rng());
        debug!("Sampled {} in {}", coordinate.format_coordinates(), region);

        match self.lookup(region, coordinate).await {
            Some(place) => Destination {
                coordinate,
                place,
                from_fallback: false,
            },
            None => {
                let place = region.random_fallback(&mut rand::rng());
                warn!("Using fallback destination {}", place.address());
                Destination {
                    coordinate,
                    place,
                    from_fallback: true,
                }
            }
        }
    }

    /// One geocoding attempt. A lookup that outlives the timeout keeps
    /// running detached and its answer is dropped.
    async fn lookup(&self, region: Region, coordinate: Coordinate) -> Option<Place> {
        let geocoder = Arc::clone(&self.geocoder);
        let request = tokio::spawn(async move { geocoder.reverse(coordinate).await });

        match time::timeout(self.timeout, request).await {
            Ok(Ok(Ok(place))) if region.accepts_country(&place.country) => Some(place),
            Ok(Ok(Ok(place))) => {
                warn!("{} is outside {}", place.address(), region);
                None
            }
            Ok(Ok(Err(e))) => {
                warn!("Reverse geocoding failed: {}", e);
                None
            }
            Ok(Err(e)) => {
                warn!("Reverse geocoding task failed: {}", e);
                None
            }
            Err(_) => {
                warn!("Reverse geocoding timed out after {:?}", self.timeout);
                None
            }
        }
    }
}
