//! Reverse geocoding
//!
//! Turns a sampled coordinate into a `"state, country"` place name via a
//! Nominatim-compatible service.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::models::{Coordinate, Place};
use crate::{Result, WheelError};

/// Resolves coordinates to place names
#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, coordinate: Coordinate) -> Result<Place>;
}

/// Nominatim reverse geocoding response
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<Address>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Address {
    country: Option<String>,
    state: Option<String>,
}

impl ReverseResponse {
    fn into_place(self) -> Result<Place> {
        if let Some(error) = self.error {
            return Err(WheelError::api(format!("Geocoding service error: {error}")));
        }
        let address = self
            .address
            .ok_or_else(|| WheelError::api("Geocoding response has no address"))?;
        match (address.state, address.country) {
            (Some(state), Some(country)) => Ok(Place::new(state, country)),
            _ => Err(WheelError::api("Geocoding response is missing state or country")),
        }
    }
}

/// Client for the OpenStreetMap Nominatim `/reverse` endpoint
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    /// Create a new client. Nominatim requires an identifying User-Agent.
    pub fn new(config: &GeocodingConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn reverse_url(&self, coordinate: Coordinate) -> String {
        format!(
            "{}/reverse?lat={}&lon={}&format=json&accept-language=en",
            self.base_url, coordinate.latitude, coordinate.longitude
        )
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    #[instrument(skip(self), fields(lat = coordinate.latitude, lon = coordinate.longitude))]
    async fn reverse(&self, coordinate: Coordinate) -> Result<Place> {
        let url = self.reverse_url(coordinate);
        debug!("Reverse geocoding request: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WheelError::api(format!(
                "Geocoding service returned {status}"
            )));
        }

        let body: ReverseResponse = response.json().await?;
        let place = body.into_place()?;
        debug!("Resolved {} to {}", coordinate.format_coordinates(), place.address());
        Ok(place)
    }
}

/// Geocoder that never resolves anything. Every spin falls back to the region table.
pub struct OfflineGeocoder;

#[async_trait]
impl ReverseGeocoder for OfflineGeocoder {
    async fn reverse(&self, _coordinate: Coordinate) -> Result<Place> {
        Err(WheelError::api("Reverse geocoding is disabled"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Place> {
        serde_json::from_str::<ReverseResponse>(json).unwrap().into_place()
    }

    #[test]
    fn test_response_with_state_and_country() {
        let place = parse(
            r#"{"place_id": 1, "address": {"state": "Bavaria", "country": "Germany", "country_code": "de"}}"#,
        )
        .unwrap();
        assert_eq!(place, Place::new("Bavaria", "Germany"));
    }

    #[test]
    fn test_response_missing_state() {
        let err = parse(r#"{"address": {"country": "Monaco"}}"#).unwrap_err();
        assert!(matches!(err, WheelError::Api { .. }));
    }

    #[test]
    fn test_response_over_ocean() {
        let err = parse(r#"{"error": "Unable to geocode"}"#).unwrap_err();
        assert!(err.to_string().contains("Unable to geocode"));
    }

    #[test]
    fn test_reverse_url() {
        let config = GeocodingConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..GeocodingConfig::default()
        };
        let geocoder = NominatimGeocoder::new(&config).unwrap();
        let url = geocoder.reverse_url(Coordinate {
            latitude: 48.5,
            longitude: 11.25,
        });
        assert_eq!(
            url,
            "http://localhost:8080/reverse?lat=48.5&lon=11.25&format=json&accept-language=en"
        );
    }

    #[tokio::test]
    async fn test_offline_geocoder_always_fails() {
        let result = OfflineGeocoder
            .reverse(Coordinate {
                latitude: 0.0,
                longitude: 0.0,
            })
            .await;
        assert!(result.is_err());
    }
}
