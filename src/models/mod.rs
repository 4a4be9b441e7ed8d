//! Data models for the Earth wheel
//!
//! This module contains the core domain models organized by concern:
//! - Location: geographic coordinates, resolved places and the highlighted destination
//! - Region: sampling boxes, country allow-lists and fallback destinations
//! - Weather: records served by the weather proxy

pub mod location;
pub mod region;
pub mod weather;

// Re-export all public types for convenient access
pub use location::{Coordinate, HighlightedLocation, Place};
pub use region::Region;
pub use weather::{CurrentWeather, WeatherCondition, WeatherRecord};
