//! `EarthWheel` - spin the globe, land somewhere, go there
//!
//! This library provides the destination picker behind the Earth wheel
//! (spin timing, region sampling, reverse geocoding with fallbacks, globe
//! and marker geometry) and the weather proxy used by the travel pages.

pub mod config;
pub mod error;
pub mod geocoding;
pub mod globe;
pub mod logging;
pub mod models;
pub mod share;
pub mod spin;
pub mod weather;

// Re-export core types for public API
pub use config::WheelConfig;
pub use error::WheelError;
pub use geocoding::{NominatimGeocoder, OfflineGeocoder, ReverseGeocoder};
pub use globe::{Globe, Marker, Scene, SceneHandle, StarField};
pub use models::{Coordinate, HighlightedLocation, Place, Region, WeatherRecord};
pub use share::{ShareAction, ShareTarget, share_action};
pub use spin::{DestinationResolver, SpinController, SpinOutcome};
pub use weather::{FjallWeatherStore, MemoryWeatherStore, WeatherStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WheelError>;
