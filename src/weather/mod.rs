//! Weather proxy
//!
//! Serves the latest stored conditions for a city to the travel pages.

pub mod server;
pub mod store;

pub use server::{ProxyError, WeatherQuery, router, run, serve};
pub use store::{FjallWeatherStore, MemoryWeatherStore, WeatherStore};
