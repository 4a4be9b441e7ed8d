//! Weather records served by the weather proxy

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored weather record.
///
/// Attribute names follow the table's PascalCase layout. Attributes this
/// service doesn't know about are kept in `extra` and passed through as-is.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WeatherRecord {
    /// Partition key
    pub city: String,
    /// Recency attribute; the newest record per city wins
    pub timestamp: DateTime<Utc>,
    pub current_weather: CurrentWeather,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentWeather {
    /// Temperature in Celsius
    pub temp: f64,
    /// Human-readable description of weather conditions
    pub description: String,
}

/// Coarse condition used to pick a weather icon
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    Cloudy,
    Rainy,
    Snowy,
    Fair,
}

impl WeatherCondition {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Snowy => "snowy",
            WeatherCondition::Fair => "fair",
        }
    }

    #[must_use]
    pub fn from_description(description: &str) -> Self {
        let description = description.to_lowercase();
        if description.contains("cloud") {
            WeatherCondition::Cloudy
        } else if description.contains("rain") || description.contains("shower") {
            WeatherCondition::Rainy
        } else if description.contains("snow") {
            WeatherCondition::Snowy
        } else {
            WeatherCondition::Fair
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl WeatherRecord {
    #[must_use]
    pub fn new(city: impl Into<String>, timestamp: DateTime<Utc>, temp: f64, description: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            timestamp,
            current_weather: CurrentWeather {
                temp,
                description: description.into(),
            },
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_description(&self.current_weather.description)
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.current_weather.temp)
    }

    /// One-line report, e.g. `Taipei: 31.2°C, scattered clouds (cloudy)`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{}: {}, {} ({})",
            self.city,
            self.format_temperature(),
            self.current_weather.description,
            self.condition()
        )
    }
}
