//! Weather table access
//!
//! Records are keyed by city and timestamp. The proxy only ever reads the
//! newest record of a city; writes exist for seeding the table.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fjall::Keyspace;
use tokio::sync::RwLock;
use tokio::task;
use tracing::debug;

use crate::models::WeatherRecord;
use crate::{Result, WheelError};

#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Newest record for exactly `city`, if any
    async fn latest(&self, city: &str) -> Result<Option<WeatherRecord>>;

    /// Add a record. A record with the same city and timestamp is replaced.
    async fn put(&self, record: WeatherRecord) -> Result<()>;
}

/// Separates the city from the timestamp in a record key
const KEY_SEPARATOR: u8 = 0x00;

fn check_city(city: &str) -> Result<()> {
    if city.as_bytes().contains(&KEY_SEPARATOR) {
        return Err(WheelError::validation("City names cannot contain NUL bytes"));
    }
    Ok(())
}

/// `city ‖ 0x00`, the prefix shared by every record of a city
fn city_prefix(city: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(city.len() + 1);
    prefix.extend_from_slice(city.as_bytes());
    prefix.push(KEY_SEPARATOR);
    prefix
}

/// `city ‖ 0x00 ‖ timestamp`, with the timestamp encoded so byte order is time order
fn record_key(city: &str, timestamp: DateTime<Utc>) -> Vec<u8> {
    let micros = timestamp.timestamp_micros() as u64 ^ (1 << 63);
    let mut key = city_prefix(city);
    key.extend_from_slice(&micros.to_be_bytes());
    key
}

/// Weather table persisted in a fjall keyspace, one entry per record
pub struct FjallWeatherStore {
    store: Keyspace,
}

fn read_latest(store: Keyspace, prefix: Vec<u8>) -> Result<Option<WeatherRecord>> {
    let Some(item) = store.prefix(prefix).next_back() else {
        return Ok(None);
    };
    let bytes = item.value()?;
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| WheelError::store(format!("Corrupt weather record: {e}")))
}

impl FjallWeatherStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        std::fs::create_dir_all(&path)?;
        let db = fjall::Database::builder(&path).open()?;
        let store = db.keyspace("weather", fjall::KeyspaceCreateOptions::default)?;
        Ok(Self { store })
    }
}

#[async_trait]
impl WeatherStore for FjallWeatherStore {
    #[tracing::instrument(name = "query_weather", level = "debug", skip(self))]
    async fn latest(&self, city: &str) -> Result<Option<WeatherRecord>> {
        if check_city(city).is_err() {
            return Ok(None);
        }
        let store = self.store.clone();
        let prefix = city_prefix(city);

        let record = task::spawn_blocking(move || read_latest(store, prefix))
            .await
            .map_err(|e| WheelError::store(e.to_string()))??;

        debug!("Record found: {}", record.is_some());
        Ok(record)
    }

    #[tracing::instrument(name = "put_weather", level = "debug", skip(self, record), fields(city = %record.city))]
    async fn put(&self, record: WeatherRecord) -> Result<()> {
        check_city(&record.city)?;
        let store = self.store.clone();
        let key = record_key(&record.city, record.timestamp);
        let bytes = serde_json::to_vec(&record)
            .map_err(|e| WheelError::store(format!("Failed to encode record: {e}")))?;

        task::spawn_blocking(move || store.insert(key, bytes))
            .await
            .map_err(|e| WheelError::store(e.to_string()))??;
        Ok(())
    }
}

/// In-process weather table
#[derive(Default)]
pub struct MemoryWeatherStore {
    cities: RwLock<HashMap<String, BTreeMap<DateTime<Utc>, WeatherRecord>>>,
}

impl MemoryWeatherStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WeatherStore for MemoryWeatherStore {
    async fn latest(&self, city: &str) -> Result<Option<WeatherRecord>> {
        let cities = self.cities.read().await;
        Ok(cities
            .get(city)
            .and_then(|records| records.last_key_value())
            .map(|(_, record)| record.clone()))
    }

    async fn put(&self, record: WeatherRecord) -> Result<()> {
        check_city(&record.city)?;
        let mut cities = self.cities.write().await;
        cities
            .entry(record.city.clone())
            .or_default()
            .insert(record.timestamp, record);
        Ok(())
    }
}
