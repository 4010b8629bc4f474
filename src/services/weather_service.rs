//! Domain service for weather record CRUD.

use thiserror::Error;

use crate::db::{NewWeatherRecord, WeatherRecord};

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather record {0} not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for WeatherError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for weather records.
#[async_trait::async_trait]
pub trait WeatherService: Send + Sync {
    /// All records in storage order.
    async fn list(&self) -> Result<Vec<WeatherRecord>, WeatherError>;

    /// Persists a new record and returns it with its assigned id.
    async fn create(&self, record: NewWeatherRecord) -> Result<WeatherRecord, WeatherError>;

    /// Overwrites every mutable field of an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::NotFound`] when the id is unknown.
    async fn update(&self, record: WeatherRecord) -> Result<WeatherRecord, WeatherError>;

    /// Removes a record.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherError::NotFound`] when the id is unknown.
    async fn delete(&self, id: i32) -> Result<(), WeatherError>;
}
