//! `SeaORM` implementation of the `WeatherService` trait.

use async_trait::async_trait;

use crate::db::{NewWeatherRecord, Store, WeatherRecord};
use crate::services::weather_service::{WeatherError, WeatherService};

pub struct SeaOrmWeatherService {
    store: Store,
}

impl SeaOrmWeatherService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WeatherService for SeaOrmWeatherService {
    async fn list(&self) -> Result<Vec<WeatherRecord>, WeatherError> {
        Ok(self.store.list_weather_records().await?)
    }

    async fn create(&self, record: NewWeatherRecord) -> Result<WeatherRecord, WeatherError> {
        Ok(self.store.create_weather_record(&record).await?)
    }

    async fn update(&self, record: WeatherRecord) -> Result<WeatherRecord, WeatherError> {
        self.store
            .update_weather_record(&record)
            .await?
            .ok_or(WeatherError::NotFound(record.id))
    }

    async fn delete(&self, id: i32) -> Result<(), WeatherError> {
        if self.store.delete_weather_record(id).await? {
            Ok(())
        } else {
            Err(WeatherError::NotFound(id))
        }
    }
}
