use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};
use serde::Serialize;
use tracing::info;

use crate::entities::{prelude::*, weather_records};

/// A stored weather measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    pub id: i32,
    pub city_name: String,
    pub date: NaiveDate,
    pub temperature: f64,
}

impl From<weather_records::Model> for WeatherRecord {
    fn from(model: weather_records::Model) -> Self {
        Self {
            id: model.id,
            city_name: model.city_name,
            date: model.date,
            temperature: model.temperature,
        }
    }
}

/// Input for creating a record; the id is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewWeatherRecord {
    pub city_name: String,
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Repository for weather record operations
pub struct WeatherRepository {
    conn: DatabaseConnection,
}

impl WeatherRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// All records in storage order.
    pub async fn list_all(&self) -> Result<Vec<WeatherRecord>> {
        let rows = WeatherRecords::find()
            .order_by_asc(weather_records::Column::Id)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(WeatherRecord::from).collect())
    }

    pub async fn create(&self, record: &NewWeatherRecord) -> Result<WeatherRecord> {
        let active_model = weather_records::ActiveModel {
            city_name: Set(record.city_name.clone()),
            date: Set(record.date),
            temperature: Set(record.temperature),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!("Created weather record {} for {}", model.id, model.city_name);
        Ok(model.into())
    }

    /// Overwrites every mutable field. Returns `None` when the id is unknown.
    pub async fn update(&self, record: &WeatherRecord) -> Result<Option<WeatherRecord>> {
        let Some(existing) = WeatherRecords::find_by_id(record.id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: weather_records::ActiveModel = existing.into();
        active.city_name = Set(record.city_name.clone());
        active.date = Set(record.date);
        active.temperature = Set(record.temperature);

        let model = active.update(&self.conn).await?;
        Ok(Some(model.into()))
    }

    /// Returns `false` when the id is unknown.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = WeatherRecords::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(WeatherRecords::find().count(&self.conn).await?)
    }
}
