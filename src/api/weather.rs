use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

use crate::db::{NewWeatherRecord, WeatherRecord};
use crate::services::AuthenticatedUser;

use super::{ApiError, ApiJson, AppState, validation};

#[derive(Deserialize)]
pub struct CreateWeatherRequest {
    pub city_name: String,
    pub date: NaiveDate,
    pub temperature: f64,
}

#[derive(Deserialize)]
pub struct UpdateWeatherRequest {
    pub id: i32,
    pub city_name: String,
    pub date: NaiveDate,
    pub temperature: f64,
}

/// GET /weather
/// All records, oldest id first. No authentication required.
pub async fn list_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WeatherRecord>>, ApiError> {
    let records = state.weather().list().await?;
    Ok(Json(records))
}

/// POST /weather
/// Create a record; the id is assigned by storage.
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<CreateWeatherRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let city_name = validation::validate_city_name(&payload.city_name)?.to_string();
    let temperature = validation::validate_temperature(payload.temperature)?;

    let record = state
        .weather()
        .create(NewWeatherRecord {
            city_name,
            date: payload.date,
            temperature,
        })
        .await?;

    tracing::info!("Record {} created by {}", record.id, user.username);

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /weather
/// Full-record update; the id comes from the body.
pub async fn update_record(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(payload): ApiJson<UpdateWeatherRequest>,
) -> Result<Json<WeatherRecord>, ApiError> {
    let id = validation::validate_record_id(payload.id)?;
    let city_name = validation::validate_city_name(&payload.city_name)?.to_string();
    let temperature = validation::validate_temperature(payload.temperature)?;

    let record = state
        .weather()
        .update(WeatherRecord {
            id,
            city_name,
            date: payload.date,
            temperature,
        })
        .await?;

    tracing::info!("Record {} updated by {}", record.id, user.username);

    Ok(Json(record))
}

/// DELETE /weather/{id}
pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validation::validate_record_id(id)?;

    state.weather().delete(id).await?;

    tracing::info!("Record {} deleted by {}", id, user.username);

    Ok(StatusCode::NO_CONTENT)
}
