use axum::{
    Json, Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::TokenSigner;
use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, SeaOrmAuthService, SeaOrmWeatherService, WeatherService};

pub mod auth;
mod error;
mod validation;
pub mod weather;

pub use error::{ApiError, ApiJson};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,

    auth_service: Arc<dyn AuthService>,

    weather_service: Arc<dyn WeatherService>,
}

impl AppState {
    #[must_use]
    pub fn auth(&self) -> &Arc<dyn AuthService> {
        &self.auth_service
    }

    #[must_use]
    pub fn weather(&self) -> &Arc<dyn WeatherService> {
        &self.weather_service
    }
}

pub async fn create_app_state(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let signer = TokenSigner::from_config(&config.security)?;

    let auth_service: Arc<dyn AuthService> =
        Arc::new(SeaOrmAuthService::new(store.clone(), signer));
    let weather_service: Arc<dyn WeatherService> =
        Arc::new(SeaOrmWeatherService::new(store.clone()));

    Ok(Arc::new(AppState {
        config: Arc::new(config),
        store,
        auth_service,
        weather_service,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let protected_routes = Router::new()
        .route("/weather", post(weather::create_record))
        .route("/weather", put(weather::update_record))
        .route("/weather/{id}", delete(weather::delete_record))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/", get(service_info))
        .route("/login", post(auth::login))
        .route("/weather", get(weather::list_records))
        .merge(protected_routes)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /
async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Weather records API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
