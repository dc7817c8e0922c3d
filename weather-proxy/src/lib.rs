pub mod aggregator;
pub mod api_client;
pub mod config;
pub mod handlers;
pub mod openapi;
pub mod weather;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use common::errors::AppError;

use crate::aggregator::ForecastAggregator;
use crate::api_client::OpenWeatherClient;
use crate::config::Config;
use crate::handlers::AppState;
use crate::weather::WeatherService;

/// Wires the upstream client and aggregator from configuration.
pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let client = OpenWeatherClient::new(config)?;
    let aggregator = ForecastAggregator::new(config.trailing_day);

    Ok(AppState {
        weather: Arc::new(WeatherService::new(client, aggregator)),
    })
}

/// JSON API routes plus the static front end as fallback.
pub fn app(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/weather/{city}", get(handlers::get_weather))
        .route(
            "/weather/coords/{lat}/{lon}",
            get(handlers::get_weather_by_coordinates),
        )
        .merge(openapi::swagger_ui())
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
