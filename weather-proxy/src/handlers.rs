use axum::{
    extract::{Path, State},
    response::Json,
};
use common::errors::AppError;
use common::models::WeatherReport;
use std::sync::Arc;
use tracing::{info, warn};

use crate::weather::{Coordinates, WeatherService};

#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<WeatherService>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "weather-proxy" }))
}

#[utoipa::path(
    get,
    path = "/weather/{city}",
    params(
        ("city" = String, Path, description = "City name")
    ),
    responses(
        (status = 200, description = "Current conditions and forecast", body = WeatherReport),
        (status = 404, description = "City not found"),
        (status = 500, description = "Upstream failure")
    ),
    tag = "weather"
)]
pub async fn get_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<WeatherReport>, AppError> {
    info!(city = %city, "Weather request received");

    let report = state
        .weather
        .get_weather_by_place(&city)
        .await
        .inspect_err(|e| warn!(city = %city, error = %e, "Weather request failed"))?;

    Ok(Json(report))
}

#[utoipa::path(
    get,
    path = "/weather/coords/{lat}/{lon}",
    params(
        ("lat" = f64, Path, description = "Latitude in decimal degrees"),
        ("lon" = f64, Path, description = "Longitude in decimal degrees")
    ),
    responses(
        (status = 200, description = "Current conditions and forecast", body = WeatherReport),
        (status = 404, description = "Location not found or coordinates unusable"),
        (status = 500, description = "Upstream failure")
    ),
    tag = "weather"
)]
pub async fn get_weather_by_coordinates(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
) -> Result<Json<WeatherReport>, AppError> {
    info!(lat = %lat, lon = %lon, "Coordinate weather request received");

    let coordinates = Coordinates::parse(&lat, &lon)?;
    let report = state
        .weather
        .get_weather_by_coordinates(coordinates)
        .await
        .inspect_err(|e| warn!(lat = %lat, lon = %lon, error = %e, "Weather request failed"))?;

    Ok(Json(report))
}
