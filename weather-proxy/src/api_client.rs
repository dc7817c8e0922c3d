use common::errors::AppError;
use common::http_client::HttpClient;
use common::models::WeatherCondition;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::config::Config;

/// Current-conditions payload of `GET /weather`
#[derive(Debug, Deserialize)]
pub struct OwCurrentResponse {
    pub name: String,
    #[serde(default)]
    pub dt: Option<i64>,
    /// Seconds east of UTC for the place
    #[serde(default)]
    pub timezone: i32,
    pub main: OwCurrentMain,
    pub wind: OwWind,
    #[serde(default)]
    pub visibility: Option<f64>,
    #[serde(default)]
    pub weather: Vec<OwCondition>,
    pub sys: OwSys,
}

#[derive(Debug, Deserialize)]
pub struct OwCurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
}

#[derive(Debug, Deserialize)]
pub struct OwWind {
    pub speed: f64,
    #[serde(default)]
    pub deg: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct OwSys {
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

/// The only part of a coordinate lookup needed to resolve a place
#[derive(Debug, Deserialize)]
pub struct OwPlace {
    #[serde(default)]
    pub name: String,
}

/// 5 day / 3 hour payload of `GET /forecast`.
///
/// Sample fields are optional here so that a missing value is reported as
/// malformed data by the aggregator rather than as a JSON error.
#[derive(Debug, Deserialize)]
pub struct OwForecastResponse {
    #[serde(default)]
    pub city: Option<OwCity>,
    #[serde(default)]
    pub list: Option<Vec<OwForecastEntry>>,
}

#[derive(Debug, Deserialize)]
pub struct OwCity {
    #[serde(default)]
    pub timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct OwForecastEntry {
    #[serde(default)]
    pub dt: Option<i64>,
    #[serde(default)]
    pub main: Option<OwForecastMain>,
    #[serde(default)]
    pub weather: Vec<OwCondition>,
}

/// A `weather[]` element with every field optional
#[derive(Debug, Clone, Deserialize)]
pub struct OwCondition {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl OwCondition {
    /// On failure returns the name of the first missing field.
    pub fn to_condition(&self) -> Result<WeatherCondition, &'static str> {
        Ok(WeatherCondition {
            id: self.id.unwrap_or_default(),
            main: self.main.clone().ok_or("main")?,
            description: self.description.clone().ok_or("description")?,
            icon: self.icon.clone().ok_or("icon")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct OwForecastMain {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
}

/// Client for the OpenWeatherMap 2.5 REST API
pub struct OpenWeatherClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
    units: String,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            http_client: HttpClient::new(config.upstream_timeout_seconds)?,
            base_url: config.openweather_url.clone(),
            api_key: config.api_key.clone(),
            units: config.units.clone(),
        })
    }

    #[instrument(skip(self), fields(place = %place))]
    pub async fn current_by_place(&self, place: &str) -> Result<OwCurrentResponse, AppError> {
        info!("Fetching current conditions");
        let url = self.url("weather", &format!("q={}", urlencoding::encode(place)));
        self.http_client.get_json(&url).await
    }

    #[instrument(skip(self))]
    pub async fn place_by_coordinates(&self, lat: f64, lon: f64) -> Result<OwPlace, AppError> {
        info!("Resolving coordinates");
        let url = self.url("weather", &format!("lat={}&lon={}", lat, lon));
        self.http_client.get_json(&url).await
    }

    #[instrument(skip(self), fields(place = %place))]
    pub async fn forecast_by_place(&self, place: &str) -> Result<OwForecastResponse, AppError> {
        info!("Fetching forecast");
        let url = self.url("forecast", &format!("q={}", urlencoding::encode(place)));
        self.http_client.get_json(&url).await
    }

    fn url(&self, endpoint: &str, query: &str) -> String {
        format!(
            "{}/{}?{}&appid={}&units={}",
            self.base_url,
            endpoint,
            query,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.units)
        )
    }
}
