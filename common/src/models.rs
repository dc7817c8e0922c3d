use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Weather condition as reported by the upstream provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct WeatherCondition {
    #[serde(default)]
    pub id: u32,
    /// Condition group, e.g. `Clear`, `Clouds`, `Rain`
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Weather report returned to the front end
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    /// Up to 8 near-term 3-hour samples
    pub hourly: Vec<HourlyForecast>,
    /// Up to 5 calendar days
    pub daily: Vec<DailySummary>,
}

/// Snapshot of the observed weather at a place
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity: i64,
    pub pressure: i64,
    pub wind_speed: f64,
    pub wind_direction: i64,
    /// Kilometres
    pub visibility: f64,
    pub weather: WeatherCondition,
    /// `HH:MM` local to the place
    pub sunrise: String,
    pub sunset: String,
    /// Observation time, `YYYY-MM-DD HH:MM` local to the place
    pub datetime: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct HourlyForecast {
    /// `HH:MM` local to the place
    pub time: String,
    pub temperature: i64,
    pub weather: WeatherCondition,
}

/// Min/max temperature and representative condition for one calendar date
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct DailySummary {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Full weekday name
    pub day: String,
    pub weather: WeatherCondition,
    pub temp_min: f64,
    pub temp_max: f64,
}
