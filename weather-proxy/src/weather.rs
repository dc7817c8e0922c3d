use chrono::FixedOffset;
use common::errors::AppError;
use common::models::{CurrentConditions, WeatherReport};
use tracing::{debug, info, instrument};

use crate::aggregator::{ForecastAggregator, local_time, round_temperature};
use crate::api_client::{OpenWeatherClient, OwCurrentResponse};

const CITY_NOT_FOUND: &str = "City not found";
const LOCATION_NOT_FOUND: &str = "Location not found";

/// Decimal-degree position supplied by the browser
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Segments that are not finite decimal degrees within ±90/±180 cannot
    /// name a location, so they are reported as not found without an upstream call.
    pub fn parse(lat: &str, lon: &str) -> Result<Self, AppError> {
        match (parse_degrees(lat, 90.0), parse_degrees(lon, 180.0)) {
            (Some(lat), Some(lon)) => Ok(Self { lat, lon }),
            _ => {
                debug!(lat = %lat, lon = %lon, "Rejecting unusable coordinates");
                Err(AppError::not_found(LOCATION_NOT_FOUND))
            }
        }
    }
}

fn parse_degrees(raw: &str, limit: f64) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.abs() <= limit)
}

/// Builds a complete report from the two upstream calls.
pub struct WeatherService {
    client: OpenWeatherClient,
    aggregator: ForecastAggregator,
}

impl WeatherService {
    pub fn new(client: OpenWeatherClient, aggregator: ForecastAggregator) -> Self {
        Self { client, aggregator }
    }

    #[instrument(skip(self), fields(place = %place))]
    pub async fn get_weather_by_place(&self, place: &str) -> Result<WeatherReport, AppError> {
        let current = self
            .client
            .current_by_place(place)
            .await
            .map_err(|e| not_found_on_404(e, CITY_NOT_FOUND))?;

        let forecast = self.client.forecast_by_place(place).await?;
        let entries = forecast
            .list
            .ok_or_else(|| AppError::malformed("forecast response has no list"))?;
        let offset = forecast
            .city
            .and_then(|city| city.timezone)
            .unwrap_or(current.timezone);

        let aggregated = self.aggregator.aggregate(&entries, offset)?;
        let current = current_conditions(current)?;

        info!(
            city = %current.city,
            hourly = aggregated.hourly.len(),
            daily = aggregated.daily.len(),
            "Weather report assembled"
        );

        Ok(WeatherReport {
            current,
            hourly: aggregated.hourly,
            daily: aggregated.daily,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_weather_by_coordinates(
        &self,
        coordinates: Coordinates,
    ) -> Result<WeatherReport, AppError> {
        let place = self
            .client
            .place_by_coordinates(coordinates.lat, coordinates.lon)
            .await
            .map_err(|e| not_found_on_404(e, LOCATION_NOT_FOUND))?;

        if place.name.trim().is_empty() {
            return Err(AppError::not_found(LOCATION_NOT_FOUND));
        }

        info!(place = %place.name, "Coordinates resolved");
        self.get_weather_by_place(&place.name).await
    }
}

fn not_found_on_404(err: AppError, message: &str) -> AppError {
    if err.is_upstream_status(404) {
        AppError::not_found(message)
    } else {
        err
    }
}

fn current_conditions(raw: OwCurrentResponse) -> Result<CurrentConditions, AppError> {
    let offset = FixedOffset::east_opt(raw.timezone)
        .ok_or_else(|| AppError::malformed(format!("invalid UTC offset {}", raw.timezone)))?;
    let clock = |ts: i64| local_time(ts, offset).map(|t| t.format("%H:%M").to_string());

    let observed = match raw.dt {
        Some(dt) => local_time(dt, offset)?,
        None => chrono::Utc::now().with_timezone(&offset),
    };

    let weather = raw
        .weather
        .first()
        .ok_or_else(|| AppError::malformed("current conditions have no weather entry"))?
        .to_condition()
        .map_err(|field| {
            AppError::malformed(format!("current conditions are missing weather[0].{}", field))
        })?;

    Ok(CurrentConditions {
        city: raw.name,
        country: raw.sys.country,
        temperature: round_temperature(raw.main.temp),
        feels_like: round_temperature(raw.main.feels_like),
        humidity: raw.main.humidity,
        pressure: raw.main.pressure,
        wind_speed: raw.wind.speed,
        wind_direction: raw.wind.deg.unwrap_or(0),
        visibility: raw.visibility.unwrap_or(0.0) / 1000.0,
        weather,
        sunrise: clock(raw.sys.sunrise)?,
        sunset: clock(raw.sys.sunset)?,
        datetime: observed.format("%Y-%m-%d %H:%M").to_string(),
    })
}
