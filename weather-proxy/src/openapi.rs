use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{CurrentConditions, DailySummary, HourlyForecast, WeatherCondition, WeatherReport};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::get_weather,
        handlers::get_weather_by_coordinates,
    ),
    components(schemas(
        WeatherReport,
        CurrentConditions,
        HourlyForecast,
        DailySummary,
        WeatherCondition,
    )),
    tags(
        (name = "weather", description = "Current conditions and forecast"),
    ),
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
