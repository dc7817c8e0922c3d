use chrono::{DateTime, FixedOffset, NaiveDate};
use common::errors::AppError;
use common::models::{DailySummary, HourlyForecast, WeatherCondition};

use crate::api_client::OwForecastEntry;

pub const HOURLY_SAMPLES: usize = 8;
pub const DAILY_SUMMARIES: usize = 5;

/// What to do with the last date group once the samples run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingDay {
    /// A day is only emitted when a later date closes it, so the final
    /// group never appears in the output.
    #[default]
    Drop,
    /// The final group is emitted after the last sample.
    Flush,
}

/// A validated 3-hour forecast point
#[derive(Debug, Clone)]
pub struct ForecastSample {
    pub time: DateTime<FixedOffset>,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub weather: WeatherCondition,
}

impl ForecastSample {
    pub fn from_entry(
        index: usize,
        entry: &OwForecastEntry,
        offset: FixedOffset,
    ) -> Result<Self, AppError> {
        let missing = |field: &str| AppError::malformed(format!("list[{}] is missing {}", index, field));

        let dt = entry.dt.ok_or_else(|| missing("dt"))?;
        let main = entry.main.as_ref().ok_or_else(|| missing("main"))?;

        Ok(Self {
            time: local_time(dt, offset)?,
            temp: main.temp.ok_or_else(|| missing("main.temp"))?,
            temp_min: main.temp_min.ok_or_else(|| missing("main.temp_min"))?,
            temp_max: main.temp_max.ok_or_else(|| missing("main.temp_max"))?,
            weather: entry
                .weather
                .first()
                .ok_or_else(|| missing("weather[0]"))?
                .to_condition()
                .map_err(|field| missing(format!("weather[0].{}", field).as_str()))?,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.time.date_naive()
    }
}

#[derive(Debug, Default)]
pub struct AggregatedForecast {
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<DailySummary>,
}

/// Running min/max for the date currently being folded
struct DayAccumulator {
    date: NaiveDate,
    weather: WeatherCondition,
    temp_min: f64,
    temp_max: f64,
}

impl DayAccumulator {
    // The opening sample's condition represents the whole day.
    fn open(sample: &ForecastSample) -> Self {
        Self {
            date: sample.date(),
            weather: sample.weather.clone(),
            temp_min: sample.temp_min,
            temp_max: sample.temp_max,
        }
    }

    fn absorb(&mut self, sample: &ForecastSample) {
        self.temp_min = self.temp_min.min(sample.temp_min);
        self.temp_max = self.temp_max.max(sample.temp_max);
    }

    fn close(self) -> DailySummary {
        DailySummary {
            date: self.date.format("%Y-%m-%d").to_string(),
            day: self.date.format("%A").to_string(),
            weather: self.weather,
            temp_min: self.temp_min,
            temp_max: self.temp_max,
        }
    }
}

/// Turns the upstream forecast list into the hourly slice and daily summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastAggregator {
    trailing_day: TrailingDay,
}

impl ForecastAggregator {
    pub fn new(trailing_day: TrailingDay) -> Self {
        Self { trailing_day }
    }

    /// Validates every entry before producing anything; one bad entry fails the call.
    /// `utc_offset_seconds` decides which calendar date a sample belongs to.
    pub fn aggregate(
        &self,
        entries: &[OwForecastEntry],
        utc_offset_seconds: i32,
    ) -> Result<AggregatedForecast, AppError> {
        let offset = FixedOffset::east_opt(utc_offset_seconds).ok_or_else(|| {
            AppError::malformed(format!("invalid UTC offset {}", utc_offset_seconds))
        })?;

        let samples = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| ForecastSample::from_entry(index, entry, offset))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AggregatedForecast {
            hourly: hourly(&samples),
            daily: self.daily(&samples),
        })
    }

    fn daily(&self, samples: &[ForecastSample]) -> Vec<DailySummary> {
        let (mut days, open) = samples.iter().fold(
            (Vec::new(), None::<DayAccumulator>),
            |(mut days, open), sample| match open {
                Some(mut day) if day.date == sample.date() => {
                    day.absorb(sample);
                    (days, Some(day))
                }
                Some(day) => {
                    days.push(day.close());
                    (days, Some(DayAccumulator::open(sample)))
                }
                None => (days, Some(DayAccumulator::open(sample))),
            },
        );

        if self.trailing_day == TrailingDay::Flush
            && let Some(day) = open
        {
            days.push(day.close());
        }

        days.truncate(DAILY_SUMMARIES);
        days
    }
}

fn hourly(samples: &[ForecastSample]) -> Vec<HourlyForecast> {
    samples
        .iter()
        .take(HOURLY_SAMPLES)
        .map(|sample| HourlyForecast {
            time: sample.time.format("%H:%M").to_string(),
            temperature: round_temperature(sample.temp),
            weather: sample.weather.clone(),
        })
        .collect()
}

/// Epoch seconds to wall-clock time at the given offset.
pub fn local_time(timestamp: i64, offset: FixedOffset) -> Result<DateTime<FixedOffset>, AppError> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| AppError::malformed(format!("timestamp {} out of range", timestamp)))
}

/// Whole degrees, ties to even.
pub fn round_temperature(value: f64) -> i64 {
    value.round_ties_even() as i64
}
