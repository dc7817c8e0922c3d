use std::env;

use common::tracing::LogFormat;

use crate::aggregator::TrailingDay;

const DEFAULT_STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Process-wide settings, read once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_key: String,
    pub openweather_url: String,
    pub units: String,
    pub upstream_timeout_seconds: u64,
    pub static_dir: String,
    pub trailing_day: TrailingDay,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            api_key: lookup("OPENWEATHER_API_KEY").unwrap_or_default(),
            openweather_url: lookup("OPENWEATHER_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "http://api.openweathermap.org/data/2.5".to_string()),
            units: lookup("OPENWEATHER_UNITS").unwrap_or_else(|| "metric".to_string()),
            upstream_timeout_seconds: lookup("UPSTREAM_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .filter(|s| *s > 0)
                .unwrap_or(10),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            trailing_day: match lookup("FLUSH_TRAILING_DAY").as_deref() {
                Some("1") | Some("true") | Some("yes") => TrailingDay::Flush,
                _ => TrailingDay::Drop,
            },
            log_format: lookup("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.port, 5000);
        assert_eq!(config.api_key, "");
        assert_eq!(config.openweather_url, "http://api.openweathermap.org/data/2.5");
        assert_eq!(config.units, "metric");
        assert_eq!(config.upstream_timeout_seconds, 10);
        assert!(config.static_dir.ends_with("/static"));
        assert_eq!(config.trailing_day, TrailingDay::Drop);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("OPENWEATHER_API_KEY", "secret"),
            ("OPENWEATHER_URL", "http://localhost:9000/data/2.5/"),
            ("UPSTREAM_TIMEOUT_SECONDS", "3"),
            ("FLUSH_TRAILING_DAY", "true"),
            ("LOG_FORMAT", "json"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.openweather_url, "http://localhost:9000/data/2.5");
        assert_eq!(config.upstream_timeout_seconds, 3);
        assert_eq!(config.trailing_day, TrailingDay::Flush);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn unparseable_values_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("UPSTREAM_TIMEOUT_SECONDS", "0")]);
        assert_eq!(config.port, 5000);
        assert_eq!(config.upstream_timeout_seconds, 10);
    }
}
