use crate::errors::AppError;
use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// HTTP client with a fixed per-request timeout. Failed calls are not retried.
pub struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self, AppError> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Fetch JSON from URL. Non-success statuses surface as `AppError::HttpError`.
    #[instrument(skip(self, url))]
    pub async fn get_json<T>(&self, url: &str) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        match self.fetch_with_timeout(url).await {
            Ok(response) => {
                info!("Upstream request successful");
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, "Upstream request failed");
                Err(e)
            }
        }
    }

    async fn fetch_with_timeout<T>(&self, url: &str) -> Result<T, AppError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = tokio::time::timeout(self.timeout, self.client.get(url).send())
            .await
            .map_err(|_| self.timed_out())?
            .map_err(|e| {
                if e.is_timeout() {
                    self.timed_out()
                } else {
                    AppError::NetworkError(e.without_url())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown status"),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::NetworkError(e.without_url()))?;
        let json: T = serde_json::from_str(&text).map_err(AppError::ParseError)?;

        Ok(json)
    }

    // The request URL carries the API key, so it is kept out of messages.
    fn timed_out(&self) -> AppError {
        AppError::timeout(format!(
            "Upstream request timed out after {}s",
            self.timeout.as_secs()
        ))
    }
}
