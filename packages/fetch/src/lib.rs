#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Air-quality data fetcher.
//!
//! Issues a single GET to the OpenWeatherMap air-pollution endpoint and
//! persists the raw JSON body verbatim to a timestamped file. One call
//! per invocation, no retry and no timeout beyond reqwest defaults; a
//! non-200 status is fatal for the invocation and nothing is written.

use std::path::{Path, PathBuf};

use chrono::Local;

/// Default OpenWeatherMap air-pollution API base URL.
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/air_pollution";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Errors from fetching or persisting air-quality data.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-200 status. Fatal, not retried.
    #[error("API request failed with status {status}")]
    Status {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
    },

    /// Writing the raw JSON file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Client for the current-conditions air-pollution endpoint.
#[derive(Debug, Clone)]
pub struct AirQualityClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AirQualityClient {
    /// Creates a client against [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Creates a client against a custom base URL (used by tests).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetches current air-quality conditions for a coordinate and returns
    /// the raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] for any non-200 response and
    /// [`FetchError::Http`] for transport failures.
    pub async fn fetch_current(&self, lat: f64, lon: f64) -> Result<String, FetchError> {
        let url = format!("{}/current", self.base_url);
        log::info!("Fetching air quality for ({lat}, {lon})");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status { status });
        }

        Ok(response.text().await?)
    }

    /// Fetches current conditions and persists the raw body to a
    /// timestamped file under `output_dir`, returning the written path.
    ///
    /// Nothing is written when the fetch fails.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the request fails, the API answers
    /// non-200, or the file cannot be written.
    pub async fn fetch_and_store(
        &self,
        lat: f64,
        lon: f64,
        output_dir: &Path,
    ) -> Result<PathBuf, FetchError> {
        let body = self.fetch_current(lat, lon).await?;
        save_raw(&body, output_dir)
    }
}

/// Persists a raw JSON body verbatim to
/// `<output_dir>/air_quality_YYYYmmdd_HHMMSS.json`.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if the directory cannot be created or the
/// file cannot be written.
pub fn save_raw(body: &str, output_dir: &Path) -> Result<PathBuf, FetchError> {
    std::fs::create_dir_all(output_dir)?;
    let filename = format!("air_quality_{}.json", Local::now().format("%Y%m%d_%H%M%S"));
    let path = output_dir.join(filename);
    std::fs::write(&path, body)?;
    log::info!("Saved raw air-quality data to {}", path.display());
    Ok(path)
}
