use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::FetchError,
    model::{Coordinates, WeatherSnapshot},
    provider::{join_url, truncate_body},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com";

/// Number of forecast days requested; also drives the hourly data.
const FORECAST_DAYS: &str = "5";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }
}

#[async_trait]
impl WeatherSource for WeatherApiProvider {
    async fn fetch_forecast(&self, coords: &Coordinates) -> Result<WeatherSnapshot, FetchError> {
        let url = join_url(&self.base_url, "v1/forecast.json");
        let q = coords.as_query();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", q.as_str()),
                ("days", FORECAST_DAYS),
                ("aqi", "no"),
                ("alerts", "no"),
                ("lang", "en"),
            ])
            .send()
            .await
            // the url carries the api key
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            tracing::warn!(%status, body = %truncate_body(&body), "WeatherAPI forecast request failed");
            return Err(FetchError::Status("Weather data not available".to_string()));
        }

        tracing::debug!(response = %body, "WeatherAPI forecast response");

        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}
