use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::FetchError,
    provider::{join_url, truncate_body},
};

use super::ImageSource;

pub const DEFAULT_BASE_URL: &str = "https://api.unsplash.com";

const WIDTH: &str = "1920";
const HEIGHT: &str = "1080";

#[derive(Debug, Clone)]
pub struct UnsplashProvider {
    access_key: String,
    base_url: String,
    http: Client,
}

impl UnsplashProvider {
    pub fn new(access_key: String) -> Self {
        Self::with_base_url(access_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(access_key: String, base_url: impl Into<String>) -> Self {
        Self { access_key, base_url: base_url.into(), http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct UsPhoto {
    urls: UsUrls,
}

#[derive(Debug, Deserialize)]
struct UsUrls {
    regular: String,
}

#[async_trait]
impl ImageSource for UnsplashProvider {
    async fn random_photo(&self, query: &str) -> Result<String, FetchError> {
        let url = join_url(&self.base_url, "photos/random");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("query", query),
                ("client_id", self.access_key.as_str()),
                ("w", WIDTH),
                ("h", HEIGHT),
                ("fit", "crop"),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "Unsplash request failed");
            return Err(FetchError::Status("Background image not available".to_string()));
        }

        let photo: UsPhoto =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(photo.urls.regular)
    }
}
