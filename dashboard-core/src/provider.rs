use crate::{
    Config, Coordinates, WeatherSnapshot,
    error::FetchError,
    provider::{unsplash::UnsplashProvider, weatherapi::WeatherApiProvider},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod unsplash;
pub mod weatherapi;

/// External services that need a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    WeatherApi,
    Unsplash,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::WeatherApi => "weatherapi",
            ProviderId::Unsplash => "unsplash",
        }
    }

    /// Environment variable that overrides the configured credential.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::WeatherApi => "WEATHERAPI_KEY",
            ProviderId::Unsplash => "UNSPLASH_ACCESS_KEY",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::WeatherApi, ProviderId::Unsplash]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of current conditions plus the multi-day forecast.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_forecast(&self, coords: &Coordinates) -> Result<WeatherSnapshot, FetchError>;
}

/// Source of background photos; returns the URL of one image matching `query`.
#[async_trait]
pub trait ImageSource: Send + Sync + Debug {
    async fn random_photo(&self, query: &str) -> Result<String, FetchError>;
}

/// Build the forecast client. A missing key is a configuration error.
pub fn weather_source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let id = ProviderId::WeatherApi;
    let api_key = config.provider_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for provider '{id}'.\n\
                 Hint: run `weather-dashboard configure` or set {}.",
            id.env_var()
        )
    })?;

    let provider = match config.weatherapi_base_url.as_deref() {
        Some(base) => WeatherApiProvider::with_base_url(api_key.to_owned(), base),
        None => WeatherApiProvider::new(api_key.to_owned()),
    };

    Ok(Box::new(provider))
}

/// Build the background photo client, if a credential is available.
pub fn image_source_from_config(config: &Config) -> Option<Box<dyn ImageSource>> {
    let access_key = config.provider_api_key(ProviderId::Unsplash)?;

    let provider = match config.unsplash_base_url.as_deref() {
        Some(base) => UnsplashProvider::with_base_url(access_key.to_owned(), base),
        None => UnsplashProvider::new(access_key.to_owned()),
    };

    Some(Box::new(provider))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn config_key_and_env_var_per_provider() {
        assert_eq!(ProviderId::WeatherApi.as_str(), "weatherapi");
        assert_eq!(ProviderId::Unsplash.to_string(), "unsplash");
        assert_eq!(ProviderId::Unsplash.env_var(), "UNSPLASH_ACCESS_KEY");
    }

    #[test]
    fn weather_source_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = weather_source_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured for provider 'weatherapi'"));
        assert!(msg.contains("WEATHERAPI_KEY"));
    }

    #[test]
    fn weather_source_built_when_configured() {
        let mut cfg = Config::default();
        cfg.upsert_provider_api_key(ProviderId::WeatherApi, "KEY".to_string());

        assert!(weather_source_from_config(&cfg).is_ok());
    }

    #[test]
    fn image_source_is_optional() {
        let mut cfg = Config::default();
        assert!(image_source_from_config(&cfg).is_none());

        cfg.upsert_provider_api_key(ProviderId::Unsplash, "ACCESS".to_string());
        assert!(image_source_from_config(&cfg).is_some());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn join_url_handles_slashes() {
        assert_eq!(join_url("http://x/", "/v1/a"), "http://x/v1/a");
        assert_eq!(join_url("http://x", "v1/a"), "http://x/v1/a");
    }
}
