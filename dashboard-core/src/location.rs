//! Geolocation capability.
//!
//! The dashboard asks for a position exactly once. Which source answers is
//! decided by [`LocationConfig`]: an IP lookup, fixed coordinates, or nothing
//! at all when the user has turned location access off.

use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{
    config::{LocationConfig, LocationMode},
    error::LocationError,
    model::Coordinates,
};

pub const DEFAULT_IP_LOCATOR_URL: &str = "http://ip-api.com/json/";

#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, LocationError>;
}

/// Always answers with the same coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl LocationResolver for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Location access turned off; every request is denied.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledLocation;

#[async_trait]
impl LocationResolver for DisabledLocation {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::Denied)
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpLocator {
    url: String,
    http: Client,
}

impl IpLocator {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_IP_LOCATOR_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

#[async_trait]
impl LocationResolver for IpLocator {
    async fn locate(&self) -> Result<Coordinates, LocationError> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(LocationError::Unavailable(format!("lookup returned {status}")));
        }

        let parsed: IpApiResponse =
            res.json().await.map_err(|e| LocationError::Unavailable(e.to_string()))?;

        match (parsed.status.as_str(), parsed.lat, parsed.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(LocationError::Unavailable(
                parsed.message.unwrap_or_else(|| format!("lookup status '{}'", parsed.status)),
            )),
        }
    }
}

/// Pick the resolver for the configured location mode.
pub fn resolver_from_config(
    location: &LocationConfig,
    ip_locator_url: Option<&str>,
) -> anyhow::Result<Box<dyn LocationResolver>> {
    let resolver: Box<dyn LocationResolver> = match location.mode {
        LocationMode::Ip => Box::new(match ip_locator_url {
            Some(url) => IpLocator::with_url(url),
            None => IpLocator::new(),
        }),
        LocationMode::Fixed => match (location.latitude, location.longitude) {
            (Some(lat), Some(lon)) => Box::new(FixedLocation(Coordinates::new(lat, lon))),
            _ => {
                return Err(anyhow!(
                    "Location mode is 'fixed' but latitude/longitude are missing.\n\
                     Hint: run `weather-dashboard configure` or pass --lat and --lon."
                ));
            }
        },
        LocationMode::Disabled => Box::new(DisabledLocation),
    };

    Ok(resolver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_location_returns_its_coordinates() {
        let coords = Coordinates::new(48.85, 2.35);
        assert_eq!(FixedLocation(coords).locate().await, Ok(coords));
    }

    #[tokio::test]
    async fn disabled_location_is_denied() {
        assert_eq!(DisabledLocation.locate().await, Err(LocationError::Denied));
    }

    #[tokio::test]
    async fn fixed_mode_resolves_configured_point() {
        let cfg = LocationConfig {
            mode: LocationMode::Fixed,
            latitude: Some(1.5),
            longitude: Some(-2.5),
        };

        let resolver = resolver_from_config(&cfg, None).expect("fixed mode with coordinates");
        assert_eq!(resolver.locate().await, Ok(Coordinates::new(1.5, -2.5)));
    }

    #[test]
    fn fixed_mode_without_coordinates_is_a_config_error() {
        let cfg = LocationConfig { mode: LocationMode::Fixed, latitude: Some(1.0), longitude: None };

        let err = resolver_from_config(&cfg, None).unwrap_err();
        assert!(err.to_string().contains("latitude/longitude are missing"));
    }
}
