//! The load pipeline: locate → forecast → background.
//!
//! [`Dashboard`] owns the [`UiState`] and runs the chain once. Each step hands
//! its result to the next; a failing location or forecast step ends the chain
//! in [`UiState::Error`], while a failing background step only leaves the
//! background unset.

use crate::{
    background::{PLACEHOLDER_BACKGROUND_URL, fetch_background},
    error::DashboardError,
    location::LocationResolver,
    model::WeatherSnapshot,
    provider::{ImageSource, WeatherSource},
};

#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Loading,
    Error(String),
    Ready {
        snapshot: WeatherSnapshot,
        background: Option<String>,
    },
}

impl UiState {
    /// Background URL to display, with the placeholder substituted when unset.
    pub fn background_url(&self) -> Option<&str> {
        match self {
            UiState::Ready { background, .. } => {
                Some(background.as_deref().unwrap_or(PLACEHOLDER_BACKGROUND_URL))
            }
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Dashboard {
    resolver: Box<dyn LocationResolver>,
    weather: Box<dyn WeatherSource>,
    images: Option<Box<dyn ImageSource>>,
    state: UiState,
    mounted: bool,
}

impl Dashboard {
    pub fn new(
        resolver: Box<dyn LocationResolver>,
        weather: Box<dyn WeatherSource>,
        images: Option<Box<dyn ImageSource>>,
    ) -> Self {
        Self { resolver, weather, images, state: UiState::Loading, mounted: false }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn into_state(self) -> UiState {
        self.state
    }

    /// Run the pipeline. Only the first call does any work.
    pub async fn mount(&mut self) -> &UiState {
        if self.mounted {
            return &self.state;
        }
        self.mounted = true;

        self.state = match self.load().await {
            Ok((snapshot, background)) => UiState::Ready { snapshot, background },
            Err(err) => {
                tracing::warn!(error = ?err, "dashboard failed to load");
                UiState::Error(err.to_string())
            }
        };

        &self.state
    }

    async fn load(&self) -> Result<(WeatherSnapshot, Option<String>), DashboardError> {
        let coords = self.resolver.locate().await.map_err(|err| {
            tracing::warn!(error = %err, "location lookup failed");
            DashboardError::from(err)
        })?;
        tracing::info!(latitude = coords.latitude, longitude = coords.longitude, "location resolved");

        let snapshot = self
            .weather
            .fetch_forecast(&coords)
            .await
            .map_err(|err| DashboardError::WeatherFetchFailed(err.to_string()))?;
        tracing::info!(
            location = %snapshot.location.name,
            days = snapshot.days().len(),
            "forecast loaded"
        );

        let background = fetch_background(self.images.as_deref(), &snapshot.current).await;

        Ok((snapshot, background))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{FetchError, LocationError},
        location::{DisabledLocation, FixedLocation},
        model::{Condition, Coordinates, CurrentConditions, Forecast, Place},
    };
    use async_trait::async_trait;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    fn snapshot(is_day: bool, text: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentConditions {
                temp_c: 12.0,
                is_day,
                condition: Condition { text: text.to_string(), code: 1183 },
            },
            location: Place { name: "Oslo".to_string() },
            forecast: Forecast { forecastday: Vec::new() },
        }
    }

    #[derive(Debug)]
    struct FakeWeather {
        result: Result<WeatherSnapshot, FetchError>,
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Option<Coordinates>>>,
    }

    #[async_trait]
    impl WeatherSource for FakeWeather {
        async fn fetch_forecast(&self, coords: &Coordinates) -> Result<WeatherSnapshot, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen.lock().unwrap() = Some(*coords);
            self.result.clone()
        }
    }

    #[derive(Debug)]
    struct FakeImages {
        result: Result<String, FetchError>,
        calls: Arc<AtomicUsize>,
        queries: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ImageSource for FakeImages {
        async fn random_photo(&self, query: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());
            self.result.clone()
        }
    }

    struct Harness {
        weather_calls: Arc<AtomicUsize>,
        image_calls: Arc<AtomicUsize>,
        seen_coords: Arc<Mutex<Option<Coordinates>>>,
        queries: Arc<Mutex<Vec<String>>>,
    }

    fn build(
        resolver: Box<dyn LocationResolver>,
        weather: Result<WeatherSnapshot, FetchError>,
        images: Option<Result<String, FetchError>>,
    ) -> (Dashboard, Harness) {
        let harness = Harness {
            weather_calls: Arc::new(AtomicUsize::new(0)),
            image_calls: Arc::new(AtomicUsize::new(0)),
            seen_coords: Arc::new(Mutex::new(None)),
            queries: Arc::new(Mutex::new(Vec::new())),
        };

        let weather = Box::new(FakeWeather {
            result: weather,
            calls: harness.weather_calls.clone(),
            seen: harness.seen_coords.clone(),
        });
        let images = images.map(|result| {
            Box::new(FakeImages {
                result,
                calls: harness.image_calls.clone(),
                queries: harness.queries.clone(),
            }) as Box<dyn ImageSource>
        });

        (Dashboard::new(resolver, weather, images), harness)
    }

    fn here() -> Box<dyn LocationResolver> {
        Box::new(FixedLocation(Coordinates::new(59.91, 10.75)))
    }

    #[test]
    fn starts_loading() {
        let (dashboard, _) = build(here(), Ok(snapshot(true, "Clear")), None);
        assert_eq!(dashboard.state(), &UiState::Loading);
        assert_eq!(dashboard.state().background_url(), None);
    }

    #[tokio::test]
    async fn happy_path_reaches_ready_with_photo() {
        let (mut dashboard, h) = build(
            here(),
            Ok(snapshot(false, "Light rain")),
            Some(Ok("https://images.example/photo.jpg".to_string())),
        );

        let state = dashboard.mount().await.clone();

        assert_eq!(
            state,
            UiState::Ready {
                snapshot: snapshot(false, "Light rain"),
                background: Some("https://images.example/photo.jpg".to_string()),
            }
        );
        assert_eq!(state.background_url(), Some("https://images.example/photo.jpg"));
        assert_eq!(*h.seen_coords.lock().unwrap(), Some(Coordinates::new(59.91, 10.75)));
        assert_eq!(*h.queries.lock().unwrap(), vec!["night light rain".to_string()]);
    }

    #[tokio::test]
    async fn weather_failure_is_terminal_and_skips_background() {
        let (mut dashboard, h) = build(
            here(),
            Err(FetchError::Status("Weather data not available".into())),
            Some(Ok("unused".to_string())),
        );

        dashboard.mount().await;

        assert_eq!(dashboard.state(), &UiState::Error("Weather data not available".into()));
        assert_eq!(h.weather_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.image_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn image_failure_degrades_to_placeholder() {
        let (mut dashboard, h) = build(
            here(),
            Ok(snapshot(true, "Clear")),
            Some(Err(FetchError::Status("Background image not available".into()))),
        );

        let state = dashboard.mount().await;

        assert!(matches!(state, UiState::Ready { background: None, .. }));
        assert_eq!(state.background_url(), Some(PLACEHOLDER_BACKGROUND_URL));
        assert_eq!(h.image_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_image_source_uses_placeholder() {
        let (mut dashboard, _) = build(here(), Ok(snapshot(true, "Clear")), None);

        let state = dashboard.mount().await;

        assert_eq!(state.background_url(), Some(PLACEHOLDER_BACKGROUND_URL));
    }

    #[tokio::test]
    async fn denied_location_shows_fixed_message_and_fetches_nothing() {
        let (mut dashboard, h) =
            build(Box::new(DisabledLocation), Ok(snapshot(true, "Clear")), Some(Ok("x".into())));

        dashboard.mount().await;

        assert_eq!(
            dashboard.state(),
            &UiState::Error("Unable to retrieve your location. Please allow location access.".into())
        );
        assert_eq!(h.weather_calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.image_calls.load(Ordering::SeqCst), 0);
    }

    #[derive(Debug)]
    struct Unavailable;

    #[async_trait]
    impl LocationResolver for Unavailable {
        async fn locate(&self) -> Result<Coordinates, LocationError> {
            Err(LocationError::Unavailable("no route to host".into()))
        }
    }

    #[tokio::test]
    async fn unavailable_location_shows_fixed_message() {
        let (mut dashboard, _) = build(Box::new(Unavailable), Ok(snapshot(true, "Clear")), None);

        dashboard.mount().await;

        assert_eq!(
            dashboard.into_state(),
            UiState::Error("Geolocation is not supported on this system.".into())
        );
    }

    #[tokio::test]
    async fn second_mount_does_not_refetch() {
        let (mut dashboard, h) =
            build(here(), Ok(snapshot(true, "Clear")), Some(Ok("u".to_string())));

        dashboard.mount().await;
        dashboard.mount().await;

        assert_eq!(h.weather_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.image_calls.load(Ordering::SeqCst), 1);
    }
}
