//! Core library for the `weather-dashboard` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The geolocation capability and its implementations
//! - Clients for the forecast and background photo APIs
//! - The load pipeline and its UI state
//! - A pure renderer from UI state to a terminal view
//!
//! It is used by `weather-dashboard-cli`, but the pipeline can be driven by
//! any front end that supplies its own resolver and sources.

pub mod background;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod icon;
pub mod location;
pub mod model;
pub mod provider;
pub mod render;

pub use config::{Config, LocationConfig, LocationMode, ProviderConfig};
pub use dashboard::{Dashboard, UiState};
pub use error::{DashboardError, FetchError, LocationError};
pub use location::LocationResolver;
pub use model::{Coordinates, WeatherSnapshot};
pub use provider::{ImageSource, ProviderId, WeatherSource};
pub use render::{View, render};
