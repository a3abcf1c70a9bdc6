use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Password, PasswordDisplayMode, Select};
use weather_dashboard_core::{
    Config, Coordinates, Dashboard, LocationConfig, LocationMode, LocationResolver, ProviderId,
    UiState, View,
    location::{FixedLocation, resolver_from_config},
    provider::{image_source_from_config, weather_source_from_config},
    render,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-dashboard",
    version,
    about = "Current weather and forecast for where you are"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store API credentials and the location source.
    Configure,

    /// Show the dashboard for the current location.
    Show {
        /// Latitude to use instead of the configured location source.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude to use instead of the configured location source.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { lat, lon } => {
                show(lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon))).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    for id in ProviderId::all() {
        let current = if config.is_provider_configured(*id) { "set" } else { "not set" };
        let key = Password::new(&format!("{} key ({current}, empty keeps it):", label(*id)))
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .prompt()?;

        let key = key.trim();
        if !key.is_empty() {
            config.upsert_provider_api_key(*id, key.to_string());
        }
    }

    let mode = Select::new("Location source:", LocationMode::all().to_vec())
        .with_starting_cursor(
            LocationMode::all().iter().position(|m| *m == config.location.mode).unwrap_or(0),
        )
        .prompt()?;

    config.location = match mode {
        LocationMode::Fixed => {
            let mut latitude = CustomType::<f64>::new("Latitude:");
            if let Some(lat) = config.location.latitude {
                latitude = latitude.with_default(lat);
            }
            let mut longitude = CustomType::<f64>::new("Longitude:");
            if let Some(lon) = config.location.longitude {
                longitude = longitude.with_default(lon);
            }

            LocationConfig {
                mode,
                latitude: Some(latitude.prompt()?),
                longitude: Some(longitude.prompt()?),
            }
        }
        _ => LocationConfig { mode, ..config.location.clone() },
    };

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(coords: Option<Coordinates>) -> anyhow::Result<ExitCode> {
    let mut config = Config::load()?;
    config.apply_env_overrides();
    tracing::debug!(
        location_mode = %config.location.mode,
        explicit = coords.is_some(),
        "configuration loaded"
    );

    let resolver: Box<dyn LocationResolver> = match coords {
        Some(coords) => Box::new(FixedLocation(coords)),
        None => resolver_from_config(&config.location, config.ip_locator_url.as_deref())?,
    };
    let weather = weather_source_from_config(&config).context("Cannot load the forecast")?;
    let images = image_source_from_config(&config);

    let mut dashboard = Dashboard::new(resolver, weather, images);

    eprintln!("{}", View::Spinner);
    let state = dashboard.mount().await;

    println!("{}", render(state, Local::now().time()));

    Ok(match state {
        UiState::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

fn label(id: ProviderId) -> &'static str {
    match id {
        ProviderId::WeatherApi => "WeatherAPI.com",
        ProviderId::Unsplash => "Unsplash access",
    }
}
