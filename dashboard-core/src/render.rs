//! Pure mapping from [`UiState`] to a [`View`], plus its terminal text form.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

use crate::{
    dashboard::UiState,
    icon::{WeatherIcon, weather_icon},
    model::{DayForecast, HourForecast, WeatherSnapshot},
};

/// Hour slots shown in the strip, from the first forecast day.
pub const HOURLY_STRIP_INDICES: [usize; 6] = [0, 4, 8, 12, 16, 23];
pub const HOURLY_STRIP_LEN: usize = 6;

const BAR_CELLS: usize = 24;
const TILE_WIDTH: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Spinner,
    Error(String),
    Dashboard(DashboardView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub temperature: String,
    pub location: String,
    pub time: String,
    pub high: Option<i64>,
    pub low: Option<i64>,
    pub hours: Vec<HourTile>,
    pub days: Vec<DayRow>,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourTile {
    pub label: String,
    pub icon: WeatherIcon,
    pub temp: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayRow {
    pub label: String,
    pub icon: WeatherIcon,
    pub bar: BarGeometry,
    pub low: i64,
    pub high: i64,
}

/// Position of the current temperature inside a day's min..max range, in percent.
///
/// Values are not clamped: a current temperature outside the day's range gives
/// a width below 0 or above 100, and `max == min` gives a non-finite result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub width_pct: f64,
    pub margin_left_pct: f64,
}

pub fn render(state: &UiState, now: NaiveTime) -> View {
    match state {
        UiState::Loading => View::Spinner,
        UiState::Error(message) => View::Error(message.clone()),
        UiState::Ready { snapshot, .. } => {
            let background = state.background_url().unwrap_or_default().to_string();
            View::Dashboard(dashboard_view(snapshot, background, now))
        }
    }
}

fn dashboard_view(snapshot: &WeatherSnapshot, background: String, now: NaiveTime) -> DashboardView {
    let current = snapshot.current.temp_c;
    let today = snapshot.today();

    let hours = today
        .map(|day| {
            hourly_strip(&day.hour)
                .into_iter()
                .enumerate()
                .map(|(i, hour)| HourTile {
                    label: if i == 0 { "Now".to_string() } else { hour_label(&hour.time) },
                    icon: weather_icon(hour.condition.code, hour.is_day),
                    temp: round_half_up(hour.temp_c),
                })
                .collect()
        })
        .unwrap_or_default();

    let days = snapshot
        .days()
        .iter()
        .enumerate()
        .map(|(i, day)| day_row(i, day, current))
        .collect();

    DashboardView {
        temperature: format!("{current:.1}°C"),
        location: snapshot.location.name.clone(),
        time: now.format("%H:%M").to_string(),
        high: today.map(|d| round_half_up(d.day.maxtemp_c)),
        low: today.map(|d| round_half_up(d.day.mintemp_c)),
        hours,
        days,
        background,
    }
}

fn day_row(index: usize, day: &DayForecast, current: f64) -> DayRow {
    DayRow {
        label: if index == 0 { "Today".to_string() } else { weekday_label(&day.date) },
        // daily summaries carry no day/night flag; show the daytime icon
        icon: weather_icon(day.day.condition.code, true),
        bar: forecast_bar(current, day.day.mintemp_c, day.day.maxtemp_c),
        low: round_half_up(day.day.mintemp_c),
        high: round_half_up(day.day.maxtemp_c),
    }
}

/// Entries at [`HOURLY_STRIP_INDICES`] that exist, at most [`HOURLY_STRIP_LEN`].
pub fn hourly_strip(hours: &[HourForecast]) -> Vec<&HourForecast> {
    HOURLY_STRIP_INDICES
        .iter()
        .filter_map(|&i| hours.get(i))
        .take(HOURLY_STRIP_LEN)
        .collect()
}

pub fn forecast_bar(current: f64, day_min: f64, day_max: f64) -> BarGeometry {
    BarGeometry {
        width_pct: position_pct(current, day_min, day_max),
        // the bar always starts at the day's minimum
        margin_left_pct: position_pct(day_min, day_min, day_max),
    }
}

fn position_pct(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min) * 100.0
}

/// Round to the nearest integer, halves towards positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn hour_label(time: &str) -> String {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M")
        .map(|t| t.format("%-I %p").to_string())
        .unwrap_or_else(|_| time.to_string())
}

fn weekday_label(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn bar_cells(pct: f64) -> usize {
    if !pct.is_finite() {
        return 0;
    }
    ((pct / 100.0) * BAR_CELLS as f64).round().clamp(0.0, BAR_CELLS as f64) as usize
}

fn draw_bar(bar: &BarGeometry) -> String {
    let start = bar_cells(bar.margin_left_pct);
    let end = (start + bar_cells(bar.width_pct)).min(BAR_CELLS);

    (0..BAR_CELLS).map(|i| if (start..end).contains(&i) { '━' } else { '─' }).collect()
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Spinner => write!(f, "⠋ Loading weather…"),
            View::Error(message) => write!(f, "Error: {message}"),
            View::Dashboard(view) => fmt::Display::fmt(view, f),
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "─".repeat(TILE_WIDTH * HOURLY_STRIP_LEN + 2);

        writeln!(f, "weather.com")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "  {}", self.temperature)?;
        writeln!(f, "  {}", self.location)?;
        match (self.high, self.low) {
            (Some(high), Some(low)) => writeln!(f, "  {} | H:{high}° L:{low}°", self.time)?,
            _ => writeln!(f, "  {}", self.time)?,
        }

        if !self.hours.is_empty() {
            writeln!(f)?;
            let labels: String =
                self.hours.iter().map(|h| format!("{:^w$}", h.label, w = TILE_WIDTH)).collect();
            let icons: String =
                self.hours.iter().map(|h| format!("{:^w$}", h.icon.glyph(), w = TILE_WIDTH)).collect();
            let temps: String = self
                .hours
                .iter()
                .map(|h| format!("{:^w$}", format!("{}°", h.temp), w = TILE_WIDTH))
                .collect();
            writeln!(f, "  {}", labels.trim_end())?;
            writeln!(f, "  {}", icons.trim_end())?;
            writeln!(f, "  {}", temps.trim_end())?;
        }

        if !self.days.is_empty() {
            writeln!(f)?;
            for day in &self.days {
                writeln!(
                    f,
                    "  {:<6}{}  {}  {:>3}° {:>3}°",
                    day.label,
                    day.icon.glyph(),
                    draw_bar(&day.bar),
                    day.low,
                    day.high
                )?;
            }
        }

        writeln!(f, "{rule}")?;
        write!(f, "Background: {}", self.background)
    }
}
