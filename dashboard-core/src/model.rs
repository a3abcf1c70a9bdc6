use serde::{Deserialize, Deserializer, Serialize};

/// Device position, resolved once per run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// `"lat,lon"`, the form the forecast endpoint takes in `q`.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Forecast response as returned by WeatherAPI.com `forecast.json`.
///
/// Only the fields the dashboard reads are modelled; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub location: Place,
    pub forecast: Forecast,
}

impl WeatherSnapshot {
    pub fn days(&self) -> &[DayForecast] {
        &self.forecast.forecastday
    }

    pub fn today(&self) -> Option<&DayForecast> {
        self.forecast.forecastday.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    #[serde(deserialize_with = "flag_from_int")]
    pub is_day: bool,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub code: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<DayForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    /// `YYYY-MM-DD`
    pub date: String,
    pub day: DaySummary,
    #[serde(default)]
    pub hour: Vec<HourForecast>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub mintemp_c: f64,
    pub maxtemp_c: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourForecast {
    /// `YYYY-MM-DD HH:MM` in the location's local time.
    pub time: String,
    pub temp_c: f64,
    #[serde(deserialize_with = "flag_from_int")]
    pub is_day: bool,
    pub condition: Condition,
}

/// WeatherAPI encodes day/night as `0`/`1`; accept a plain bool as well.
fn flag_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Int(i64),
        Bool(bool),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Int(n) => n == 1,
        Flag::Bool(b) => b,
    })
}
