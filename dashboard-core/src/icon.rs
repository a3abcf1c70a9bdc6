/// WeatherAPI condition code for "Sunny" / "Clear".
pub const CLEAR_CODE: i32 = 1000;

/// Codes from "Patchy rain possible" through "Moderate or heavy freezing rain".
pub const RAIN_CODES: std::ops::RangeInclusive<i32> = 1063..=1201;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconCategory {
    Clear,
    Rain,
    Cloud,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Sun,
    Moon,
    Rain,
    Cloud,
}

impl WeatherIcon {
    pub fn category(&self) -> IconCategory {
        match self {
            WeatherIcon::Sun | WeatherIcon::Moon => IconCategory::Clear,
            WeatherIcon::Rain => IconCategory::Rain,
            WeatherIcon::Cloud => IconCategory::Cloud,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Sun => "☀",
            WeatherIcon::Moon => "☾",
            WeatherIcon::Rain => "☂",
            WeatherIcon::Cloud => "☁",
        }
    }
}

/// Map a condition code and day/night flag to an icon.
pub fn weather_icon(code: i32, is_day: bool) -> WeatherIcon {
    match code {
        CLEAR_CODE if is_day => WeatherIcon::Sun,
        CLEAR_CODE => WeatherIcon::Moon,
        c if RAIN_CODES.contains(&c) => WeatherIcon::Rain,
        _ => WeatherIcon::Cloud,
    }
}
