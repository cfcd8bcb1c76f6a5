use chrono::{DateTime, FixedOffset, Timelike};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// Default number of hourly rows in a briefing window.
pub const DEFAULT_WINDOW_HOURS: usize = 3;

/// WMO weather code as reported by Open-Meteo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct WmoCode(pub u8);

impl WmoCode {
    /// Thunderstorm, with or without hail.
    pub fn is_thunderstorm(self) -> bool {
        matches!(self.0, 95..=99)
    }

    /// Snow fall, snow grains and snow showers.
    pub fn is_snow(self) -> bool {
        matches!(self.0, 71..=77 | 85 | 86)
    }

    /// Drizzle, rain (including freezing variants) and rain showers.
    pub fn is_rain(self) -> bool {
        matches!(self.0, 51..=67 | 80..=82)
    }

    /// Clear sky or mainly clear.
    pub fn is_clear(self) -> bool {
        matches!(self.0, 0 | 1)
    }

    /// Return weather emoji for this WMO code at the given hour.
    pub fn raw_symbol(self, hour: u32) -> &'static str {
        let is_night = !(6..20).contains(&hour);
        match self.0 {
            0 | 1 if is_night => "\u{1F319}",                        // CRESCENT MOON
            0 => "\u{2600}\u{FE0F}",                                 // SUN
            1 => "\u{1F324}\u{FE0F}",                                // SUN BEHIND SMALL CLOUD
            2 => "\u{26C5}",                                         // SUN BEHIND CLOUD
            3 => "\u{2601}\u{FE0F}",                                 // CLOUD
            45 | 48 => "\u{1F32B}\u{FE0F}",                          // FOG
            51 | 53 | 61 => "\u{1F326}\u{FE0F}",                     // SUN BEHIND RAIN CLOUD
            55 | 56 | 57 | 63..=67 | 80 | 81 => "\u{1F327}\u{FE0F}", // CLOUD WITH RAIN
            71 | 73 | 85 | 86 => "\u{1F328}\u{FE0F}",                // CLOUD WITH SNOW
            75 | 77 => "\u{2744}\u{FE0F}",                           // SNOWFLAKE
            82 | 95..=99 => "\u{26C8}\u{FE0F}",                      // THUNDER CLOUD AND RAIN
            _ => "\u{1F321}\u{FE0F}",                                // THERMOMETER
        }
    }

    /// Return weather emoji for display in a table column.
    ///
    /// Weather emoji have inconsistent widths (1 or 2). A space follows narrow ones so every
    /// symbol occupies two columns.
    pub fn symbol(self, hour: u32) -> String {
        let sym = self.raw_symbol(hour);
        if sym.width() == 1 {
            format!("{} ", sym)
        } else {
            sym.to_string()
        }
    }
}

/// Format a temperature value.
pub fn format_temp(temp: f64) -> String {
    format!("{temp:.1}°C")
}

/// Format a precipitation amount.
pub fn format_precip(precip: f64) -> String {
    format!("{precip:.1}mm")
}

/// Format a precipitation probability.
pub fn format_probability(probability: u8) -> String {
    format!("{probability}%")
}

/// A geocoded place, fixed once resolution succeeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Empty when the geocoder did not report a country.
    pub country: String,
    /// First-level administrative region, e.g. a prefecture.
    pub admin1: Option<String>,
    /// IANA timezone identifier of the place.
    pub timezone: Option<String>,
}

impl ResolvedPlace {
    /// Human-readable label in the form `name（admin1・country）`, omitting empty parts.
    pub fn display_name(&self) -> String {
        let admin = self.admin1.as_deref().unwrap_or("");
        let detail = match (admin.is_empty(), self.country.is_empty()) {
            (true, true) => return self.name.clone(),
            (false, false) => format!("{admin}・{}", self.country),
            (false, true) => admin.to_string(),
            (true, false) => self.country.clone(),
        };
        format!("{}（{}）", self.name, detail)
    }
}

/// One hour of forecast data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    /// Start of the hour, in the display timezone.
    pub time: DateTime<FixedOffset>,
    /// Air temperature at 2m in °C.
    pub temperature: f64,
    /// Precipitation probability, 0-100.
    pub precipitation_probability: u8,
    /// Precipitation amount in mm.
    pub precipitation: f64,
    pub code: WmoCode,
    /// Wind speed at 10m in m/s.
    pub wind_speed: f64,
}

impl ForecastRow {
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }
}

/// Consecutive forecast rows in ascending time order. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastWindow {
    rows: Vec<ForecastRow>,
}

impl ForecastWindow {
    /// Build a window from rows, ordering them by time. Returns `None` for an empty set.
    pub fn new(mut rows: Vec<ForecastRow>) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }
        rows.sort_by_key(|row| row.time);
        Some(ForecastWindow { rows })
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    /// The earliest row.
    pub fn first(&self) -> &ForecastRow {
        &self.rows[0]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Never true for a constructed window. Pairs with `len` for clippy's
    /// `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Highest temperature in the window. NaN readings are ignored.
    pub fn max_temperature(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| row.temperature)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
