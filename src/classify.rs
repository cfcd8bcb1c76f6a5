//! Reduce a forecast window to a handful of categorical labels.

use std::fmt;

use serde::Serialize;

use crate::data::{ForecastRow, ForecastWindow};

/// Wind speed (m/s) at or above which a window counts as windy.
pub const WINDY_THRESHOLD: f64 = 10.0;

/// Dominant sky condition of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sky {
    Clear,
    Cloudy,
    Rain,
    Snow,
    Thunder,
    Windy,
}

impl Sky {
    pub const ALL: [Sky; 6] = [
        Sky::Clear,
        Sky::Cloudy,
        Sky::Rain,
        Sky::Snow,
        Sky::Thunder,
        Sky::Windy,
    ];
}

/// Temperature band of the window's warmest hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureBand {
    Cold,
    Cool,
    Warm,
    Hot,
}

impl TemperatureBand {
    pub const ALL: [TemperatureBand; 4] = [
        TemperatureBand::Cold,
        TemperatureBand::Cool,
        TemperatureBand::Warm,
        TemperatureBand::Hot,
    ];

    /// Bands are half-open: below 10°, below 20°, below 28°, then hot.
    pub fn from_celsius(temp: f64) -> Self {
        if temp < 10.0 {
            TemperatureBand::Cold
        } else if temp < 20.0 {
            TemperatureBand::Cool
        } else if temp < 28.0 {
            TemperatureBand::Warm
        } else {
            TemperatureBand::Hot
        }
    }
}

/// Part of the day the window starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Day,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Morning,
        TimeOfDay::Day,
        TimeOfDay::Evening,
        TimeOfDay::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=9 => TimeOfDay::Morning,
            10..=15 => TimeOfDay::Day,
            16..=18 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

/// Labels a comment template is selected by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ConditionLabels {
    pub sky: Sky,
    pub temperature: TemperatureBand,
    pub time_of_day: TimeOfDay,
}

impl fmt::Display for ConditionLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}/{:?}/{:?}",
            self.sky, self.temperature, self.time_of_day
        )
    }
}

/// Classifier output: the labels plus the thunderstorm hazard flag.
///
/// `hazard` is independent of `labels.sky`; it only says a thunderstorm code occurs
/// somewhere in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub labels: ConditionLabels,
    pub hazard: bool,
}

/// Sky label by severity: thunder, snow, rain, strong wind, all clear, otherwise cloudy.
fn sky_label(rows: &[ForecastRow]) -> Sky {
    if rows.iter().any(|r| r.code.is_thunderstorm()) {
        Sky::Thunder
    } else if rows.iter().any(|r| r.code.is_snow()) {
        Sky::Snow
    } else if rows.iter().any(|r| r.code.is_rain()) {
        Sky::Rain
    } else if rows.iter().any(|r| r.wind_speed >= WINDY_THRESHOLD) {
        Sky::Windy
    } else if rows.iter().all(|r| r.code.is_clear()) {
        Sky::Clear
    } else {
        Sky::Cloudy
    }
}

/// Classify a window. Pure; the same rows always give the same labels.
pub fn classify(window: &ForecastWindow) -> Classification {
    let rows = window.rows();
    Classification {
        labels: ConditionLabels {
            sky: sky_label(rows),
            temperature: TemperatureBand::from_celsius(window.max_temperature()),
            time_of_day: TimeOfDay::from_hour(window.first().hour()),
        },
        hazard: rows.iter().any(|r| r.code.is_thunderstorm()),
    }
}
