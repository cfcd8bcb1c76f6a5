//! Runtime settings shared by the pipeline stages.

use std::time::Duration;

use chrono_tz::Tz;

use crate::data::DEFAULT_WINDOW_HOURS;
use crate::error::ConfigError;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Pipeline settings. `Default` yields the production configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub geocoding_url: String,
    pub forecast_url: String,
    /// Language tag for geocoding result names.
    pub language: String,
    /// Number of geocoding candidates requested per trial.
    pub candidate_count: u8,
    /// Zone all forecast timestamps are normalized to.
    pub display_tz: Tz,
    /// Zone requested from the forecast provider when the place has none.
    pub fallback_tz: Tz,
    pub window_hours: usize,
    /// Applies separately to resolution and to forecast retrieval.
    pub stage_timeout: Duration,
    /// Chance of appending a decorative suffix to a comment.
    pub decoration_probability: f64,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            language: "ja".to_string(),
            candidate_count: 10,
            display_tz: chrono_tz::Asia::Tokyo,
            fallback_tz: chrono_tz::Asia::Tokyo,
            window_hours: DEFAULT_WINDOW_HOURS,
            stage_timeout: Duration::from_secs(15),
            decoration_probability: 0.3,
            user_agent: concat!("tenki/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in [
            ("geocoding_url", &self.geocoding_url),
            ("forecast_url", &self.forecast_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::invalid(field, "must be an HTTP or HTTPS URL"));
            }
        }
        if self.language.is_empty() {
            return Err(ConfigError::invalid("language", "must not be empty"));
        }
        if self.candidate_count == 0 {
            return Err(ConfigError::invalid("candidate_count", "must be at least 1"));
        }
        if self.window_hours == 0 {
            return Err(ConfigError::invalid("window_hours", "must be at least 1"));
        }
        if self.stage_timeout.is_zero() {
            return Err(ConfigError::invalid("stage_timeout", "must be positive"));
        }
        if !(0.0..=1.0).contains(&self.decoration_probability) {
            return Err(ConfigError::invalid(
                "decoration_probability",
                format!("{} is outside 0..=1", self.decoration_probability),
            ));
        }
        Ok(())
    }
}
