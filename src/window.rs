use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::config::Settings;
use crate::data::{ForecastRow, ForecastWindow, ResolvedPlace, WmoCode};
use crate::error::{ForecastError, WindowError};

/// Hourly forecast columns as parallel arrays keyed by index.
///
/// Value arrays may be shorter than `time` or contain gaps; absent values are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    /// Zone that naive timestamps in `time` are expressed in.
    pub timezone: Option<Tz>,
    pub time: Vec<String>,
    pub temperature: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub weather_code: Vec<Option<u8>>,
    pub wind_speed: Vec<Option<f64>>,
}

/// Source of hourly forecast series.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Fetch the hourly series for a point, with local times in `timezone`.
    async fn hourly(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<HourlySeries, ForecastError>;
}

/// Parse a provider timestamp and normalize it to `display_tz`.
///
/// RFC 3339 timestamps carry their own offset. Naive `YYYY-MM-DDTHH:MM[:SS]` timestamps
/// are interpreted in `series_tz`; local times skipped by a DST transition are rejected.
fn parse_timestamp(s: &str, series_tz: Tz, display_tz: Tz) -> Option<DateTime<FixedOffset>> {
    let instant = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => {
            let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
                .ok()?;
            series_tz
                .from_local_datetime(&naive)
                .earliest()?
                .with_timezone(&Utc)
        }
    };
    Some(instant.with_timezone(&display_tz).fixed_offset())
}

fn value_at<T: Copy>(values: &[Option<T>], idx: usize) -> Option<T> {
    values.get(idx).copied().flatten()
}

/// Extract up to `size` rows at or after `now` from an hourly series.
///
/// Entries with an unparseable timestamp or no temperature are skipped. Missing
/// probability, amount, code and wind values default to zero. Returns `None` when no
/// entry qualifies.
pub fn extract_window(
    series: &HourlySeries,
    series_tz: Tz,
    display_tz: Tz,
    now: DateTime<FixedOffset>,
    size: usize,
) -> Option<ForecastWindow> {
    let rows = series
        .time
        .iter()
        .enumerate()
        .filter_map(|(idx, ts)| {
            let time = parse_timestamp(ts, series_tz, display_tz)?;
            if time < now {
                return None;
            }
            let temperature = value_at(&series.temperature, idx).filter(|t| t.is_finite())?;
            let probability = value_at(&series.precipitation_probability, idx).unwrap_or(0.0);
            Some(ForecastRow {
                time,
                temperature,
                precipitation_probability: probability.round().clamp(0.0, 100.0) as u8,
                precipitation: value_at(&series.precipitation, idx)
                    .unwrap_or(0.0)
                    .max(0.0),
                code: WmoCode(value_at(&series.weather_code, idx).unwrap_or(0)),
                wind_speed: value_at(&series.wind_speed, idx).unwrap_or(0.0).max(0.0),
            })
        })
        .take(size)
        .collect();
    ForecastWindow::new(rows)
}

/// Fetches forecasts and cuts them down to the upcoming window.
pub struct Windower<F> {
    source: F,
    display_tz: Tz,
    fallback_tz: Tz,
}

impl<F: ForecastSource> Windower<F> {
    pub fn new(source: F, settings: &Settings) -> Self {
        Windower {
            source,
            display_tz: settings.display_tz,
            fallback_tz: settings.fallback_tz,
        }
    }

    /// The next `size` hourly rows for `place`, starting at the current instant.
    pub async fn window(
        &self,
        place: &ResolvedPlace,
        size: usize,
    ) -> Result<ForecastWindow, WindowError> {
        let now = Utc::now().with_timezone(&self.display_tz).fixed_offset();
        self.window_at(place, size, now).await
    }

    /// Same as [`Windower::window`] with an explicit "now".
    pub async fn window_at(
        &self,
        place: &ResolvedPlace,
        size: usize,
        now: DateTime<FixedOffset>,
    ) -> Result<ForecastWindow, WindowError> {
        let place_tz = place
            .timezone
            .as_deref()
            .and_then(|name| name.parse::<Tz>().ok())
            .unwrap_or(self.fallback_tz);

        let series = self
            .source
            .hourly(place.latitude, place.longitude, place_tz.name())
            .await?;
        let series_tz = series.timezone.unwrap_or(place_tz);
        debug!(
            entries = series.time.len(),
            timezone = series_tz.name(),
            "received hourly series"
        );

        let window = extract_window(&series, series_tz, self.display_tz, now, size)
            .ok_or(WindowError::NoRows)?;
        info!(
            rows = window.len(),
            first = %window.first().time,
            "extracted forecast window"
        );
        Ok(window)
    }
}
