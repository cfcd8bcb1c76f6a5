use std::collections::HashMap;

use async_trait::async_trait;
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Settings;
use crate::error::{ForecastError, GeocodeError};
use crate::location::{Candidate, Geocoder};
use crate::window::{ForecastSource, HourlySeries};

const HOURLY_FIELDS: &str =
    "temperature_2m,precipitation_probability,precipitation,weather_code,wind_speed_10m";

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    // Absent when nothing matched.
    #[serde(default)]
    results: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    timezone: Option<String>,
    hourly: Option<HourlyData>,
}

#[derive(Debug, Deserialize)]
struct HourlyData {
    time: Vec<String>,
    #[serde(flatten)]
    data: HashMap<String, Vec<serde_json::Value>>,
}

impl HourlyData {
    /// Remove `key` from data and deserialize its JSON array into `Vec<Option<T>>`.
    fn take_field_array<T: DeserializeOwned>(&mut self, key: &str) -> Vec<Option<T>> {
        self.data
            .remove(key)
            .and_then(|v| serde_json::from_value(serde_json::Value::Array(v)).ok())
            .unwrap_or_default()
    }
}

impl ForecastResponse {
    fn into_series(self) -> Result<HourlySeries, ForecastError> {
        let mut hourly = self.hourly.ok_or(ForecastError::MissingHourly)?;
        let timezone = self.timezone.and_then(|name| match name.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(_) => {
                warn!(timezone = %name, "forecast timezone not recognized");
                None
            }
        });
        Ok(HourlySeries {
            timezone,
            temperature: hourly.take_field_array("temperature_2m"),
            precipitation_probability: hourly.take_field_array("precipitation_probability"),
            precipitation: hourly.take_field_array("precipitation"),
            weather_code: hourly.take_field_array("weather_code"),
            wind_speed: hourly.take_field_array("wind_speed_10m"),
            time: hourly.time,
        })
    }
}

/// Client for the Open-Meteo geocoding and forecast APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteo {
    client: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
}

impl OpenMeteo {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.stage_timeout)
            .build()?;
        Ok(OpenMeteo {
            client,
            geocoding_url: settings.geocoding_url.clone(),
            forecast_url: settings.forecast_url.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for OpenMeteo {
    async fn search(
        &self,
        name: &str,
        count: u8,
        language: &str,
    ) -> Result<Vec<Candidate>, GeocodeError> {
        #[derive(Serialize)]
        struct Query<'a> {
            name: &'a str,
            count: u8,
            language: &'a str,
            format: &'a str,
        }

        let response = self
            .client
            .get(&self.geocoding_url)
            .query(&Query {
                name,
                count,
                language,
                format: "json",
            })
            .send()
            .await
            .map_err(GeocodeError::Http)?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status()));
        }

        let data: GeocodingResponse = response.json().await.map_err(GeocodeError::Payload)?;
        Ok(data.results)
    }
}

#[async_trait]
impl ForecastSource for OpenMeteo {
    async fn hourly(
        &self,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Result<HourlySeries, ForecastError> {
        #[derive(Serialize)]
        struct Query<'a> {
            latitude: f64,
            longitude: f64,
            hourly: &'a str,
            wind_speed_unit: &'a str,
            forecast_days: u8,
            timezone: &'a str,
        }

        let response = self
            .client
            .get(&self.forecast_url)
            .query(&Query {
                latitude,
                longitude,
                hourly: HOURLY_FIELDS,
                wind_speed_unit: "ms",
                // Two days so that a window starting late in the evening is complete.
                forecast_days: 2,
                timezone,
            })
            .send()
            .await
            .map_err(ForecastError::Http)?;

        if !response.status().is_success() {
            return Err(ForecastError::Status(response.status()));
        }

        let data: ForecastResponse = response.json().await.map_err(ForecastError::Payload)?;
        data.into_series()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocoding_payload_without_results_is_empty() {
        let data: GeocodingResponse =
            serde_json::from_str(r#"{"generationtime_ms": 0.5}"#).unwrap();
        assert!(data.results.is_empty());
    }

    #[test]
    fn geocoding_payload_keeps_provider_order() {
        let data: GeocodingResponse = serde_json::from_str(
            r#"{"results": [
                {"name": "大阪市", "latitude": 34.69, "longitude": 135.50,
                 "country": "日本", "admin1": "大阪府", "population": 2592413},
                {"name": "大阪", "latitude": 34.7, "longitude": 135.4}
            ]}"#,
        )
        .unwrap();
        let names: Vec<&str> = data.results.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["大阪市", "大阪"]);
    }

    #[test]
    fn forecast_payload_converts_to_series() {
        let data: ForecastResponse = serde_json::from_str(
            r#"{
                "latitude": 34.7, "longitude": 135.5, "timezone": "Asia/Tokyo",
                "hourly_units": {"temperature_2m": "°C"},
                "hourly": {
                    "time": ["2025-07-01T12:00", "2025-07-01T13:00"],
                    "temperature_2m": [30.5, 31.0],
                    "precipitation_probability": [60, null],
                    "precipitation": [1.2, 0.0],
                    "weather_code": [61, 95]
                }
            }"#,
        )
        .unwrap();
        let series = data.into_series().unwrap();
        assert_eq!(series.timezone, Some(chrono_tz::Asia::Tokyo));
        assert_eq!(series.time.len(), 2);
        assert_eq!(series.temperature, vec![Some(30.5), Some(31.0)]);
        assert_eq!(series.precipitation_probability, vec![Some(60.0), None]);
        assert_eq!(series.weather_code, vec![Some(61), Some(95)]);
        assert!(series.wind_speed.is_empty());
    }

    #[test]
    fn forecast_payload_without_hourly_is_an_error() {
        let data: ForecastResponse =
            serde_json::from_str(r#"{"timezone": "Asia/Tokyo", "error": false}"#).unwrap();
        assert!(matches!(
            data.into_series(),
            Err(ForecastError::MissingHourly)
        ));
    }

    #[test]
    fn unknown_forecast_timezone_is_dropped() {
        let data: ForecastResponse = serde_json::from_str(
            r#"{"timezone": "Mars/Olympus", "hourly": {"time": []}}"#,
        )
        .unwrap();
        assert_eq!(data.into_series().unwrap().timezone, None);
    }

    #[test]
    fn client_builds_from_default_settings() {
        assert!(OpenMeteo::new(&Settings::default()).is_ok());
    }
}
