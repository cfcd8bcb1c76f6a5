//! Error types for the briefing pipeline stages.

use reqwest::StatusCode;
use thiserror::Error;

/// A geocoding search that produced no usable answer.
///
/// The resolver treats every variant as "no results" for the trial that raised it.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("geocoding API error: {0}")]
    Status(StatusCode),

    #[error("geocoding payload could not be parsed: {0}")]
    Payload(#[source] reqwest::Error),
}

/// Failure to obtain an hourly series from the forecast provider.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("forecast request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("forecast API error: {0}")]
    Status(StatusCode),

    #[error("forecast payload could not be parsed: {0}")]
    Payload(#[source] reqwest::Error),

    #[error("forecast payload has no hourly block")]
    MissingHourly,
}

/// The resolver could not turn a query into a place.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no geocoding candidate for {query:?}")]
    NotFound { query: String },

    #[error("location resolution timed out")]
    TimedOut,
}

/// The windower could not produce a non-empty forecast window.
#[derive(Error, Debug)]
pub enum WindowError {
    #[error(transparent)]
    Source(#[from] ForecastError),

    #[error("forecast fetch timed out")]
    TimedOut,

    #[error("no forecast rows at or after the current hour")]
    NoRows,
}

/// Rejected settings.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid setting `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

impl ConfigError {
    pub fn invalid<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
