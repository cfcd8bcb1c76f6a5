//! Query-to-briefing orchestration.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

use crate::classify::classify;
use crate::commentary::{Synthesizer, TemplateBank, SAFE_COMMENT};
use crate::config::Settings;
use crate::data::{ForecastWindow, ResolvedPlace};
use crate::error::{ResolveError, WindowError};
use crate::fetch::OpenMeteo;
use crate::location::{Geocoder, Resolver};
use crate::region::RegionKey;
use crate::window::{ForecastSource, Windower};

/// Shown when no geocoding trial finds the place.
pub const NOT_FOUND_MESSAGE: &str = "場所が見つからへんかったで。別の表記でもう一回試してな。\
     例：東京/大阪/札幌/京都市・USJ・東京ディズニーランド など";

/// Shown when the forecast cannot be fetched or has nothing upcoming.
pub const DATA_FAILURE_MESSAGE: &str =
    "天気データの取得に失敗したわ。ちょっと時間をおいて再試行してな。";

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Briefing {
    Success {
        place: ResolvedPlace,
        display_name: String,
        window: ForecastWindow,
        comment: String,
    },
    ResolutionFailure {
        message: String,
    },
    DataFailure {
        message: String,
    },
}

impl Briefing {
    fn resolution_failure() -> Self {
        Briefing::ResolutionFailure {
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    fn data_failure() -> Self {
        Briefing::DataFailure {
            message: DATA_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Briefing::Success { .. })
    }

    /// The user-facing failure text, if this is a failure.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Briefing::Success { .. } => None,
            Briefing::ResolutionFailure { message } | Briefing::DataFailure { message } => {
                Some(message)
            }
        }
    }
}

async fn with_timeout<T, E>(
    limit: Duration,
    fut: impl Future<Output = Result<T, E>>,
    timed_out: E,
) -> Result<T, E> {
    tokio::time::timeout(limit, fut)
        .await
        .unwrap_or(Err(timed_out))
}

/// Resolves a query, fetches its window and comments on it.
///
/// A pipeline holds no mutable state; one instance can serve any number of concurrent
/// runs.
pub struct Pipeline<G, F> {
    resolver: Resolver<G>,
    windower: Windower<F>,
    bank: Arc<TemplateBank>,
    window_hours: usize,
    stage_timeout: Duration,
    decoration_probability: f64,
}

impl Pipeline<OpenMeteo, OpenMeteo> {
    /// A pipeline backed by the Open-Meteo APIs.
    pub fn open_meteo(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = OpenMeteo::new(settings)?;
        Ok(Pipeline::new(client.clone(), client, settings))
    }
}

impl<G: Geocoder, F: ForecastSource> Pipeline<G, F> {
    pub fn new(geocoder: G, source: F, settings: &Settings) -> Self {
        Pipeline {
            resolver: Resolver::new(geocoder, settings),
            windower: Windower::new(source, settings),
            bank: TemplateBank::builtin(),
            window_hours: settings.window_hours,
            stage_timeout: settings.stage_timeout,
            decoration_probability: settings.decoration_probability,
        }
    }

    /// Replace the built-in template bank.
    pub fn with_bank(mut self, bank: Arc<TemplateBank>) -> Self {
        self.bank = bank;
        self
    }

    /// Run once for `query` with an entropy-seeded RNG.
    pub async fn run(&self, query: &str) -> Briefing {
        let mut rng = StdRng::from_os_rng();
        self.run_with_rng(query, &mut rng).await
    }

    /// Run once for `query`, drawing comment choices from `rng`.
    pub async fn run_with_rng<R: Rng + ?Sized>(&self, query: &str, rng: &mut R) -> Briefing {
        self.run_at(query, Utc::now().fixed_offset(), rng).await
    }

    /// Run once with an explicit "now" for the forecast window.
    pub async fn run_at<R: Rng + ?Sized>(
        &self,
        query: &str,
        now: DateTime<FixedOffset>,
        rng: &mut R,
    ) -> Briefing {
        let place = match with_timeout(
            self.stage_timeout,
            self.resolver.resolve(query),
            ResolveError::TimedOut,
        )
        .await
        {
            Ok(place) => place,
            Err(err) => {
                info!(query, error = %err, "location not resolved");
                return Briefing::resolution_failure();
            }
        };

        let window = match with_timeout(
            self.stage_timeout,
            self.windower.window_at(&place, self.window_hours, now),
            WindowError::TimedOut,
        )
        .await
        {
            Ok(window) => window,
            Err(err) => {
                warn!(place = %place.name, error = %err, "forecast unavailable");
                return Briefing::data_failure();
            }
        };

        let comment = self.comment(&place, &window, rng);
        Briefing::Success {
            display_name: place.display_name(),
            place,
            window,
            comment,
        }
    }

    /// Classify and synthesize. A panic in either step yields [`SAFE_COMMENT`].
    fn comment<R: Rng + ?Sized>(
        &self,
        place: &ResolvedPlace,
        window: &ForecastWindow,
        rng: &mut R,
    ) -> String {
        let region = RegionKey::from_admin1(place.admin1.as_deref());
        let synthesizer =
            Synthesizer::new(&self.bank).with_decoration(self.decoration_probability);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let classification = classify(window);
            info!(
                labels = %classification.labels,
                hazard = classification.hazard,
                ?region,
                "classified window"
            );
            synthesizer.synthesize(&classification.labels, region, classification.hazard, rng)
        }));
        match outcome {
            Ok(comment) if !comment.trim().is_empty() => comment,
            Ok(_) => SAFE_COMMENT.to_string(),
            Err(_) => {
                warn!(place = %place.name, "comment synthesis panicked");
                SAFE_COMMENT.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::ForecastError;
    use crate::location::tests::{candidate, TableGeocoder};
    use crate::window::tests::{jst, series};
    use crate::window::HourlySeries;

    struct StaticSource(HourlySeries);

    #[async_trait]
    impl ForecastSource for StaticSource {
        async fn hourly(&self, _: f64, _: f64, _: &str) -> Result<HourlySeries, ForecastError> {
            Ok(self.0.clone())
        }
    }

    fn osaka_geocoder() -> TableGeocoder {
        TableGeocoder::default().with(
            "大阪市",
            vec![candidate("大阪市", Some("大阪府"), Some("日本"), Some(2_700_000))],
        )
    }

    #[tokio::test]
    async fn success_carries_display_name_and_window() {
        let source = StaticSource(series(12, &[29.0, 31.0, 30.0, 28.0]));
        let pipeline = Pipeline::new(osaka_geocoder(), source, &Settings::default());
        let briefing = pipeline
            .run_at("大阪", jst(11, 30), &mut StdRng::seed_from_u64(1))
            .await;
        let Briefing::Success {
            display_name,
            window,
            comment,
            ..
        } = briefing
        else {
            panic!("expected success, got {briefing:?}");
        };
        assert_eq!(display_name, "大阪市（大阪府・日本）");
        assert_eq!(window.len(), 3);
        assert!(comment.contains('傘'), "{comment}");
    }

    #[tokio::test]
    async fn empty_bank_still_comments() {
        let source = StaticSource(series(12, &[20.0]));
        let pipeline = Pipeline::new(osaka_geocoder(), source, &Settings::default())
            .with_bank(Arc::new(TemplateBank::default()));
        let briefing = pipeline
            .run_at("大阪", jst(12, 0), &mut StdRng::seed_from_u64(1))
            .await;
        match briefing {
            Briefing::Success { comment, .. } => assert!(comment.starts_with(SAFE_COMMENT)),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn briefing_json_is_tagged() {
        let json = serde_json::to_value(Briefing::data_failure()).unwrap();
        assert_eq!(json["outcome"], "data_failure");
        assert_eq!(json["message"], DATA_FAILURE_MESSAGE);
        assert_eq!(
            Briefing::resolution_failure().failure_message(),
            Some(NOT_FOUND_MESSAGE)
        );
    }
}
