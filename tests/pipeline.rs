use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use tenki::commentary::SAFE_COMMENT;
use tenki::error::{ForecastError, GeocodeError};
use tenki::location::{Candidate, Geocoder};
use tenki::pipeline::{DATA_FAILURE_MESSAGE, NOT_FOUND_MESSAGE};
use tenki::window::{ForecastSource, HourlySeries};
use tenki::{Briefing, Pipeline, Settings};

fn jst(hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 7, 1, hour, minute, 0)
        .unwrap()
}

fn place(name: &str, admin1: Option<&str>, population: Option<u64>) -> Candidate {
    Candidate {
        name: name.to_string(),
        latitude: 34.69,
        longitude: 135.50,
        country: Some("日本".to_string()),
        admin1: admin1.map(str::to_string),
        population,
        timezone: Some("Asia/Tokyo".to_string()),
    }
}

#[derive(Default)]
struct FakeGeocoder {
    answers: HashMap<String, Vec<Candidate>>,
    delay: Option<Duration>,
}

impl FakeGeocoder {
    fn with(mut self, name: &str, candidates: Vec<Candidate>) -> Self {
        self.answers.insert(name.to_string(), candidates);
        self
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn search(
        &self,
        name: &str,
        _count: u8,
        _language: &str,
    ) -> Result<Vec<Candidate>, GeocodeError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.answers.get(name).cloned().unwrap_or_default())
    }
}

enum FakeSource {
    Series(HourlySeries),
    Failing,
    Stalled,
}

#[async_trait]
impl ForecastSource for FakeSource {
    async fn hourly(
        &self,
        _latitude: f64,
        _longitude: f64,
        _timezone: &str,
    ) -> Result<HourlySeries, ForecastError> {
        match self {
            FakeSource::Series(series) => Ok(series.clone()),
            FakeSource::Failing => Err(ForecastError::MissingHourly),
            FakeSource::Stalled => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Err(ForecastError::MissingHourly)
            }
        }
    }
}

/// Hours 10:00 onward of 2025-07-01 in Tokyo local time, one per value.
fn hourly(temps: &[f64], codes: &[u8]) -> HourlySeries {
    HourlySeries {
        timezone: Some(chrono_tz::Asia::Tokyo),
        time: (0..temps.len())
            .map(|i| format!("2025-07-01T{:02}:00", 10 + i))
            .collect(),
        temperature: temps.iter().copied().map(Some).collect(),
        precipitation_probability: vec![Some(70.0); temps.len()],
        precipitation: vec![Some(2.5); temps.len()],
        weather_code: codes.iter().copied().map(Some).collect(),
        wind_speed: vec![Some(3.0); temps.len()],
    }
}

fn quiet_settings() -> Settings {
    Settings {
        decoration_probability: 0.0,
        stage_timeout: Duration::from_millis(200),
        ..Settings::default()
    }
}

fn osaka() -> FakeGeocoder {
    FakeGeocoder::default().with(
        "大阪",
        vec![
            place("大阪駅", None, Some(5_000_000)),
            place("大阪市", Some("大阪府"), Some(2_700_000)),
        ],
    )
}

#[tokio::test]
async fn osaka_rain_gets_kansai_comment() {
    let source = FakeSource::Series(hourly(
        &[27.0, 28.0, 29.0, 31.0, 30.0, 28.0],
        &[3, 3, 61, 61, 63, 3],
    ));
    let pipeline = Pipeline::new(osaka(), source, &quiet_settings());
    let briefing = pipeline
        .run_at("大阪", jst(11, 20), &mut StdRng::seed_from_u64(42))
        .await;

    let Briefing::Success {
        place,
        display_name,
        window,
        comment,
    } = briefing
    else {
        panic!("expected success, got {briefing:?}");
    };
    assert_eq!(place.admin1.as_deref(), Some("大阪府"));
    assert_eq!(display_name, "大阪市（大阪府・日本）");
    let hours: Vec<String> = window
        .rows()
        .iter()
        .map(|r| r.time.format("%H:%M").to_string())
        .collect();
    assert_eq!(hours, vec!["12:00", "13:00", "14:00"]);
    assert_eq!(window.max_temperature(), 31.0);
    assert!(comment.contains('傘'), "{comment}");
}

#[tokio::test]
async fn unknown_place_is_resolution_failure() {
    let source = FakeSource::Series(hourly(&[20.0; 4], &[0; 4]));
    let pipeline = Pipeline::new(FakeGeocoder::default(), source, &quiet_settings());
    let briefing = pipeline
        .run_at("ほげほげ", jst(10, 0), &mut StdRng::seed_from_u64(1))
        .await;
    assert_eq!(
        briefing,
        Briefing::ResolutionFailure {
            message: NOT_FOUND_MESSAGE.to_string()
        }
    );
}

#[tokio::test]
async fn forecast_failures_are_data_failures() {
    let expected = Briefing::DataFailure {
        message: DATA_FAILURE_MESSAGE.to_string(),
    };

    let pipeline = Pipeline::new(osaka(), FakeSource::Failing, &quiet_settings());
    let briefing = pipeline
        .run_at("大阪", jst(10, 0), &mut StdRng::seed_from_u64(1))
        .await;
    assert_eq!(briefing, expected);

    // Every row is in the past.
    let source = FakeSource::Series(hourly(&[20.0; 3], &[0; 3]));
    let pipeline = Pipeline::new(osaka(), source, &quiet_settings());
    let briefing = pipeline
        .run_at("大阪", jst(18, 0), &mut StdRng::seed_from_u64(1))
        .await;
    assert_eq!(briefing, expected);
}

#[tokio::test]
async fn stalled_stages_time_out_into_failures() {
    let pipeline = Pipeline::new(osaka(), FakeSource::Stalled, &quiet_settings());
    let briefing = pipeline
        .run_at("大阪", jst(10, 0), &mut StdRng::seed_from_u64(1))
        .await;
    assert_eq!(briefing.failure_message(), Some(DATA_FAILURE_MESSAGE));

    let geocoder = FakeGeocoder {
        delay: Some(Duration::from_secs(30)),
        ..osaka()
    };
    let source = FakeSource::Series(hourly(&[20.0; 4], &[0; 4]));
    let pipeline = Pipeline::new(geocoder, source, &quiet_settings());
    let briefing = pipeline
        .run_at("大阪", jst(10, 0), &mut StdRng::seed_from_u64(1))
        .await;
    assert_eq!(briefing.failure_message(), Some(NOT_FOUND_MESSAGE));
}

#[tokio::test]
async fn thunder_hazard_adds_clause() {
    let geocoder =
        FakeGeocoder::default().with("東京", vec![place("東京", Some("東京都"), Some(9_000_000))]);
    let source = FakeSource::Series(hourly(&[25.0, 25.0, 24.0], &[61, 95, 61]));
    let pipeline = Pipeline::new(geocoder, source, &quiet_settings());
    let briefing = pipeline
        .run_at("東京", jst(10, 0), &mut StdRng::seed_from_u64(3))
        .await;
    let Briefing::Success { comment, .. } = briefing else {
        panic!("expected success, got {briefing:?}");
    };
    let clauses = ["雷にも注意してください。", "雷鳴が聞こえたら建物の中へ避難しましょう。"];
    assert!(clauses.iter().any(|c| comment.ends_with(c)), "{comment}");
}

#[tokio::test]
async fn same_seed_same_briefing() {
    let settings = Settings {
        decoration_probability: 0.5,
        ..quiet_settings()
    };
    let series = hourly(&[15.0, 16.0, 17.0], &[0, 1, 0]);
    let pipeline = Pipeline::new(osaka(), FakeSource::Series(series), &settings);

    let (mut rng_a, mut rng_b) = (StdRng::seed_from_u64(9), StdRng::seed_from_u64(9));
    let (first, second) = tokio::join!(
        pipeline.run_at("大阪", jst(10, 0), &mut rng_a),
        pipeline.run_at("大阪", jst(10, 0), &mut rng_b),
    );
    assert!(first.is_success());
    assert_eq!(first, second);
}

#[tokio::test]
async fn coordinate_query_skips_geocoding() {
    let source = FakeSource::Series(hourly(&[5.0, 4.0, 3.0], &[71, 73, 3]));
    let pipeline = Pipeline::new(FakeGeocoder::default(), source, &quiet_settings());
    let briefing = pipeline
        .run_at("43.06,141.35", jst(10, 0), &mut StdRng::seed_from_u64(5))
        .await;
    let Briefing::Success {
        display_name,
        comment,
        ..
    } = briefing
    else {
        panic!("expected success, got {briefing:?}");
    };
    assert_eq!(display_name, "43.06,141.35");
    assert!(!comment.is_empty());
}

/// Random source that fails on first use.
struct BrokenRng;

impl RngCore for BrokenRng {
    fn next_u32(&mut self) -> u32 {
        panic!("random source unavailable")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("random source unavailable")
    }

    fn fill_bytes(&mut self, _dst: &mut [u8]) {
        panic!("random source unavailable")
    }
}

#[tokio::test]
async fn synthesis_fault_falls_back_to_safe_comment() {
    let settings = Settings {
        decoration_probability: 0.5,
        ..quiet_settings()
    };
    let source = FakeSource::Series(hourly(&[29.0, 31.0, 30.0], &[61, 61, 63]));
    let pipeline = Pipeline::new(osaka(), source, &settings);
    let briefing = pipeline.run_at("大阪", jst(10, 0), &mut BrokenRng).await;

    let Briefing::Success { comment, window, .. } = briefing else {
        panic!("expected success, got {briefing:?}");
    };
    assert_eq!(comment, SAFE_COMMENT);
    assert_eq!(window.len(), 3);
}
