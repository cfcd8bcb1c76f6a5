use std::sync::LazyLock;

use async_trait::async_trait;
use itertools::Itertools;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::data::ResolvedPlace;
use crate::error::{GeocodeError, ResolveError};
use crate::gazetteer::{alias, has_admin_suffix, romanize, CITY_SUFFIX};

/// Queries up to this many characters get a city-suffixed trial.
const SHORT_QUERY_CHARS: usize = 4;

/// A place returned by a geocoding search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: Option<String>,
    pub admin1: Option<String>,
    pub population: Option<u64>,
    pub timezone: Option<String>,
}

impl Candidate {
    /// A settlement-level result rather than a bare point of interest.
    fn is_settlement(&self) -> bool {
        let present = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.admin1) && present(&self.country)
    }
}

impl From<Candidate> for ResolvedPlace {
    fn from(c: Candidate) -> Self {
        ResolvedPlace {
            name: c.name,
            latitude: c.latitude,
            longitude: c.longitude,
            country: c.country.unwrap_or_default(),
            admin1: c.admin1.filter(|a| !a.is_empty()),
            timezone: c.timezone.filter(|tz| !tz.is_empty()),
        }
    }
}

/// Free-text place search.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Return up to `count` candidates for `name`, best match first, named in `language`.
    async fn search(
        &self,
        name: &str,
        count: u8,
        language: &str,
    ) -> Result<Vec<Candidate>, GeocodeError>;
}

/// Parse a coordinate string in "latitude,longitude" format.
///
/// Returns `None` if the string doesn't match the expected format or if
/// coordinates are out of valid ranges (latitude: -90 to 90, longitude: -180 to 180).
fn parse_coordinates(s: &str) -> Option<ResolvedPlace> {
    static COORD_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r#"(?x)
            ^
            \s*
            (-?\d+(?:\.\d+)?)   # latitude: decimal number
            \s*[,，]\s*
            (-?\d+(?:\.\d+)?)   # longitude: decimal number
            \s*
            $
        "#,
        )
        .unwrap()
    });

    let caps = COORD_RE.captures(s)?;
    let latitude: f64 = caps[1].parse().ok()?;
    let longitude: f64 = caps[2].parse().ok()?;

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }

    Some(ResolvedPlace {
        name: s.trim().to_string(),
        latitude,
        longitude,
        country: String::new(),
        admin1: None,
        timezone: None,
    })
}

/// Expand a query into the ordered, de-duplicated list of geocoding trials.
///
/// The order is: the query as typed, its alias substitution, the query with a city
/// suffix (short queries without an administrative ending only), its romanization.
pub fn search_trials(query: &str) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let suffixed = (query.chars().count() <= SHORT_QUERY_CHARS && !has_admin_suffix(query))
        .then(|| format!("{query}{CITY_SUFFIX}"));

    std::iter::once(query.to_string())
        .chain(alias(query).map(str::to_string))
        .chain(suffixed)
        .chain(romanize(query).map(str::to_string))
        .unique()
        .collect()
}

/// Pick the best candidate from one search result.
///
/// Settlements (candidates carrying both an admin region and a country) win over bare
/// points of interest; among them the most populous wins, ties keeping provider order.
/// Without any settlement, the provider's first candidate is used.
pub fn select_candidate(candidates: Vec<Candidate>) -> Option<Candidate> {
    let best_settlement = candidates
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_settlement())
        .min_by_key(|(_, c)| std::cmp::Reverse(c.population.unwrap_or(0)))
        .map(|(idx, _)| idx);
    let idx = best_settlement.unwrap_or(0);
    candidates.into_iter().nth(idx)
}

/// Resolves place queries through a sequence of geocoding trials.
pub struct Resolver<G> {
    geocoder: G,
    count: u8,
    language: String,
}

impl<G: Geocoder> Resolver<G> {
    pub fn new(geocoder: G, settings: &Settings) -> Self {
        Resolver {
            geocoder,
            count: settings.candidate_count,
            language: settings.language.clone(),
        }
    }

    /// Resolve a query to a single place.
    ///
    /// A "latitude,longitude" pair resolves directly. Otherwise each trial from
    /// [`search_trials`] is searched in turn until one yields a candidate. A failing
    /// search counts as an empty one.
    pub async fn resolve(&self, query: &str) -> Result<ResolvedPlace, ResolveError> {
        if let Some(place) = parse_coordinates(query) {
            debug!(query, "query is a coordinate pair");
            return Ok(place);
        }

        for trial in search_trials(query) {
            debug!(query, trial = %trial, "geocoding trial");
            let candidates = match self
                .geocoder
                .search(&trial, self.count, &self.language)
                .await
            {
                Ok(candidates) => candidates,
                Err(err) => {
                    warn!(trial = %trial, error = %err, "geocoding trial failed");
                    continue;
                }
            };
            let found = candidates.len();
            if let Some(candidate) = select_candidate(candidates) {
                info!(
                    query,
                    trial = %trial,
                    candidates = found,
                    name = %candidate.name,
                    admin1 = candidate.admin1.as_deref().unwrap_or(""),
                    "resolved location"
                );
                return Ok(candidate.into());
            }
        }

        Err(ResolveError::NotFound {
            query: query.trim().to_string(),
        })
    }
}
