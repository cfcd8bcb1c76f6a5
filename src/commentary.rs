//! Regional comment selection.
//!
//! A comment is picked from the first non-empty layer of [`Layer::CHAIN`]: the exact
//! regional template, the same template in the neutral cluster, then a sentence keyed
//! by sky alone. When even that is missing, [`SAFE_COMMENT`] is used, so a comment is
//! never empty.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::classify::{ConditionLabels, Sky, TemperatureBand, TimeOfDay};
use crate::region::RegionKey;
use crate::templates::{builtin_bank, DECORATIONS, SAFE_THUNDER_CLAUSE};

pub use crate::templates::SAFE_COMMENT;

/// Full key of a regional template.
pub type TemplateKey = (RegionKey, Sky, TemperatureBand, TimeOfDay);

/// Read-only sentence sets. Every stored set is non-empty.
#[derive(Debug, Clone, Default)]
pub struct TemplateBank {
    sentences: HashMap<TemplateKey, Vec<String>>,
    generic: HashMap<Sky, Vec<String>>,
    thunder: HashMap<RegionKey, Vec<String>>,
}

static BUILTIN: LazyLock<Arc<TemplateBank>> = LazyLock::new(|| Arc::new(builtin_bank()));

fn non_empty<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(Into::into)
        .filter(|s: &String| !s.trim().is_empty())
        .collect()
}

fn extend<K: std::hash::Hash + Eq>(map: &mut HashMap<K, Vec<String>>, key: K, items: Vec<String>) {
    if !items.is_empty() {
        map.entry(key).or_default().extend(items);
    }
}

impl TemplateBank {
    /// The bank shipped with the crate, built on first use.
    pub fn builtin() -> Arc<TemplateBank> {
        Arc::clone(&BUILTIN)
    }

    /// Add sentences for one exact template key. Blank sentences are dropped.
    pub fn with_sentences<I, S>(mut self, key: TemplateKey, sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.sentences, key, non_empty(sentences));
        self
    }

    /// Add sky-only sentences.
    pub fn with_generic<I, S>(mut self, sky: Sky, sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.generic, sky, non_empty(sentences));
        self
    }

    /// Add thunder hazard clauses for a region.
    pub fn with_thunder_clauses<I, S>(mut self, region: RegionKey, clauses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend(&mut self.thunder, region, non_empty(clauses));
        self
    }

    pub fn sentences(&self, key: &TemplateKey) -> Option<&[String]> {
        self.sentences.get(key).map(Vec::as_slice)
    }

    pub fn generic(&self, sky: Sky) -> Option<&[String]> {
        self.generic.get(&sky).map(Vec::as_slice)
    }

    pub fn thunder_clauses(&self, region: RegionKey) -> Option<&[String]> {
        self.thunder.get(&region).map(Vec::as_slice)
    }
}

/// One step of the template fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Exact (region, sky, temperature, time-of-day) match.
    Regional,
    /// Same labels in the neutral cluster.
    Neutral,
    /// Sentence keyed by sky only.
    GenericSky,
}

impl Layer {
    pub const CHAIN: [Layer; 3] = [Layer::Regional, Layer::Neutral, Layer::GenericSky];
}

/// Picks comment text from a [`TemplateBank`].
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'a> {
    bank: &'a TemplateBank,
    decoration_probability: f64,
}

impl<'a> Synthesizer<'a> {
    /// A synthesizer that never decorates.
    pub fn new(bank: &'a TemplateBank) -> Self {
        Synthesizer {
            bank,
            decoration_probability: 0.0,
        }
    }

    /// Append a decoration with the given probability, clamped to 0..=1.
    pub fn with_decoration(mut self, probability: f64) -> Self {
        self.decoration_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    /// Candidate sentences a single layer offers for the labels.
    pub fn candidates(
        &self,
        layer: Layer,
        labels: &ConditionLabels,
        region: RegionKey,
    ) -> Option<&'a [String]> {
        let key_for = |region| (region, labels.sky, labels.temperature, labels.time_of_day);
        match layer {
            Layer::Regional => self.bank.sentences(&key_for(region)),
            Layer::Neutral => self.bank.sentences(&key_for(RegionKey::NEUTRAL)),
            Layer::GenericSky => self.bank.generic(labels.sky),
        }
    }

    fn thunder_clause<R: Rng + ?Sized>(&self, region: RegionKey, rng: &mut R) -> &'a str {
        self.bank
            .thunder_clauses(region)
            .or_else(|| self.bank.thunder_clauses(RegionKey::NEUTRAL))
            .and_then(|clauses| clauses.choose(rng))
            .map_or(SAFE_THUNDER_CLAUSE, String::as_str)
    }

    /// Produce a comment for the labels. Never empty.
    ///
    /// With `hazard` set, a thunder clause is appended whatever sky label won, so a
    /// stormy window is never described as plain rain.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        labels: &ConditionLabels,
        region: RegionKey,
        hazard: bool,
        rng: &mut R,
    ) -> String {
        let chosen = Layer::CHAIN.iter().find_map(|&layer| {
            let sentence = self.candidates(layer, labels, region)?.choose(rng)?;
            Some((layer, sentence))
        });
        let mut comment = match chosen {
            Some((layer, sentence)) => {
                debug!(?layer, %labels, ?region, "comment template selected");
                sentence.clone()
            }
            None => {
                debug!(%labels, ?region, "no template matched");
                SAFE_COMMENT.to_string()
            }
        };

        if hazard {
            comment.push_str(self.thunder_clause(region, rng));
        }
        if self.decoration_probability > 0.0 && rng.random_bool(self.decoration_probability) {
            if let Some(decoration) = DECORATIONS.choose(rng) {
                comment.push_str(decoration);
            }
        }
        comment
    }
}
