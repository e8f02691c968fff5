//! Resolves every catalog instructor to a rating record.
//!
//! Names are processed one at a time with a fixed pause between them. A
//! failed lookup only costs that one instructor; the batch always runs to
//! the end and the caller persists whatever was found.

use crate::fetcher::RatingsSource;
use crate::models::{RatingRecord, RatingsMapping};
use crate::overrides::OverrideTable;
use std::fmt;
use std::time::Duration;

/// Picks which search candidate (if any) to accept for an instructor
pub trait CandidateSelector: Send + Sync {
    fn select(&self, name: &str, candidates: Vec<RatingRecord>) -> Option<RatingRecord>;
}

/// Accepts the service's top-ranked result without further checks
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCandidate;

impl CandidateSelector for FirstCandidate {
    fn select(&self, _name: &str, candidates: Vec<RatingRecord>) -> Option<RatingRecord> {
        candidates.into_iter().next()
    }
}

/// How one instructor was resolved
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Found through the id override table
    Override(RatingRecord),
    /// Found through name search
    Found(RatingRecord),
    NoMatch,
    Error(String),
}

impl Outcome {
    pub fn record(&self) -> Option<&RatingRecord> {
        match self {
            Outcome::Override(record) | Outcome::Found(record) => Some(record),
            Outcome::NoMatch | Outcome::Error(_) => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Override(r) => {
                write!(f, "found (override): {} ({})", r.full_name(), r.avg_rating)
            }
            Outcome::Found(r) => write!(f, "found: {} ({})", r.full_name(), r.avg_rating),
            Outcome::NoMatch => write!(f, "no results"),
            Outcome::Error(msg) => write!(f, "error: {}", msg),
        }
    }
}

/// Result of one batch run
#[derive(Debug, Default)]
pub struct UpdateReport {
    pub mapping: RatingsMapping,
    pub outcomes: Vec<(String, Outcome)>,
}

impl UpdateReport {
    pub fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

pub struct RatingsUpdater<S> {
    source: S,
    overrides: OverrideTable,
    delay: Duration,
    selector: Box<dyn CandidateSelector>,
}

impl<S: RatingsSource> RatingsUpdater<S> {
    pub fn new(source: S, overrides: OverrideTable, delay: Duration) -> Self {
        Self {
            source,
            overrides,
            delay,
            selector: Box::new(FirstCandidate),
        }
    }

    pub fn with_selector(mut self, selector: impl CandidateSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Build a fresh mapping for `names`
    pub async fn build_mapping<I>(&self, names: I) -> RatingsMapping
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.build_report(names).await.mapping
    }

    /// Build a fresh mapping for `names`, keeping every per-name outcome
    pub async fn build_report<I>(&self, names: I) -> UpdateReport
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut report = UpdateReport::default();

        for name in names {
            let name = name.as_ref();

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let outcome = self.resolve(name).await;
            match &outcome {
                Outcome::Error(msg) => {
                    tracing::warn!(instructor = %name, error = %msg, "lookup failed")
                }
                Outcome::NoMatch => tracing::info!(instructor = %name, "no results found"),
                other => tracing::info!(instructor = %name, "{}", other),
            }

            if let Some(record) = outcome.record() {
                report.mapping.insert(name.to_string(), record.clone());
            }
            report.outcomes.push((name.to_string(), outcome));
        }

        tracing::info!(
            resolved = report.mapping.len(),
            overrides = report.count(|o| matches!(o, Outcome::Override(_))),
            no_match = report.count(|o| matches!(o, Outcome::NoMatch)),
            errors = report.count(|o| matches!(o, Outcome::Error(_))),
            "ratings lookup finished"
        );

        report
    }

    /// Resolve a single instructor: id override first, then name search
    pub async fn resolve(&self, name: &str) -> Outcome {
        if let Some(legacy_id) = self.overrides.resolve_known_id(name) {
            tracing::debug!(instructor = %name, legacy_id, "fetching override id");
            match self.source.fetch_by_id(legacy_id).await {
                Ok(Some(record)) => return Outcome::Override(record),
                Ok(None) => {
                    tracing::info!(instructor = %name, legacy_id, "override id not found")
                }
                Err(e) => return Outcome::Error(e.to_string()),
            }
        }

        let search_name = self.overrides.resolve_search_name(name);
        tracing::debug!(instructor = %name, search = %search_name, "searching");
        match self.source.search_by_name(search_name).await {
            Ok(candidates) => match self.selector.select(name, candidates) {
                Some(record) => Outcome::Found(record),
                None => Outcome::NoMatch,
            },
            Err(e) => Outcome::Error(e.to_string()),
        }
    }
}
