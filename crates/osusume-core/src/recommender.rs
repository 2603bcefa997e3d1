//! # Recommendation Facade
//!
//! Single entry point composing parser, engine and formatter:
//! raw text → criteria → candidate pool → selection → text.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, error};

use crate::catalog::{CatalogHandle, CatalogStore};
use crate::config::RecommenderConfig;
use crate::engine::{recommend, RandomSource, SeededRandom, SelectionLimits};
use crate::error::Result;
use crate::format::Formatter;
use crate::parser::CriteriaParser;
use crate::types::{QueryCriteria, RecommendationResult};

/// Answer returned when an internal fault interrupts a request.
pub const FAILURE_MESSAGE: &str =
    "Sorry, something went wrong while looking for recommendations. Please try again.";

/// Conversational anime recommender.
///
/// Holds the published catalog and the compiled parser. Requests share no
/// mutable state, so one instance can serve concurrent callers.
pub struct Recommender {
    catalog: CatalogHandle,
    parser: CriteriaParser,
    formatter: Formatter,
    limits: SelectionLimits,
    seed: Option<u64>,
}

impl Recommender {
    /// Create a recommender over `catalog`.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::InvalidConfig` if the configuration fails
    /// validation.
    pub fn new(catalog: CatalogStore, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog: CatalogHandle::new(catalog),
            parser: CriteriaParser::new(&config.vocabulary)?,
            formatter: Formatter::new(config.synopsis_limit),
            limits: SelectionLimits::from(&config),
            seed: config.seed,
        })
    }

    /// Create a recommender with the default configuration.
    pub fn with_defaults(catalog: CatalogStore) -> Result<Self> {
        Self::new(catalog, RecommenderConfig::default())
    }

    /// The currently published catalog.
    pub fn catalog(&self) -> Arc<CatalogStore> {
        self.catalog.snapshot()
    }

    /// Publishes a freshly loaded catalog; in-flight requests are unaffected.
    pub fn reload(&self, catalog: CatalogStore) -> Arc<CatalogStore> {
        self.catalog.publish(catalog)
    }

    /// Parses a query against the current catalog.
    pub fn parse(&self, raw: &str) -> QueryCriteria {
        self.parser.parse(raw, &self.catalog.snapshot())
    }

    /// Structured recommendations for `raw`.
    ///
    /// Sampling uses the configured seed when set, otherwise a fresh
    /// entropy seed, so repeated calls may differ.
    pub fn recommend(&self, raw: &str) -> RecommendationResult {
        let mut rng = SeededRandom::from_optional_seed(self.seed);
        self.recommend_with(raw, &mut rng)
    }

    /// Structured recommendations for `raw` using the given random source.
    pub fn recommend_with<R: RandomSource + ?Sized>(
        &self,
        raw: &str,
        rng: &mut R,
    ) -> RecommendationResult {
        let catalog = self.catalog.snapshot();
        let criteria = self.parser.parse(raw, &catalog);
        recommend(&criteria, &catalog, self.limits, rng)
    }

    /// Renders a result with the configured synopsis budget.
    pub fn format(&self, result: &RecommendationResult) -> String {
        self.formatter.format(result)
    }

    /// Answers a free-text query.
    ///
    /// Always returns text: no matches yield a friendly message and any
    /// internal fault yields [`FAILURE_MESSAGE`].
    pub fn answer(&self, raw: &str) -> String {
        self.guarded(raw, || self.format(&self.recommend(raw)))
    }

    /// Like [`answer`](Self::answer) with an explicit random source.
    pub fn answer_with<R: RandomSource + ?Sized>(&self, raw: &str, rng: &mut R) -> String {
        self.guarded(raw, || self.format(&self.recommend_with(raw, rng)))
    }

    fn guarded(&self, raw: &str, run: impl FnOnce() -> String) -> String {
        match panic::catch_unwind(AssertUnwindSafe(run)) {
            Ok(text) => {
                debug!(query = raw, bytes = text.len(), "answered query");
                text
            }
            Err(cause) => {
                let reason = cause
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| cause.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(query = raw, %reason, "recommendation failed");
                FAILURE_MESSAGE.to_string()
            }
        }
    }
}
