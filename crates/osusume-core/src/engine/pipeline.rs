use std::sync::Arc;

use tracing::debug;

use super::filter::{candidate_pool, order_pool};
use super::random::{sample_positions, RandomSource};
use crate::catalog::CatalogStore;
use crate::config::{RecommenderConfig, DEFAULT_CAP, DEFAULT_POOL_CEILING};
use crate::types::{AnimeRecord, QueryCriteria, RecommendationResult, ResultKind, UNKNOWN};

/// Bounds applied when selecting from the ordered pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    /// Maximum number of records returned.
    pub cap: usize,
    /// Number of top-ordered candidates eligible for sampling.
    pub pool_ceiling: usize,
}

impl Default for SelectionLimits {
    fn default() -> Self {
        Self {
            cap: DEFAULT_CAP,
            pool_ceiling: DEFAULT_POOL_CEILING,
        }
    }
}

impl From<&RecommenderConfig> for SelectionLimits {
    fn from(config: &RecommenderConfig) -> Self {
        Self {
            cap: config.cap,
            pool_ceiling: config.pool_ceiling,
        }
    }
}

/// Runs the filter and rank pipeline for one request.
///
/// A title named in the query short-circuits everything else and returns
/// that single record with a note. Otherwise the catalog is filtered by
/// genre, type and score, ordered, truncated to `pool_ceiling`, and when
/// more than `cap` candidates remain, `cap` of them are sampled uniformly
/// (kept in pool order).
pub fn recommend<R: RandomSource + ?Sized>(
    criteria: &QueryCriteria,
    catalog: &CatalogStore,
    limits: SelectionLimits,
    rng: &mut R,
) -> RecommendationResult {
    if let Some(record) = criteria.primary_title().and_then(|t| catalog.find_title(t)) {
        debug!(title = %record.name, "title short-circuit");
        return RecommendationResult {
            note: Some(title_note(record)),
            records: vec![Arc::clone(record)],
            kind: ResultKind::TitleMatch,
            pool_size: 1,
        };
    }

    let mut pool = candidate_pool(criteria, catalog);
    let pool_size = pool.len();
    if pool.is_empty() {
        debug!("no candidates after filtering");
        return RecommendationResult::empty();
    }

    order_pool(&mut pool, criteria.popularity_preference);
    pool.truncate(limits.pool_ceiling.max(1));

    let records: Vec<Arc<AnimeRecord>> = sample_positions(pool.len(), limits.cap, rng)
        .into_iter()
        .map(|i| Arc::clone(pool[i]))
        .collect();

    debug!(
        pool_size,
        eligible = pool.len(),
        selected = records.len(),
        "selected recommendations"
    );

    RecommendationResult {
        records,
        note: None,
        kind: ResultKind::Filtered,
        pool_size,
    }
}

/// One-line summary used when the user asks about a specific title.
#[must_use]
pub fn title_note(record: &AnimeRecord) -> String {
    let genres = record.genres_display().unwrap_or_else(|| UNKNOWN.to_string());
    let score = record
        .score
        .map_or_else(|| UNKNOWN.to_string(), |s| format!("{s:.2}"));
    format!(
        "{} is a {} anime in {} with a score of {}.",
        record.name, record.anime_type, genres, score
    )
}
