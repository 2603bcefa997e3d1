use std::cmp::Ordering;
use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::types::{AnimeRecord, QueryCriteria};

/// Records passing the genre, type and score filters, in catalog order.
pub fn candidate_pool<'a>(
    criteria: &QueryCriteria,
    catalog: &'a CatalogStore,
) -> Vec<&'a Arc<AnimeRecord>> {
    catalog
        .iter()
        .filter(|r| {
            criteria.requested_genres.is_empty() || r.has_any_genre(&criteria.requested_genres)
        })
        .filter(|r| {
            criteria
                .type_filter
                .as_ref()
                .is_none_or(|t| r.anime_type.matches(t))
        })
        .filter(|r| {
            criteria
                .min_score
                .is_none_or(|min| r.score.is_some_and(|s| s >= min))
        })
        .collect()
}

/// Sorts the pool in place.
///
/// By score: score descending, then rank ascending. By popularity:
/// popularity rank ascending, then score descending. Missing values sort
/// last and remaining ties keep catalog order.
pub fn order_pool(pool: &mut [&Arc<AnimeRecord>], by_popularity: bool) {
    if by_popularity {
        pool.sort_by(|a, b| {
            asc_missing_last(a.popularity, b.popularity)
                .then_with(|| desc_missing_last(a.score, b.score))
        });
    } else {
        pool.sort_by(|a, b| {
            desc_missing_last(a.score, b.score).then_with(|| asc_missing_last(a.rank, b.rank))
        });
    }
}

fn desc_missing_last(a: Option<f32>, b: Option<f32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn asc_missing_last(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
