use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use tracing::warn;

use crate::types::{split_genres, AnimeRecord, AnimeType};

/// Titles shorter than this (in characters) are never matched against queries.
pub const MIN_TITLE_LEN: usize = 2;

/// Immutable in-memory anime catalog.
///
/// Built once at start-up; records are shared with results through `Arc`
/// and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<Arc<AnimeRecord>>,
    source_name: String,
}

impl CatalogStore {
    /// Builds a catalog from already-parsed rows.
    ///
    /// Text fields are trimmed and rows with an empty name are skipped.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = AnimeRecord>) -> Self {
        Self::with_source("memory", records)
    }

    pub(crate) fn with_source(
        source_name: impl Into<String>,
        records: impl IntoIterator<Item = AnimeRecord>,
    ) -> Self {
        let source_name = source_name.into();
        let records = records
            .into_iter()
            .enumerate()
            .filter_map(|(row, record)| {
                let normalized = normalize(record);
                if normalized.is_none() {
                    warn!(source = %source_name, row, "skipping catalog row with empty name");
                }
                normalized
            })
            .map(Arc::new)
            .collect();
        Self {
            records,
            source_name,
        }
    }

    /// Where the catalog was loaded from.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<AnimeRecord>> {
        self.records.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<AnimeRecord>> {
        self.records.get(index)
    }

    /// Distinct genres present in the catalog.
    #[must_use]
    pub fn genres(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .flat_map(|r| r.genres.iter().cloned())
            .collect()
    }

    /// Genre occurrence counts, most frequent first, ties by name.
    #[must_use]
    pub fn genre_distribution(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for genre in self.records.iter().flat_map(|r| r.genres.iter()) {
            *counts.entry(genre.as_str()).or_default() += 1;
        }
        let mut distribution: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(genre, count)| (genre.to_string(), count))
            .collect();
        distribution.sort_by(|a, b| b.1.cmp(&a.1));
        distribution
    }

    /// Broadcast format counts, most frequent first.
    #[must_use]
    pub fn type_distribution(&self) -> Vec<(AnimeType, usize)> {
        let mut counts: HashMap<&AnimeType, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(&record.anime_type).or_default() += 1;
        }
        let mut distribution: Vec<(AnimeType, usize)> = counts
            .into_iter()
            .map(|(t, count)| (t.clone(), count))
            .collect();
        distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.to_string().cmp(&b.0.to_string())));
        distribution
    }

    /// Scores of every record that has one.
    pub fn score_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.records.iter().filter_map(|r| r.score)
    }

    /// First record, in catalog order, whose name or English name equals
    /// `lowered_title`.
    #[must_use]
    pub fn find_title(&self, lowered_title: &str) -> Option<&Arc<AnimeRecord>> {
        self.records
            .iter()
            .find(|r| r.lookup_titles().any(|t| t == lowered_title))
    }

    /// Catalog titles occurring in `lowered_query` at word boundaries.
    ///
    /// Sorted longest first; equal lengths keep catalog order.
    #[must_use]
    pub fn titles_in(&self, lowered_query: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for record in &self.records {
            for title in record.lookup_titles() {
                if title.chars().count() < MIN_TITLE_LEN || found.contains(&title) {
                    continue;
                }
                if contains_at_word_boundary(lowered_query, &title) {
                    found.push(title);
                }
            }
        }
        found.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
        found
    }
}

fn normalize(mut record: AnimeRecord) -> Option<AnimeRecord> {
    record.name = record.name.trim().to_string();
    if record.name.is_empty() {
        return None;
    }
    record.english_name = trim_optional(record.english_name);
    record.source = trim_optional(record.source);
    record.synopsis = trim_optional(record.synopsis);
    record.genres = split_genres(&record.genres.join(","));
    Some(record)
}

fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("unknown"))
}

fn contains_at_word_boundary(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
