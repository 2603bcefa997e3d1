use std::sync::Arc;

use super::record::AnimeRecord;

/// How a result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// A catalog title was named in the query.
    TitleMatch,
    /// Filters, ordering and selection over the catalog.
    Filtered,
}

/// Ordered, bounded selection of catalog records.
///
/// Records are shared with the catalog, never copied. The result is empty
/// only when the candidate pool was empty.
#[derive(Debug, Clone)]
pub struct RecommendationResult {
    /// Selected records in presentation order.
    pub records: Vec<Arc<AnimeRecord>>,

    /// Explanatory note for a title match.
    pub note: Option<String>,

    /// Which engine path produced the result.
    pub kind: ResultKind,

    /// Candidate pool size before truncation and sampling.
    pub pool_size: usize,
}

impl RecommendationResult {
    /// An empty filtered result.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            note: None,
            kind: ResultKind::Filtered,
            pool_size: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Iterates over the selected records.
    pub fn iter(&self) -> impl Iterator<Item = &AnimeRecord> {
        self.records.iter().map(Arc::as_ref)
    }

    /// Names of the selected records, in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(|r| r.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result() {
        let result = RecommendationResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert_eq!(result.kind, ResultKind::Filtered);
    }

    #[test]
    fn names_follow_record_order() {
        let result = RecommendationResult {
            records: vec![
                Arc::new(AnimeRecord::new("Monster")),
                Arc::new(AnimeRecord::new("Mushishi")),
            ],
            note: None,
            kind: ResultKind::Filtered,
            pool_size: 2,
        };
        assert_eq!(result.names(), vec!["Monster", "Mushishi"]);
    }
}
