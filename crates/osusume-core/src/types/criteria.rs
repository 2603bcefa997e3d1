use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::AnimeType;

/// Structured form of one free-text request.
///
/// Built fresh for every query and discarded afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryCriteria {
    /// Canonical genre names. Empty means no genre restriction.
    pub requested_genres: BTreeSet<String>,

    /// Broadcast format restriction.
    pub type_filter: Option<AnimeType>,

    /// Inclusive lower bound on the score.
    pub min_score: Option<f32>,

    /// Order by popularity rank instead of score.
    pub popularity_preference: bool,

    /// Lower-cased catalog titles found in the query, best match first.
    pub title_candidates: Vec<String>,
}

impl QueryCriteria {
    /// Creates criteria that impose no restriction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no detector fired.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.requested_genres.is_empty()
            && self.type_filter.is_none()
            && self.min_score.is_none()
            && !self.popularity_preference
            && self.title_candidates.is_empty()
    }

    /// The title the engine should look up, if any.
    #[must_use]
    pub fn primary_title(&self) -> Option<&str> {
        self.title_candidates.first().map(String::as_str)
    }
}

impl fmt::Display for QueryCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryCriteria(")?;
        let genres: Vec<&str> = self.requested_genres.iter().map(String::as_str).collect();
        write!(f, "genres=[{}]", genres.join(", "))?;
        if let Some(ref t) = self.type_filter {
            write!(f, ", type={t}")?;
        }
        if let Some(score) = self.min_score {
            write!(f, ", min_score={score}")?;
        }
        if self.popularity_preference {
            write!(f, ", popular")?;
        }
        if let Some(title) = self.primary_title() {
            write!(f, ", title={title:?}")?;
        }
        write!(f, ")")
    }
}
