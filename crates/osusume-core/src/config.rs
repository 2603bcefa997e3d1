//! # Recommender Configuration
//!
//! Tunables for selection and formatting plus the keyword vocabulary the
//! criteria parser matches against. Everything here can be supplied as JSON,
//! so new genre aliases need no code change.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OsusumeError, Result};
use crate::types::AnimeType;

/// Default number of recommendations per request.
pub const DEFAULT_CAP: usize = 5;
/// Default number of top-ordered candidates kept before sampling.
pub const DEFAULT_POOL_CEILING: usize = 50;
/// Default synopsis length, in characters, before truncation.
pub const DEFAULT_SYNOPSIS_LIMIT: usize = 250;

const DEFAULT_GENRES: &[(&str, &str)] = &[
    ("sports", "Sports"),
    ("comedy", "Comedy"),
    ("action", "Action"),
    ("fantasy", "Fantasy"),
    ("drama", "Drama"),
    ("adventure", "Adventure"),
    ("romance", "Romance"),
    ("sci-fi", "Sci-Fi"),
    ("scifi", "Sci-Fi"),
    ("sci fi", "Sci-Fi"),
    ("supernatural", "Supernatural"),
    ("mystery", "Mystery"),
    ("horror", "Horror"),
    ("slice of life", "Slice of Life"),
    ("slice-of-life", "Slice of Life"),
    ("award winning", "Award Winning"),
    ("suspense", "Suspense"),
];

const DEFAULT_TYPES: &[(&str, &str)] = &[
    ("movie", "Movie"),
    ("movies", "Movie"),
    ("film", "Movie"),
    ("films", "Movie"),
    ("tv", "TV"),
    ("series", "TV"),
    ("ova", "OVA"),
    ("ona", "ONA"),
    ("special", "Special"),
    ("specials", "Special"),
];

/// Alias tables used by the criteria parser.
///
/// Keys are lower-case aliases (single words or space-separated phrases);
/// values are the canonical names used in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Genre alias → canonical genre name.
    pub genres: BTreeMap<String, String>,
    /// Type alias → catalog type value.
    pub types: BTreeMap<String, String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let to_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(alias, canonical)| ((*alias).to_string(), (*canonical).to_string()))
                .collect()
        };
        Self {
            genres: to_map(DEFAULT_GENRES),
            types: to_map(DEFAULT_TYPES),
        }
    }
}

impl Vocabulary {
    /// Adds or replaces a genre alias.
    #[must_use]
    pub fn with_genre(mut self, alias: &str, canonical: &str) -> Self {
        self.genres.insert(alias.to_string(), canonical.to_string());
        self
    }

    /// Adds or replaces a type alias.
    #[must_use]
    pub fn with_type(mut self, alias: &str, catalog_type: &str) -> Self {
        self.types.insert(alias.to_string(), catalog_type.to_string());
        self
    }

    /// Lower-cases and whitespace-normalizes aliases, rejecting empty entries.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::InvalidConfig` for an empty alias or canonical name.
    pub fn normalized(&self) -> Result<Self> {
        Ok(Self {
            genres: normalize_table("genre", &self.genres)?,
            types: normalize_table("type", &self.types)?,
        })
    }

    /// Type aliases resolved to catalog types.
    #[must_use]
    pub fn type_aliases(&self) -> BTreeMap<String, AnimeType> {
        self.types
            .iter()
            .map(|(alias, t)| (alias.clone(), AnimeType::parse(t)))
            .collect()
    }
}

fn normalize_table(
    kind: &str,
    table: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>> {
    let mut normalized = BTreeMap::new();
    for (alias, canonical) in table {
        let alias = alias
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let canonical = canonical.trim();
        if alias.is_empty() || canonical.is_empty() {
            return Err(OsusumeError::InvalidConfig(format!(
                "empty {kind} alias or canonical name"
            )));
        }
        normalized.insert(alias, canonical.to_string());
    }
    Ok(normalized)
}

/// Configuration for the recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Maximum number of recommendations per request.
    pub cap: usize,
    /// Number of top-ordered candidates kept before sampling.
    pub pool_ceiling: usize,
    /// Synopsis length in characters before truncation.
    pub synopsis_limit: usize,
    /// Fixed sampling seed. `None` draws a fresh seed for every request.
    pub seed: Option<u64>,
    /// Keyword vocabulary for the criteria parser.
    pub vocabulary: Vocabulary,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            cap: DEFAULT_CAP,
            pool_ceiling: DEFAULT_POOL_CEILING,
            synopsis_limit: DEFAULT_SYNOPSIS_LIMIT,
            seed: None,
            vocabulary: Vocabulary::default(),
        }
    }
}

impl RecommenderConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of recommendations.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Set the pool truncation ceiling.
    pub fn with_pool_ceiling(mut self, pool_ceiling: usize) -> Self {
        self.pool_ceiling = pool_ceiling;
        self
    }

    /// Set the synopsis truncation budget.
    pub fn with_synopsis_limit(mut self, limit: usize) -> Self {
        self.synopsis_limit = limit;
        self
    }

    /// Fix the sampling seed for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the keyword vocabulary.
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Checks numeric bounds and the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::InvalidConfig` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.cap == 0 {
            return Err(OsusumeError::InvalidConfig("cap must be at least 1".into()));
        }
        if self.pool_ceiling == 0 {
            return Err(OsusumeError::InvalidConfig(
                "pool_ceiling must be at least 1".into(),
            ));
        }
        if self.synopsis_limit == 0 {
            return Err(OsusumeError::InvalidConfig(
                "synopsis_limit must be at least 1".into(),
            ));
        }
        self.vocabulary.normalized().map(|_| ())
    }

    /// Parses and validates a JSON configuration. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
