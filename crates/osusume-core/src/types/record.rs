use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder rendered for missing optional fields.
pub const UNKNOWN: &str = "Unknown";

/// Broadcast format of an anime entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimeType {
    TV,
    Movie,
    OVA,
    Special,
    ONA,
    Music,
    /// A catalog value outside the known set, kept verbatim.
    Other(String),
    /// Missing or `UNKNOWN` in the catalog.
    Unknown,
}

impl AnimeType {
    /// Parses a catalog or vocabulary value, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_lowercase().as_str() {
            "tv" => Self::TV,
            "movie" => Self::Movie,
            "ova" => Self::OVA,
            "special" => Self::Special,
            "ona" => Self::ONA,
            "music" => Self::Music,
            "" | "unknown" => Self::Unknown,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Case-insensitive equality, including for [`AnimeType::Other`].
    #[must_use]
    pub fn matches(&self, other: &AnimeType) -> bool {
        match (self, other) {
            (Self::Other(a), Self::Other(b)) => a.eq_ignore_ascii_case(b),
            _ => self == other,
        }
    }
}

impl fmt::Display for AnimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TV => write!(f, "TV"),
            Self::Movie => write!(f, "Movie"),
            Self::OVA => write!(f, "OVA"),
            Self::Special => write!(f, "Special"),
            Self::ONA => write!(f, "ONA"),
            Self::Music => write!(f, "Music"),
            Self::Other(s) => write!(f, "{s}"),
            Self::Unknown => write!(f, "{UNKNOWN}"),
        }
    }
}

/// One catalog entry.
///
/// Text fields are trimmed at load time. Numeric fields that could not be
/// parsed are `None`, which is distinct from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeRecord {
    /// Primary (usually romanized) title.
    pub name: String,

    /// Localized English title.
    pub english_name: Option<String>,

    /// Overall rank, lower is better.
    pub rank: Option<u32>,

    /// Average score on a 0–10 scale.
    pub score: Option<f32>,

    /// Genres in catalog order, de-duplicated.
    pub genres: Vec<String>,

    /// Broadcast format.
    pub anime_type: AnimeType,

    /// Episode count.
    pub episodes: Option<u32>,

    /// Source material (Manga, Original, Light Novel, ...).
    pub source: Option<String>,

    /// Popularity rank, lower is more popular.
    pub popularity: Option<u32>,

    /// Free-text plot summary.
    pub synopsis: Option<String>,
}

impl AnimeRecord {
    /// Creates a record with only a name; every other field is missing.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            english_name: None,
            rank: None,
            score: None,
            genres: Vec::new(),
            anime_type: AnimeType::Unknown,
            episodes: None,
            source: None,
            popularity: None,
            synopsis: None,
        }
    }

    /// Sets the genres from a list of names.
    #[must_use]
    pub fn with_genres(mut self, genres: &[&str]) -> Self {
        self.genres = split_genres(&genres.join(","));
        self
    }

    /// Sets the score.
    #[must_use]
    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    /// Sets the broadcast format.
    #[must_use]
    pub fn with_type(mut self, anime_type: AnimeType) -> Self {
        self.anime_type = anime_type;
        self
    }

    /// Sets the popularity rank.
    #[must_use]
    pub fn with_popularity(mut self, popularity: u32) -> Self {
        self.popularity = Some(popularity);
        self
    }

    /// Returns `true` if the record lists `genre` (case-insensitive).
    #[must_use]
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g.eq_ignore_ascii_case(genre))
    }

    /// Returns `true` if the record's genres intersect `genres`.
    #[must_use]
    pub fn has_any_genre(&self, genres: &BTreeSet<String>) -> bool {
        genres.iter().any(|g| self.has_genre(g))
    }

    /// Comma-separated genre list, or `None` when the record has no genres.
    #[must_use]
    pub fn genres_display(&self) -> Option<String> {
        if self.genres.is_empty() {
            None
        } else {
            Some(self.genres.join(", "))
        }
    }

    /// Lower-cased titles used for title lookup: the name, then the English name.
    pub fn lookup_titles(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.name.as_str())
            .chain(self.english_name.as_deref())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}

/// Splits a comma-separated genre field into trimmed, de-duplicated names.
///
/// Missing markers (`""`, `UNKNOWN`) yield an empty list.
#[must_use]
pub fn split_genres(raw: &str) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for part in raw.split(',') {
        let genre = part.trim();
        if genre.is_empty() || genre.eq_ignore_ascii_case("unknown") {
            continue;
        }
        if !genres.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
            genres.push(genre.to_string());
        }
    }
    genres
}
