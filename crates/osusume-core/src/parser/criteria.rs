use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;
use tracing::debug;

use crate::catalog::CatalogStore;
use crate::config::Vocabulary;
use crate::error::Result;
use crate::parser::tokenizer::Tokenizer;
use crate::types::{AnimeType, QueryCriteria};

/// Words that signal the user wants well-known titles.
const POPULARITY_MARKERS: &[&str] = &["popular", "popularity", "famous"];

/// Keyword-based parser turning free text into [`QueryCriteria`].
///
/// Each detector runs independently over the same query: genres, type,
/// score threshold, popularity intent and catalog titles. Parsing never
/// fails; a query nothing recognizes yields unrestricted criteria.
pub struct CriteriaParser {
    tokenizer: Tokenizer,
    /// Genre alias phrases (as word lists) with their canonical names.
    genre_phrases: Vec<(Vec<String>, String)>,
    type_aliases: BTreeMap<String, AnimeType>,
    /// Threshold patterns in priority order; group 1 captures the number.
    re_thresholds: Vec<Regex>,
}

impl CriteriaParser {
    /// Constructs a parser for the given vocabulary with pre-compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::InvalidConfig` for an invalid vocabulary and
    /// `OsusumeError::Regex` if a pattern fails to compile (should never
    /// happen with the static patterns defined here).
    pub fn new(vocabulary: &Vocabulary) -> Result<Self> {
        let vocabulary = vocabulary.normalized()?;
        let tokenizer = Tokenizer::new();

        let genre_phrases = vocabulary
            .genres
            .iter()
            .map(|(alias, canonical)| (tokenizer.words(alias), canonical.clone()))
            .filter(|(words, _)| !words.is_empty())
            .collect();

        Ok(Self {
            tokenizer,
            genre_phrases,
            type_aliases: vocabulary.type_aliases(),
            re_thresholds: vec![
                Regex::new(r"\b(?:score|rating)\s+(?:above|over)\s+(\d+(?:\.\d+)?)")?,
                Regex::new(r"\b(?:score|rating)\s+(?:of\s+)?at\s+least\s+(\d+(?:\.\d+)?)")?,
                Regex::new(r"\brated\s+(?:above|over|at\s+least)\s+(\d+(?:\.\d+)?)")?,
                Regex::new(r"\b(?:score|rating)\s*>=?\s*(\d+(?:\.\d+)?)")?,
            ],
        })
    }

    /// Parses a raw query against the catalog's titles.
    pub fn parse(&self, raw: &str, catalog: &CatalogStore) -> QueryCriteria {
        let lowered = raw.to_lowercase();
        let words = self.tokenizer.words(raw);

        let criteria = QueryCriteria {
            requested_genres: self.detect_genres(&words),
            type_filter: self.detect_type(&words),
            min_score: self.detect_min_score(&lowered),
            popularity_preference: self.detect_popularity(&words),
            title_candidates: self.detect_titles(&lowered, catalog),
        };

        debug!(%criteria, "parsed query");
        criteria
    }

    /// Canonical genres whose alias phrase appears as a contiguous run of words.
    fn detect_genres(&self, words: &[String]) -> BTreeSet<String> {
        self.genre_phrases
            .iter()
            .filter(|(phrase, _)| contains_phrase(words, phrase))
            .map(|(_, canonical)| canonical.clone())
            .collect()
    }

    /// The first word in the query that names a type.
    fn detect_type(&self, words: &[String]) -> Option<AnimeType> {
        words
            .iter()
            .find_map(|w| self.type_aliases.get(w.as_str()))
            .cloned()
    }

    /// Score threshold from the first pattern that yields a 0–10 number.
    fn detect_min_score(&self, lowered: &str) -> Option<f32> {
        self.re_thresholds.iter().find_map(|re| {
            re.captures(lowered)
                .and_then(|c| c[1].parse::<f32>().ok())
                .filter(|n| (0.0..=10.0).contains(n))
        })
    }

    fn detect_popularity(&self, words: &[String]) -> bool {
        words.iter().any(|w| POPULARITY_MARKERS.contains(&w.as_str()))
    }

    fn detect_titles(&self, lowered: &str, catalog: &CatalogStore) -> Vec<String> {
        let titles = catalog.titles_in(lowered);
        if titles.len() > 1 {
            debug!(
                chosen = %titles[0],
                candidates = titles.len(),
                "several catalog titles in query, longest wins"
            );
        }
        titles
    }
}

fn contains_phrase(words: &[String], phrase: &[String]) -> bool {
    words.windows(phrase.len()).any(|window| window == phrase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnimeRecord;

    fn parser() -> CriteriaParser {
        CriteriaParser::new(&Vocabulary::default()).unwrap()
    }

    fn catalog() -> CatalogStore {
        CatalogStore::from_records(vec![
            AnimeRecord::new("Naruto").with_genres(&["Action"]),
            AnimeRecord::new("Monster").with_genres(&["Mystery"]),
        ])
    }

    fn parse(query: &str) -> QueryCriteria {
        parser().parse(query, &CatalogStore::default())
    }

    #[test]
    fn genres_are_token_exact() {
        let c = parse("I like Action and COMEDY!");
        let expected: BTreeSet<String> = ["Action".to_string(), "Comedy".to_string()].into();
        assert_eq!(c.requested_genres, expected);

        assert!(parse("something dramatic please").requested_genres.is_empty());
        assert!(parse("I like zorblatt").requested_genres.is_empty());
    }

    #[test]
    fn multi_word_genres_match_as_phrases() {
        let c = parse("Any good slice of life shows?");
        assert!(c.requested_genres.contains("Slice of Life"));

        let c = parse("award winning sci-fi");
        assert!(c.requested_genres.contains("Award Winning"));
        assert!(c.requested_genres.contains("Sci-Fi"));

        assert!(parse("a slice of cake").requested_genres.is_empty());
    }

    #[test]
    fn type_detection() {
        assert_eq!(parse("an action movie").type_filter, Some(AnimeType::Movie));
        assert_eq!(parse("a TV series").type_filter, Some(AnimeType::TV));
        assert_eq!(parse("any good OVA?").type_filter, Some(AnimeType::OVA));
        assert_eq!(parse("I like drama").type_filter, None);
        // "tvs" and "moviegoer" are not type markers
        assert_eq!(parse("moviegoer with tvs").type_filter, None);
    }

    #[test]
    fn first_type_marker_wins() {
        assert_eq!(parse("tv or movie").type_filter, Some(AnimeType::TV));
        assert_eq!(parse("movie or tv").type_filter, Some(AnimeType::Movie));
    }

    #[test]
    fn score_threshold_detection() {
        assert_eq!(parse("score above 8").min_score, Some(8.0));
        assert_eq!(parse("Rating above 8.5.").min_score, Some(8.5));
        assert_eq!(parse("score of at least 7.25").min_score, Some(7.25));
        assert_eq!(parse("rated over 9").min_score, Some(9.0));
        assert_eq!(parse("score >= 6").min_score, Some(6.0));
    }

    #[test]
    fn malformed_threshold_is_unset() {
        assert_eq!(parse("score above nine").min_score, None);
        assert_eq!(parse("score above").min_score, None);
        assert_eq!(parse("score above 85").min_score, None);
        assert_eq!(parse("above 8").min_score, None);
    }

    #[test]
    fn popularity_detection() {
        assert!(parse("most popular action").popularity_preference);
        assert!(parse("something famous").popularity_preference);
        assert!(!parse("something unpopular").popularity_preference);
    }

    #[test]
    fn title_detection_uses_catalog() {
        let c = parser().parse("Tell me about Naruto", &catalog());
        assert_eq!(c.title_candidates, vec!["naruto"]);
        assert_eq!(c.primary_title(), Some("naruto"));
        assert!(c.requested_genres.is_empty());
    }

    #[test]
    fn empty_and_garbage_input_is_unrestricted() {
        assert!(parse("").is_unrestricted());
        assert!(parse("   ").is_unrestricted());
        assert!(parse("?!?! ### 123").is_unrestricted());
    }

    #[test]
    fn custom_vocabulary_extends_genres() {
        let vocabulary = Vocabulary::default().with_genre("Isekai", "Isekai");
        let parser = CriteriaParser::new(&vocabulary).unwrap();
        let c = parser.parse("any isekai?", &CatalogStore::default());
        assert!(c.requested_genres.contains("Isekai"));
    }

    #[test]
    fn invalid_vocabulary_fails_construction() {
        let vocabulary = Vocabulary::default().with_type("", "Movie");
        assert!(CriteriaParser::new(&vocabulary).is_err());
    }
}
