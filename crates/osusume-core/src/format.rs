//! # Result Formatter
//!
//! Renders a [`RecommendationResult`] as the text answer shown to users.
//! Output is a pure function of the result and the synopsis budget.

use std::borrow::Cow;
use std::fmt::Write as _;

use crate::config::DEFAULT_SYNOPSIS_LIMIT;
use crate::types::{AnimeRecord, RecommendationResult, UNKNOWN};

/// Answer for a query whose candidate pool is empty.
pub const NO_MATCHES: &str = "Sorry, I couldn't find any anime matching your preferences. \
Try different genres or loosen your filters.";

/// First line of a non-empty filtered answer.
pub const RESULTS_HEADER: &str =
    "Here are the top anime recommendations based on your preferences:";

/// Appended to synopses cut at the character budget.
pub const TRUNCATION_MARKER: &str = "...";

/// Text renderer for recommendation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatter {
    synopsis_limit: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_SYNOPSIS_LIMIT)
    }
}

impl Formatter {
    /// Formatter cutting synopses after `synopsis_limit` characters.
    #[must_use]
    pub fn new(synopsis_limit: usize) -> Self {
        Self { synopsis_limit }
    }

    /// Renders the whole answer.
    ///
    /// An empty result renders as [`NO_MATCHES`]. Otherwise the header (or
    /// the title note) is followed by one block per record, each separated
    /// by a blank line.
    #[must_use]
    pub fn format(&self, result: &RecommendationResult) -> String {
        if result.is_empty() {
            return NO_MATCHES.to_string();
        }

        let header = result.note.as_deref().unwrap_or(RESULTS_HEADER);
        let blocks: Vec<String> = result.iter().map(|r| self.format_record(r)).collect();
        format!("{header}\n\n{}", blocks.join("\n\n"))
    }

    /// Renders one record as a fixed-order block.
    #[must_use]
    pub fn format_record(&self, record: &AnimeRecord) -> String {
        let mut block = format!("**{}**", record.name);
        if let Some(english) = record
            .english_name
            .as_deref()
            .filter(|e| !e.eq_ignore_ascii_case(&record.name))
        {
            let _ = write!(block, " ({english})");
        }

        let episodes = record
            .episodes
            .map_or_else(|| UNKNOWN.to_string(), |e| e.to_string());
        let score = record
            .score
            .map_or_else(|| UNKNOWN.to_string(), |s| format!("{s:.2}"));
        let genres = record.genres_display();
        let synopsis = record
            .synopsis
            .as_deref()
            .map_or(Cow::Borrowed(UNKNOWN), |s| {
                truncate_synopsis(s, self.synopsis_limit)
            });

        let _ = write!(
            block,
            "\n**Type**: {} | **Episodes**: {} | **Source**: {}\n**Genres**: {}\n**Score**: {}\n**Synopsis**: {}",
            record.anime_type,
            episodes,
            record.source.as_deref().unwrap_or(UNKNOWN),
            genres.as_deref().unwrap_or(UNKNOWN),
            score,
            synopsis,
        );
        block
    }
}

/// Cuts `text` to `limit` characters, appending [`TRUNCATION_MARKER`] when cut.
#[must_use]
pub fn truncate_synopsis(text: &str, limit: usize) -> Cow<'_, str> {
    match text.char_indices().nth(limit) {
        Some((byte_end, _)) => Cow::Owned(format!("{}{TRUNCATION_MARKER}", &text[..byte_end])),
        None => Cow::Borrowed(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnimeType, ResultKind};
    use std::sync::Arc;

    fn naruto() -> AnimeRecord {
        let mut record = AnimeRecord::new("Naruto")
            .with_genres(&["Action", "Adventure", "Fantasy"])
            .with_score(7.99)
            .with_type(AnimeType::TV);
        record.episodes = Some(220);
        record.source = Some("Manga".into());
        record.synopsis = Some("A young ninja seeks recognition.".into());
        record
    }

    fn result_of(records: Vec<AnimeRecord>) -> RecommendationResult {
        RecommendationResult {
            pool_size: records.len(),
            records: records.into_iter().map(Arc::new).collect(),
            note: None,
            kind: ResultKind::Filtered,
        }
    }

    #[test]
    fn empty_result_is_no_matches() {
        let formatter = Formatter::default();
        assert_eq!(formatter.format(&RecommendationResult::empty()), NO_MATCHES);
    }

    #[test]
    fn record_block_layout() {
        let block = Formatter::default().format_record(&naruto());
        assert_eq!(
            block,
            "**Naruto**\n\
             **Type**: TV | **Episodes**: 220 | **Source**: Manga\n\
             **Genres**: Action, Adventure, Fantasy\n\
             **Score**: 7.99\n\
             **Synopsis**: A young ninja seeks recognition."
        );
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let block = Formatter::default().format_record(&AnimeRecord::new("Mystery Box"));
        assert!(block.contains("**Type**: Unknown | **Episodes**: Unknown | **Source**: Unknown"));
        assert!(block.contains("**Genres**: Unknown"));
        assert!(block.contains("**Score**: Unknown"));
        assert!(block.contains("**Synopsis**: Unknown"));
    }

    #[test]
    fn english_name_shown_when_different() {
        let mut record = naruto();
        record.english_name = Some("naruto".into());
        assert!(Formatter::default().format_record(&record).starts_with("**Naruto**\n"));

        let mut record = AnimeRecord::new("Shingeki no Kyojin");
        record.english_name = Some("Attack on Titan".into());
        assert!(Formatter::default()
            .format_record(&record)
            .starts_with("**Shingeki no Kyojin** (Attack on Titan)\n"));
    }

    #[test]
    fn blocks_are_separated_by_blank_lines() {
        let text = Formatter::default().format(&result_of(vec![naruto(), naruto()]));
        assert!(text.starts_with(RESULTS_HEADER));
        assert_eq!(text.matches("\n\n**Naruto**").count(), 2);
    }

    #[test]
    fn title_note_replaces_header() {
        let mut result = result_of(vec![naruto()]);
        result.note = Some("Naruto is a TV anime.".into());
        result.kind = ResultKind::TitleMatch;
        let text = Formatter::default().format(&result);
        assert!(text.starts_with("Naruto is a TV anime.\n\n**Naruto**"));
        assert!(!text.contains(RESULTS_HEADER));
    }

    #[test]
    fn formatting_is_pure() {
        let formatter = Formatter::default();
        let result = result_of(vec![naruto()]);
        assert_eq!(formatter.format(&result), formatter.format(&result));
    }

    #[test]
    fn long_synopsis_is_truncated_with_marker() {
        let long = "x".repeat(300);
        let cut = truncate_synopsis(&long, 250);
        assert_eq!(cut.chars().count(), 250 + TRUNCATION_MARKER.len());
        assert!(cut.ends_with(TRUNCATION_MARKER));

        let mut record = naruto();
        record.synopsis = Some(long);
        let block = Formatter::default().format_record(&record);
        assert!(block.ends_with(&format!("{}{TRUNCATION_MARKER}", "x".repeat(250))));
    }

    #[test]
    fn short_synopsis_is_verbatim() {
        let exact = "y".repeat(250);
        assert_eq!(truncate_synopsis(&exact, 250), exact.as_str());
        assert_eq!(truncate_synopsis("short", 250), "short");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "進撃".repeat(5);
        assert_eq!(truncate_synopsis(&text, 3), "進撃進...");
    }
}
