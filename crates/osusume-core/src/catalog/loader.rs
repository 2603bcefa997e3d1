use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use super::store::CatalogStore;
use crate::error::{OsusumeError, Result};
use crate::types::{split_genres, AnimeRecord, AnimeType};

/// Columns every catalog source must provide.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Name", "Genres", "Score", "Type", "Episodes", "Source", "Synopsis",
];

/// Columns read when present.
pub const OPTIONAL_COLUMNS: &[&str] = &["English name", "Rank", "Popularity"];

/// Header positions, keyed by lower-cased column name.
struct ColumnIndex(HashMap<String, usize>);

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !index.contains_key(&c.to_lowercase()))
            .map(|c| (*c).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(OsusumeError::MissingColumns(missing));
        }

        Ok(Self(index))
    }

    fn field<'r>(&self, row: &'r csv::StringRecord, column: &str) -> &'r str {
        self.0
            .get(&column.to_lowercase())
            .and_then(|&i| row.get(i))
            .map(str::trim)
            .unwrap_or("")
    }
}

impl CatalogStore {
    /// Loads a catalog from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns `OsusumeError::DataLoad` if the file cannot be opened,
    /// `OsusumeError::MissingColumns` if required columns are absent and
    /// `OsusumeError::Csv` if the file is not valid CSV.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| OsusumeError::DataLoad {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_reader(file, path.display().to_string())
    }

    /// Loads a catalog from any CSV byte stream.
    ///
    /// Unparseable numeric cells become missing values; they never fail the load.
    pub fn from_reader<R: Read>(reader: R, source_name: impl Into<String>) -> Result<Self> {
        let source_name = source_name.into();
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;

        let mut records = Vec::new();
        for row in csv_reader.records() {
            records.push(parse_row(&columns, &row?));
        }

        let store = CatalogStore::with_source(source_name, records);
        info!(
            source = %store.source_name(),
            records = store.len(),
            "catalog loaded"
        );
        Ok(store)
    }
}

fn parse_row(columns: &ColumnIndex, row: &csv::StringRecord) -> AnimeRecord {
    let mut record = AnimeRecord::new(columns.field(row, "Name"));
    record.english_name = text(columns.field(row, "English name"));
    record.rank = parse_count(columns.field(row, "Rank"));
    record.score = parse_score(columns.field(row, "Score"));
    record.genres = split_genres(columns.field(row, "Genres"));
    record.anime_type = AnimeType::parse(columns.field(row, "Type"));
    record.episodes = parse_count(columns.field(row, "Episodes"));
    record.source = text(columns.field(row, "Source"));
    record.popularity = parse_count(columns.field(row, "Popularity"));
    record.synopsis = text(columns.field(row, "Synopsis"));
    record
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("unknown")
}

fn text(value: &str) -> Option<String> {
    if is_missing(value) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parses a 0–10 score; anything else is missing.
fn parse_score(value: &str) -> Option<f32> {
    if is_missing(value) {
        return None;
    }
    value
        .parse::<f32>()
        .ok()
        .filter(|s| s.is_finite() && (0.0..=10.0).contains(s))
}

/// Parses a non-negative integer, accepting integral floats such as `"12.0"`.
fn parse_count(value: &str) -> Option<u32> {
    if is_missing(value) {
        return None;
    }
    if let Ok(n) = value.parse::<u32>() {
        return Some(n);
    }
    let n: f64 = value.parse().ok()?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= f64::from(u32::MAX) {
        Some(n as u32)
    } else {
        None
    }
}
