//! # Osusume Core
//!
//! Conversational anime recommendation engine. Turns free-text preferences
//! into structured criteria, filters and ranks an immutable catalog, and
//! renders the selection as a readable answer.
//!
//! ## Quick Start
//!
//! ```rust
//! use osusume_core::{AnimeRecord, CatalogStore, Recommender};
//!
//! let catalog = CatalogStore::from_records(vec![
//!     AnimeRecord::new("Naruto").with_genres(&["Action", "Adventure"]).with_score(7.99),
//!     AnimeRecord::new("Gintama").with_genres(&["Comedy"]).with_score(9.06),
//! ]);
//! let recommender = Recommender::with_defaults(catalog).unwrap();
//!
//! let result = recommender.recommend("I like comedy");
//! assert_eq!(result.names(), vec!["Gintama"]);
//!
//! let answer = recommender.answer("Tell me about Naruto");
//! assert!(answer.starts_with("Naruto is a"));
//! ```
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod format;
pub mod parser;
pub mod recommender;
pub mod types;

// Re-export primary API
pub use catalog::{CatalogHandle, CatalogStore};
pub use config::{RecommenderConfig, Vocabulary};
pub use engine::{RandomSource, SeededRandom, SelectionLimits};
pub use error::{OsusumeError, Result};
pub use format::{Formatter, NO_MATCHES};
pub use parser::{CriteriaParser, Tokenizer};
pub use recommender::{Recommender, FAILURE_MESSAGE};
pub use types::{AnimeRecord, AnimeType, QueryCriteria, RecommendationResult, ResultKind};
