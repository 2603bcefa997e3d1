pub mod criteria;
pub mod record;
pub mod result;

pub use criteria::QueryCriteria;
pub use record::{split_genres, AnimeRecord, AnimeType, UNKNOWN};
pub use result::{RecommendationResult, ResultKind};
