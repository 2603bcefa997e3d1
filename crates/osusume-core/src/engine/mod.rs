pub mod filter;
pub mod pipeline;
pub mod random;

pub use filter::{candidate_pool, order_pool};
pub use pipeline::{recommend, title_note, SelectionLimits};
pub use random::{sample_positions, RandomSource, SeededRandom};
