pub mod criteria;
pub mod tokenizer;

pub use criteria::CriteriaParser;
pub use tokenizer::{Token, Tokenizer};
