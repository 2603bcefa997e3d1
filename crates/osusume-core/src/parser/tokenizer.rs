//! # Query Tokenizer
//!
//! Splits free-text queries into lower-cased word tokens for the keyword
//! detectors.

/// A word extracted from a query with positional information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lower-cased word with surrounding punctuation removed
    pub text: String,
    /// Start byte position in the original string
    pub start: usize,
    /// End byte position in the original string
    pub end: usize,
    /// Token index in the sequence
    pub index: usize,
}

/// Whitespace tokenizer for user queries.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a query into lower-cased words.
    ///
    /// Splits on whitespace and strips leading/trailing punctuation from
    /// each word, so `"Action,"` becomes `"action"` while `"sci-fi"` is
    /// kept whole. Words made only of punctuation are dropped.
    ///
    /// # Examples
    /// ```
    /// use osusume_core::parser::tokenizer::Tokenizer;
    ///
    /// let tokens = Tokenizer::new().tokenize("I like Sci-Fi, and drama!");
    /// let words: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
    /// assert_eq!(words, ["i", "like", "sci-fi", "and", "drama"]);
    /// ```
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut word_start: Option<usize> = None;

        for (idx, c) in input.char_indices() {
            match (c.is_whitespace(), word_start) {
                (true, Some(start)) => {
                    self.push_word(input, start, idx, &mut tokens);
                    word_start = None;
                }
                (false, None) => word_start = Some(idx),
                _ => {}
            }
        }

        if let Some(start) = word_start {
            self.push_word(input, start, input.len(), &mut tokens);
        }

        tokens
    }

    fn push_word(&self, input: &str, start: usize, end: usize, tokens: &mut Vec<Token>) {
        let text = self.normalize(&input[start..end]);
        if !text.is_empty() {
            tokens.push(Token {
                text,
                start,
                end,
                index: tokens.len(),
            });
        }
    }

    /// Lower-case and trim non-alphanumeric characters from both ends.
    fn normalize(&self, word: &str) -> String {
        word.trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase()
    }

    /// Token texts, for phrase matching.
    pub fn words(&self, input: &str) -> Vec<String> {
        self.tokenize(input).into_iter().map(|t| t.text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("I like Action");

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].text, "action");
        assert_eq!(tokens[2].start, 7);
        assert_eq!(tokens[2].end, 13);
        assert_eq!(tokens[2].index, 2);
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        let tokenizer = Tokenizer::new();
        let words = tokenizer.words("Comedy, romance... (horror)?");
        assert_eq!(words, vec!["comedy", "romance", "horror"]);
    }

    #[test]
    fn test_tokenize_keeps_inner_hyphen() {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.words("slice-of-life sci-fi"), vec!["slice-of-life", "sci-fi"]);
    }

    #[test]
    fn test_tokenize_empty() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("   \t\n").is_empty());
    }

    #[test]
    fn test_tokenize_only_punctuation() {
        let tokenizer = Tokenizer::new();
        assert!(tokenizer.tokenize("!!! ... ---").is_empty());
    }

    #[test]
    fn test_indices_skip_dropped_words() {
        let tokenizer = Tokenizer::new();
        let tokens = tokenizer.tokenize("drama ... mystery");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].index, 1);
        assert_eq!(tokens[1].text, "mystery");
    }
}
