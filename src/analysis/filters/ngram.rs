use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Expands each token into every n-gram with `min_gram <= n <= max_gram`.
///
/// A token of `L` chars yields O(L²) grams when `max_gram` is unbounded.
pub struct NGramFilter {
    pub min_gram: usize,
    pub max_gram: usize,
}

impl NGramFilter {
    pub fn new(min_gram: usize, max_gram: usize) -> Self {
        NGramFilter { min_gram, max_gram }
    }

    /// All substrings at least `min_gram` chars long
    pub fn unbounded(min_gram: usize) -> Self {
        NGramFilter::new(min_gram, usize::MAX)
    }
}

impl TokenFilter for NGramFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        let mut result = Vec::new();

        for token in tokens {
            let chars: Vec<char> = token.text.chars().collect();

            for n in self.min_gram.max(1)..=self.max_gram.min(chars.len()) {
                for i in 0..=chars.len() - n {
                    let ngram: String = chars[i..i + n].iter().collect();

                    result.push(Token::new(ngram));
                }
            }
        }

        result
    }

    fn name(&self) -> &str {
        "ngram"
    }
}
