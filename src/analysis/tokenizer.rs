use crate::analysis::token::Token;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;
}

/// Emits the whole input as a single token.
///
/// Names are indexed as one unit so substrings may span word boundaries
/// ("e co" is a valid substring of "Jane Cooper").
#[derive(Debug, Clone, Default)]
pub struct KeywordTokenizer;

impl Tokenizer for KeywordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            return Vec::new();
        }
        vec![Token::new(text.to_string())]
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_whitespace_inside_token() {
        let tokens = KeywordTokenizer.tokenize("Jane Cooper");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "Jane Cooper");
        assert!(KeywordTokenizer.tokenize("").is_empty());
    }
}
