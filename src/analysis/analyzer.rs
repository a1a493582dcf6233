use std::collections::BTreeSet;
use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::lowercase::LowercaseFilter;
use crate::analysis::filters::ngram::NGramFilter;
use crate::analysis::token::Token;
use crate::analysis::tokenizer::{KeywordTokenizer, Tokenizer};

/// Text analysis pipeline
pub struct Analyzer {
    pub tokenizer: Box<dyn Tokenizer>,
    pub filters: Vec<Box<dyn TokenFilter>>,
    pub name: String,
}

impl Analyzer {
    pub fn new(name: String, tokenizer: Box<dyn Tokenizer>) -> Self {
        Analyzer {
            tokenizer,
            filters: Vec::new(),
            name,
        }
    }

    pub fn add_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn analyze(&self, text: &str) -> Vec<Token> {
        let mut tokens = self.tokenizer.tokenize(text);

        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }

        tokens
    }

    /// Distinct token texts, sorted
    pub fn terms(&self, text: &str) -> BTreeSet<String> {
        self.analyze(text).into_iter().map(|token| token.text).collect()
    }

    /// Lower-cased substrings of the whole name, `min_len` chars and longer
    pub fn name_substrings(min_len: usize) -> Self {
        Analyzer::new("name_substrings".to_string(),
                      Box::new(KeywordTokenizer))
            .add_filter(Box::new(LowercaseFilter))
            .add_filter(Box::new(NGramFilter::unbounded(min_len)))
    }

    /// Lower-cased form used for queries
    pub fn query() -> Self {
        Analyzer::new("query".to_string(), Box::new(KeywordTokenizer))
            .add_filter(Box::new(LowercaseFilter))
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filters: Vec<&str> = self.filters.iter().map(|filter| filter.name()).collect();
        f.debug_struct("Analyzer")
            .field("name", &self.name)
            .field("tokenizer", &self.tokenizer.name())
            .field("filters", &filters)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_substrings_are_lowercase_and_deduplicated() {
        let analyzer = Analyzer::name_substrings(3);
        let terms = analyzer.terms("Anna Nana");
        assert!(terms.contains("ann"));
        assert!(terms.contains("a na"));
        assert!(terms.contains("anna nana"));
        assert!(!terms.iter().any(|t| t.chars().count() < 3));
        assert!(!terms.iter().any(|t| t.chars().any(|c| c.is_uppercase())));
        // "ana" appears twice in the name but once in the set
        assert_eq!(terms.iter().filter(|t| t.as_str() == "ana").count(), 1);
    }

    #[test]
    fn name_substring_count_is_quadratic() {
        // L chars -> (L-2)(L-1)/2 substrings of length >= 3 when all distinct
        let terms = Analyzer::name_substrings(3).terms("abcdef");
        assert_eq!(terms.len(), 10);
    }

    #[test]
    fn query_analyzer_only_lowercases() {
        let tokens = Analyzer::query().analyze("CoOp");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "coop");
    }
}
