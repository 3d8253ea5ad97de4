use crate::error::{Result, SearchError};
use crate::tokenizer::StopWords;
use std::collections::BTreeSet;

/// Parsed query: deduplicated plus-terms and minus-terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus: BTreeSet<String>,
    pub minus: BTreeSet<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.plus.is_empty() && self.minus.is_empty()
    }
}

/// Parse raw query text.
///
/// Stop words are removed on the full token, sign included, before classification: with
/// `the` as a stop word, `-the` still becomes the minus-term `the`.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();
    for word in stop_words.split_no_stop(text) {
        match word.strip_prefix('-') {
            Some("") => {
                return Err(SearchError::InvalidQuery {
                    term: word.to_owned(),
                    reason: "minus sign without a term",
                })
            }
            Some(body) if body.starts_with('-') => {
                return Err(SearchError::InvalidQuery {
                    term: word.to_owned(),
                    reason: "more than one minus sign",
                })
            }
            Some(body) => {
                query.minus.insert(body.to_owned());
            }
            None => {
                query.plus.insert(word.to_owned());
            }
        }
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn splits_plus_and_minus_terms() {
        let stop = StopWords::parse("a an on");
        let query = parse_query("cat -dog on a cat mat -dog", &stop).unwrap();
        assert_eq!(terms(&query.plus), vec!["cat", "mat"]);
        assert_eq!(terms(&query.minus), vec!["dog"]);
    }

    #[test]
    fn signed_stop_words_survive_filtering() {
        let stop = StopWords::parse("the");
        let query = parse_query("the -the", &stop).unwrap();
        assert!(query.plus.is_empty());
        assert_eq!(terms(&query.minus), vec!["the"]);
    }

    #[test]
    fn rejects_bare_and_doubled_minus() {
        let stop = StopWords::default();
        assert!(matches!(
            parse_query("cat -", &stop),
            Err(SearchError::InvalidQuery { ref term, .. }) if term == "-"
        ));
        assert!(matches!(
            parse_query("--cat", &stop),
            Err(SearchError::InvalidQuery { .. })
        ));
    }

    #[test]
    fn stop_word_only_query_is_empty() {
        let stop = StopWords::parse("a an on");
        assert!(parse_query("a  an on", &stop).unwrap().is_empty());
        assert!(parse_query("", &stop).unwrap().is_empty());
    }

    #[test]
    fn interior_hyphens_are_plus_terms() {
        let query = parse_query("well-known", &StopWords::default()).unwrap();
        assert_eq!(terms(&query.plus), vec!["well-known"]);
    }
}
