use std::collections::BTreeSet;

/// Split text on space characters, dropping empty runs.
///
/// Only `' '` separates terms: tabs and punctuation stay part of the term and no case
/// folding is applied.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split(' ').filter(|w| !w.is_empty()).collect()
}

/// Write-once set of terms excluded from both indexing and querying.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Build the set from a space-delimited configuration string.
    pub fn parse(text: &str) -> Self {
        let words = split_into_words(text).into_iter().map(str::to_owned).collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Keep the terms that are not stop words, in their original order.
    pub fn filter<'a>(&self, words: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
        words.into_iter().filter(|w| !self.contains(w)).collect()
    }

    /// Tokenize and drop stop words in one pass.
    pub fn split_no_stop<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.filter(split_into_words(text))
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .flat_map(|s| {
                split_into_words(s.as_ref())
                    .into_iter()
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { words }
    }
}
