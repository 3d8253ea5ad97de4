use crate::document::{DocId, DocumentStatus};
use crate::error::{Result, SearchError};
use std::collections::{BTreeMap, HashMap};

/// Per-document metadata kept alongside the postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    pub status: DocumentStatus,
    pub rating: i32,
    /// Number of terms left after stop-word removal.
    pub term_count: usize,
}

/// Term → (document → normalized term frequency), plus the reverse mapping.
///
/// A term is only ever a key once at least one document contains it, so the document
/// frequency used as the IDF denominator is never zero.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    word_to_document_freqs: HashMap<String, BTreeMap<DocId, f64>>,
    document_to_word_freqs: BTreeMap<DocId, BTreeMap<String, f64>>,
    documents: BTreeMap<DocId, DocumentData>,
    num_docs: usize,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document from its already filtered terms.
    ///
    /// Ids are never overwritten: a second insert with the same id fails and leaves
    /// the index untouched.
    pub fn add_document(
        &mut self,
        id: DocId,
        words: &[&str],
        status: DocumentStatus,
        rating: i32,
    ) -> Result<()> {
        if self.documents.contains_key(&id) {
            return Err(SearchError::DuplicateDocument(id));
        }

        let mut word_freqs: BTreeMap<String, f64> = BTreeMap::new();
        if !words.is_empty() {
            let inv_word_count = 1.0 / words.len() as f64;
            for word in words {
                *word_freqs.entry((*word).to_owned()).or_insert(0.0) += inv_word_count;
            }
        }
        for (word, tf) in &word_freqs {
            self.word_to_document_freqs
                .entry(word.clone())
                .or_default()
                .insert(id, *tf);
        }

        self.document_to_word_freqs.insert(id, word_freqs);
        self.documents.insert(id, DocumentData { status, rating, term_count: words.len() });
        self.num_docs += 1;
        Ok(())
    }

    /// Documents containing `term` with their term frequencies, ordered by id.
    pub fn postings(&self, term: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.word_to_document_freqs.get(term)
    }

    pub fn doc_frequency(&self, term: &str) -> usize {
        self.postings(term).map(|p| p.len()).unwrap_or(0)
    }

    pub fn num_docs(&self) -> usize {
        self.num_docs
    }

    pub fn num_terms(&self) -> usize {
        self.word_to_document_freqs.len()
    }

    pub fn document(&self, id: DocId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    /// Term frequencies of one document. Registered documents without terms map to an
    /// empty map; unknown ids yield `None`.
    pub fn word_frequencies(&self, id: DocId) -> Option<&BTreeMap<String, f64>> {
        self.document_to_word_freqs.get(&id)
    }

    /// Registered ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.documents.keys().copied()
    }
}
