use crate::config::SearchConfig;
use crate::document::{DocId, Document, DocumentFilter, DocumentStatus};
use crate::error::Result;
use crate::index::{DocumentData, InvertedIndex};
use crate::query::{parse_query, Query};
use crate::tokenizer::StopWords;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Relevances closer than this are ranked as equal and fall through to the tie-break.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// In-memory TF-IDF search engine over short text documents.
///
/// Writes (`add_document`) need `&mut self`; ranking only borrows the index, so any
/// number of readers can query a stable server concurrently.
#[derive(Debug, Clone)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    config: SearchConfig,
}

impl SearchServer {
    /// Server with the default configuration and stop words taken from a
    /// space-delimited string.
    pub fn new(stop_words: &str) -> Self {
        Self {
            stop_words: StopWords::parse(stop_words),
            index: InvertedIndex::new(),
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(stop_words: StopWords, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { stop_words, index: InvertedIndex::new(), config })
    }

    pub fn add_document(
        &mut self,
        id: DocId,
        text: &str,
        status: DocumentStatus,
        rating: i32,
    ) -> Result<()> {
        let words = self.stop_words.split_no_stop(text);
        if let Err(err) = self.index.add_document(id, &words, status, rating) {
            tracing::warn!(doc_id = id, %err, "document rejected");
            return Err(err);
        }
        tracing::debug!(doc_id = id, terms = words.len(), %status, rating, "document added");
        Ok(())
    }

    /// Top documents with status `Active`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, DocumentStatus::Active)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, status)
    }

    /// Rank every document matching `raw_query` and accepted by `filter`.
    ///
    /// Results are ordered by relevance descending, then rating descending, then id
    /// ascending, and cut to `max_result_document_count`.
    pub fn find_top_documents_with<F: DocumentFilter>(
        &self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>> {
        let query = match parse_query(raw_query, &self.stop_words) {
            Ok(query) => query,
            Err(err) => {
                tracing::warn!(query = raw_query, %err, "query rejected");
                return Err(err);
            }
        };

        let mut matched = self.find_all_documents(&query, &filter);
        let total_hits = matched.len();
        matched.sort_by(compare_ranked);
        matched.truncate(self.config.max_result_document_count);

        tracing::debug!(
            query = raw_query,
            plus = query.plus.len(),
            minus = query.minus.len(),
            total_hits,
            returned = matched.len(),
            "query ranked"
        );
        Ok(matched)
    }

    fn find_all_documents<F: DocumentFilter>(&self, query: &Query, filter: &F) -> Vec<Document> {
        let mut document_to_relevance: HashMap<DocId, f64> = HashMap::new();

        for word in &query.plus {
            let Some(postings) = self.index.postings(word) else {
                continue;
            };
            let idf = self.inverse_document_freq(postings.len());
            for (&id, &tf) in postings {
                *document_to_relevance.entry(id).or_insert(0.0) += tf * idf;
            }
        }

        for word in &query.minus {
            if let Some(postings) = self.index.postings(word) {
                for id in postings.keys() {
                    document_to_relevance.remove(id);
                }
            }
        }

        document_to_relevance
            .into_iter()
            .filter_map(|(id, relevance)| {
                let data = self.index.document(id)?;
                filter
                    .matches(id, data.status, data.rating)
                    .then_some(Document { id, relevance, rating: data.rating })
            })
            .collect()
    }

    // Callers pass the length of an existing posting list, so `doc_frequency > 0`
    // and `num_docs >= doc_frequency`.
    fn inverse_document_freq(&self, doc_frequency: usize) -> f64 {
        (self.index.num_docs() as f64 / doc_frequency as f64).ln()
    }

    pub fn document_count(&self) -> usize {
        self.index.num_docs()
    }

    pub fn document(&self, id: DocId) -> Option<&DocumentData> {
        self.index.document(id)
    }

    pub fn word_frequencies(&self, id: DocId) -> Option<&BTreeMap<String, f64>> {
        self.index.word_frequencies(id)
    }

    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ {
        self.index.document_ids()
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

fn relevance_bucket(relevance: f64) -> i64 {
    (relevance / RELEVANCE_EPSILON).round() as i64
}

fn compare_ranked(lhs: &Document, rhs: &Document) -> Ordering {
    relevance_bucket(rhs.relevance)
        .cmp(&relevance_bucket(lhs.relevance))
        .then_with(|| rhs.rating.cmp(&lhs.rating))
        .then_with(|| lhs.id.cmp(&rhs.id))
}
