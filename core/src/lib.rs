//! In-memory TF-IDF document search.
//!
//! Documents are split on spaces, stripped of stop words and stored in an inverted
//! index of normalized term frequencies. Queries mix plus-terms, which score, and
//! `-`-prefixed minus-terms, which disqualify. A [`RequestQueue`] tracks how many of
//! the latest requests came back empty.

pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod paginator;
pub mod query;
pub mod request_queue;
pub mod server;
pub mod tokenizer;

pub use config::SearchConfig;
pub use document::{DocId, Document, DocumentFilter, DocumentStatus};
pub use error::{Result, SearchError};
pub use index::{DocumentData, InvertedIndex};
pub use paginator::{paginate, Paginator};
pub use query::{parse_query, Query};
pub use request_queue::RequestQueue;
pub use server::SearchServer;
pub use tokenizer::{split_into_words, StopWords};
