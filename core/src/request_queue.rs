use crate::document::{Document, DocumentFilter, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::server::SearchServer;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
struct QueryResult {
    query: String,
    result_count: usize,
}

/// Rolling window over the most recent search requests.
///
/// Only the number of hits is kept per request; the window holds at most `window`
/// records and evicts the oldest first.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<QueryResult>,
    window: usize,
}

impl<'a> RequestQueue<'a> {
    /// Queue sized by the server's `request_window`.
    pub fn new(server: &'a SearchServer) -> Self {
        let window = server.config().request_window;
        Self { server, requests: VecDeque::with_capacity(window), window }
    }

    pub fn with_window(server: &'a SearchServer, window: usize) -> Result<Self> {
        if window == 0 {
            return Err(SearchError::InvalidConfig("request_window must be positive"));
        }
        Ok(Self { server, requests: VecDeque::with_capacity(window), window })
    }

    /// Run the query against the server and record how many documents it returned.
    /// Rejected queries propagate their error and leave the window untouched.
    pub fn add_find_request_with<F: DocumentFilter>(
        &mut self,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<Document>> {
        let results = self.server.find_top_documents_with(raw_query, filter)?;
        self.record(raw_query, results.len());
        Ok(results)
    }

    pub fn add_find_request_by_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, status)
    }

    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        self.add_find_request_with(raw_query, DocumentStatus::Active)
    }

    /// Requests in the current window that returned nothing. Recounted on every call.
    pub fn no_result_requests(&self) -> usize {
        self.requests.iter().filter(|r| r.result_count == 0).count()
    }

    /// Recorded `(query, result count)` pairs, oldest first.
    pub fn requests(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.requests.iter().map(|r| (r.query.as_str(), r.result_count))
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn window(&self) -> usize {
        self.window
    }

    fn record(&mut self, query: &str, result_count: usize) {
        if self.requests.len() == self.window {
            self.requests.pop_front();
        }
        self.requests.push_back(QueryResult { query: query.to_owned(), result_count });
        tracing::trace!(
            query,
            result_count,
            window_len = self.requests.len(),
            "request recorded"
        );
    }
}
