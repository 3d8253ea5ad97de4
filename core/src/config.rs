use crate::error::{Result, SearchError};
use serde::Deserialize;

pub const DEFAULT_MAX_RESULT_DOCUMENT_COUNT: usize = 5;
/// One request per minute over a day.
pub const DEFAULT_REQUEST_WINDOW: usize = 1440;

/// Tunables injected into the server and request queue at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Cap on the length of every ranked result list.
    pub max_result_document_count: usize,
    /// Number of most recent requests the request queue remembers.
    pub request_window: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_result_document_count: DEFAULT_MAX_RESULT_DOCUMENT_COUNT,
            request_window: DEFAULT_REQUEST_WINDOW,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_result_document_count == 0 {
            return Err(SearchError::InvalidConfig("max_result_document_count must be positive"));
        }
        if self.request_window == 0 {
            return Err(SearchError::InvalidConfig("request_window must be positive"));
        }
        Ok(())
    }

    /// Parse a JSON object; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)
            .map_err(|_| SearchError::InvalidConfig("malformed configuration json"))?;
        config.validate()?;
        Ok(config)
    }
}
