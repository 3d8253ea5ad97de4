use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type DocId = u32;

/// Lifecycle tag carried by every indexed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    #[default]
    Active,
    Deprioritized,
    Excluded,
    Retired,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Active => "active",
            DocumentStatus::Deprioritized => "deprioritized",
            DocumentStatus::Excluded => "excluded",
            DocumentStatus::Retired => "retired",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(DocumentStatus::Active),
            "deprioritized" => Ok(DocumentStatus::Deprioritized),
            "excluded" => Ok(DocumentStatus::Excluded),
            "retired" => Ok(DocumentStatus::Retired),
            other => Err(format!("unknown document status: {other}")),
        }
    }
}

/// A ranked hit. `relevance` is computed per query and never stored on the index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "document_id")]
    pub id: DocId,
    pub relevance: f64,
    pub rating: i32,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ document_id = {}, relevance = {}, rating = {} }}",
            self.id, self.relevance, self.rating
        )
    }
}

/// Pure predicate over a candidate's id, status and rating.
pub trait DocumentFilter {
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool;
}

impl<F> DocumentFilter for F
where
    F: Fn(DocId, DocumentStatus, i32) -> bool,
{
    fn matches(&self, id: DocId, status: DocumentStatus, rating: i32) -> bool {
        self(id, status, rating)
    }
}

impl DocumentFilter for DocumentStatus {
    fn matches(&self, _id: DocId, status: DocumentStatus, _rating: i32) -> bool {
        *self == status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_like_the_line_printer() {
        let doc = Document { id: 3, relevance: 0.5, rating: -2 };
        assert_eq!(doc.to_string(), "{ document_id = 3, relevance = 0.5, rating = -2 }");
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Retired".parse::<DocumentStatus>(), Ok(DocumentStatus::Retired));
        assert!("gone".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn closures_and_statuses_filter() {
        let even = |id: DocId, _: DocumentStatus, _: i32| id % 2 == 0;
        assert!(even.matches(2, DocumentStatus::Excluded, 0));
        assert!(!even.matches(1, DocumentStatus::Active, 0));
        assert!(DocumentStatus::Excluded.matches(1, DocumentStatus::Excluded, 9));
        assert!(!DocumentStatus::Active.matches(1, DocumentStatus::Excluded, 9));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let doc = Document { id: 1, relevance: 0.25, rating: 4 };
        let json = serde_json::to_value(doc).unwrap();
        assert_eq!(json["document_id"], 1);
        assert_eq!(json["rating"], 4);
        let status: DocumentStatus = serde_json::from_str("\"deprioritized\"").unwrap();
        assert_eq!(status, DocumentStatus::Deprioritized);
    }
}
