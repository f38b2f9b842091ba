use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::SearchHit;

/// A full response page from the search index
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchResults {
    #[serde(default)]
    pub hits: Vec<SearchHit>,

    /// Paging, facet and timing fields, passed through untouched
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl From<Vec<SearchHit>> for SearchResults {
    fn from(hits: Vec<SearchHit>) -> Self {
        SearchResults {
            hits,
            extra: HashMap::new(),
        }
    }
}
