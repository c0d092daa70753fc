//! Logical search requests

use serde::{Deserialize, Serialize};

/// Sort order for search results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

/// A logical search request. Immutable once constructed; created per
/// incoming search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search query text (passed through to the index query language)
    pub query_text: String,

    /// Offset for pagination
    pub offset: usize,

    /// Number of results to return
    pub count: usize,

    /// Filter queries, applied in order; blank entries are dropped at
    /// build time
    pub filter_queries: Vec<String>,

    /// Field to sort by; empty or absent selects the default sort
    pub sort_field: Option<String>,

    /// Sort direction
    pub sort_order: SortOrder,
}

impl SearchRequest {
    /// Create a new search request with default pagination
    pub fn new(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            offset: 0,
            count: 10,
            filter_queries: Vec::new(),
            sort_field: None,
            sort_order: SortOrder::Descending,
        }
    }

    /// Set offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Set result count
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set filter queries
    pub fn with_filter_queries(mut self, filters: Vec<impl Into<String>>) -> Self {
        self.filter_queries = filters.into_iter().map(|f| f.into()).collect();
        self
    }

    /// Set sorting
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = SearchRequest::new("database error")
            .with_offset(10)
            .with_count(50)
            .with_filter_queries(vec!["post_type:post"])
            .with_sort("post_title", SortOrder::Ascending);

        assert_eq!(request.query_text, "database error");
        assert_eq!(request.offset, 10);
        assert_eq!(request.count, 50);
        assert_eq!(request.filter_queries, vec!["post_type:post"]);
        assert_eq!(request.sort_field.as_deref(), Some("post_title"));
        assert_eq!(request.sort_order, SortOrder::Ascending);
    }

    #[test]
    fn test_sort_order_rendering() {
        assert_eq!(SortOrder::Ascending.as_str(), "asc");
        assert_eq!(SortOrder::Descending.as_str(), "desc");
    }
}
