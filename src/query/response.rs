//! Index response model
//!
//! Deserialization of the index service's JSON `select` response and the
//! normalized result handed back to callers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Facet count for a single field value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetCount {
    pub value: String,
    pub count: u64,
}

/// The `response` section of a select reply
#[derive(Debug, Clone, Deserialize)]
pub struct SolrDocList {
    #[serde(rename = "numFound")]
    pub num_found: u64,

    #[serde(default)]
    pub docs: Vec<serde_json::Value>,
}

/// The `facet_counts` section of a select reply. Facet fields arrive as
/// flat `[value, count, value, count, ...]` arrays.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolrFacetCounts {
    #[serde(default)]
    pub facet_fields: HashMap<String, Vec<serde_json::Value>>,
}

impl SolrFacetCounts {
    /// Decode the pairwise facet arrays into per-field counts. Entries
    /// that do not form a (string, number) pair are skipped.
    pub fn decode(&self) -> HashMap<String, Vec<FacetCount>> {
        let mut decoded = HashMap::new();
        for (field, flat) in &self.facet_fields {
            let mut counts = Vec::with_capacity(flat.len() / 2);
            for pair in flat.chunks_exact(2) {
                if let (Some(value), Some(count)) = (pair[0].as_str(), pair[1].as_u64()) {
                    counts.push(FacetCount {
                        value: value.to_string(),
                        count,
                    });
                }
            }
            decoded.insert(field.clone(), counts);
        }
        decoded
    }
}

/// Parsed body of a select reply
#[derive(Debug, Clone, Deserialize)]
pub struct SolrSelectBody {
    pub response: SolrDocList,

    #[serde(default)]
    pub facet_counts: Option<SolrFacetCounts>,

    #[serde(default)]
    pub highlighting: Option<serde_json::Value>,
}

/// Raw outcome of one select round trip: HTTP-level status plus the parsed
/// body when one was returned.
#[derive(Debug, Clone)]
pub struct SelectOutcome {
    pub status: u16,
    pub body: Option<SolrSelectBody>,
}

/// Why a query produced no result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Configuration incomplete or client unavailable
    NoClient,

    /// Network/protocol-level failure
    Transport,

    /// Non-200 status or empty response
    BadStatus,
}

/// Successful query outcome
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub status_code: u16,
    pub num_found: u64,
    pub documents: Vec<serde_json::Value>,
    pub facet_counts: HashMap<String, Vec<FacetCount>>,
    pub highlighting: Option<serde_json::Value>,
}

/// Normalized query result. There is no partial-success variant: any
/// transport error or non-200 status collapses the whole result to
/// `Failure`.
#[derive(Debug, Clone)]
pub enum QueryResult {
    Success(SearchOutcome),
    Failure(FailureReason),
}

impl QueryResult {
    pub fn is_success(&self) -> bool {
        matches!(self, QueryResult::Success(_))
    }

    /// Document count for stats purposes; failures count as zero.
    pub fn num_found_or_zero(&self) -> u64 {
        match self {
            QueryResult::Success(outcome) => outcome.num_found,
            QueryResult::Failure(_) => 0,
        }
    }
}
