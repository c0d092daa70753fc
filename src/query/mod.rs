//! Query construction and execution
//!
//! The query pipeline turns a logical [`SearchRequest`] into a faceted,
//! filtered, highlighted [`BuiltQuery`], executes it through the index
//! client, and normalizes the response or its absence into a
//! [`QueryResult`]:
//!
//! ```text
//! SearchRequest ──▶ QueryBuilder ──▶ BuiltQuery ──▶ QueryExecutor ──▶ QueryResult
//! ```
//!
//! Failures on the query path (`NoClient`, `Transport`, `BadStatus`) are
//! fully absorbed at the executor boundary; callers only ever see a
//! `Failure` value, never an error.

pub mod builder;
pub mod executor;
pub mod request;
pub mod response;

pub use builder::{BuiltQuery, HighlightSpec, QueryBuilder, SortSpec};
pub use executor::QueryExecutor;
pub use request::{SearchRequest, SortOrder};
pub use response::{
    FacetCount, FailureReason, QueryResult, SearchOutcome, SelectOutcome, SolrFacetCounts,
    SolrSelectBody,
};
