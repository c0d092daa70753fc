//! Query execution
//!
//! Sends a built query through the index client and normalizes every
//! failure mode to an absent result. Callers never see transport errors;
//! an absent result means "no results available", not "zero matches".

use crate::client::IndexClient;
use crate::diagnostics::DiagnosticsLog;
use crate::query::builder::BuiltQuery;
use crate::query::request::SearchRequest;
use crate::query::response::{FailureReason, QueryResult, SearchOutcome};
use std::sync::Arc;
use tracing::{error, warn};

/// Executes built queries and absorbs failures at this boundary.
#[derive(Clone)]
pub struct QueryExecutor {
    diagnostics: Arc<DiagnosticsLog>,
}

impl QueryExecutor {
    pub fn new(diagnostics: Arc<DiagnosticsLog>) -> Self {
        Self { diagnostics }
    }

    /// Execute a built query. An absent client short-circuits to
    /// `Failure(NoClient)` without any I/O.
    pub async fn execute(
        &self,
        client: Option<&dyn IndexClient>,
        request: &SearchRequest,
        built: &BuiltQuery,
    ) -> QueryResult {
        self.diagnostics.merge([
            ("Search Query".to_string(), request.query_text.clone()),
            ("Offset".to_string(), request.offset.to_string()),
            ("Count".to_string(), request.count.to_string()),
            ("fq".to_string(), request.filter_queries.join(", ")),
            (
                "Sort By".to_string(),
                request.sort_field.clone().unwrap_or_default(),
            ),
            ("Order".to_string(), request.sort_order.as_str().to_string()),
        ]);

        let Some(client) = client else {
            return QueryResult::Failure(FailureReason::NoClient);
        };

        let outcome = match client.select(built).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "failed to query index service");
                self.diagnostics.record_error(e.to_string());
                return QueryResult::Failure(FailureReason::Transport);
            }
        };

        if outcome.status != 200 {
            warn!(status = outcome.status, "index returned non-200 status");
            return QueryResult::Failure(FailureReason::BadStatus);
        }

        let Some(body) = outcome.body else {
            warn!("index returned 200 with an empty response body");
            return QueryResult::Failure(FailureReason::BadStatus);
        };

        let facet_counts = body
            .facet_counts
            .as_ref()
            .map(|f| f.decode())
            .unwrap_or_default();

        QueryResult::Success(SearchOutcome {
            status_code: outcome.status,
            num_found: body.response.num_found,
            documents: body.response.docs,
            facet_counts,
            highlighting: body.highlighting,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BridgeError, Result};
    use crate::query::builder::QueryBuilder;
    use crate::query::response::{SelectOutcome, SolrSelectBody};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory client returning a canned select outcome.
    struct StubClient {
        status: u16,
        body: Option<&'static str>,
        transport_error: bool,
        selects: AtomicUsize,
    }

    impl StubClient {
        fn with_status(status: u16, body: Option<&'static str>) -> Self {
            Self {
                status,
                body,
                transport_error: false,
                selects: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                status: 0,
                body: None,
                transport_error: true,
                selects: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IndexClient for StubClient {
        async fn ping(&self) -> Result<u16> {
            Ok(200)
        }

        async fn select(&self, _built: &BuiltQuery) -> Result<SelectOutcome> {
            self.selects.fetch_add(1, Ordering::SeqCst);
            if self.transport_error {
                return Err(BridgeError::Transport("connection reset".to_string()));
            }
            let body: Option<SolrSelectBody> =
                self.body.map(|b| serde_json::from_str(b).unwrap());
            Ok(SelectOutcome {
                status: self.status,
                body,
            })
        }

        async fn optimize(&self) -> Result<()> {
            Ok(())
        }
    }

    const OK_BODY: &str = r#"{
        "response": { "numFound": 7, "docs": [] },
        "facet_counts": { "facet_fields": { "post_type": ["post", 7] } }
    }"#;

    fn pipeline() -> (QueryExecutor, QueryBuilder, Arc<DiagnosticsLog>) {
        let diagnostics = Arc::new(DiagnosticsLog::new());
        (
            QueryExecutor::new(diagnostics.clone()),
            QueryBuilder::new(Default::default()),
            diagnostics,
        )
    }

    #[tokio::test]
    async fn test_absent_client_yields_no_client_failure() {
        let (executor, builder, _) = pipeline();
        let request = SearchRequest::new("hello");
        let built = builder.build(&request);

        let result = executor.execute(None, &request, &built).await;
        assert!(matches!(
            result,
            QueryResult::Failure(FailureReason::NoClient)
        ));
    }

    #[tokio::test]
    async fn test_non_200_status_yields_bad_status() {
        let (executor, builder, _) = pipeline();
        let client = StubClient::with_status(404, None);
        let request = SearchRequest::new("hello");
        let built = builder.build(&request);

        let result = executor.execute(Some(&client), &request, &built).await;
        assert!(matches!(
            result,
            QueryResult::Failure(FailureReason::BadStatus)
        ));
        assert_eq!(client.selects.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transport_error_absorbed() {
        let (executor, builder, diagnostics) = pipeline();
        let client = StubClient::failing();
        let request = SearchRequest::new("hello");
        let built = builder.build(&request);

        let result = executor.execute(Some(&client), &request, &built).await;
        assert!(matches!(
            result,
            QueryResult::Failure(FailureReason::Transport)
        ));
        assert!(diagnostics.last_error().unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_success_carries_counts_and_facets() {
        let (executor, builder, _) = pipeline();
        let client = StubClient::with_status(200, Some(OK_BODY));
        let request = SearchRequest::new("hello");
        let built = builder.build(&request);

        let result = executor.execute(Some(&client), &request, &built).await;
        let QueryResult::Success(outcome) = result else {
            panic!("expected success");
        };
        assert_eq!(outcome.num_found, 7);
        assert_eq!(outcome.facet_counts.get("post_type").unwrap()[0].count, 7);
    }

    #[tokio::test]
    async fn test_request_parameters_recorded() {
        let (executor, builder, diagnostics) = pipeline();
        let request = SearchRequest::new("hello")
            .with_offset(5)
            .with_count(20)
            .with_filter_queries(vec!["title:foo"])
            .with_sort("post_title", crate::query::request::SortOrder::Ascending);
        let built = builder.build(&request);

        let _ = executor.execute(None, &request, &built).await;

        let snapshot = diagnostics.snapshot();
        assert_eq!(snapshot.entries.get("Search Query").unwrap(), "hello");
        assert_eq!(snapshot.entries.get("Offset").unwrap(), "5");
        assert_eq!(snapshot.entries.get("Count").unwrap(), "20");
        assert_eq!(snapshot.entries.get("fq").unwrap(), "title:foo");
        assert_eq!(snapshot.entries.get("Sort By").unwrap(), "post_title");
        assert_eq!(snapshot.entries.get("Order").unwrap(), "asc");
    }
}
