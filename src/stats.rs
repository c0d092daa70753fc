//! Index statistics cache
//!
//! Amortizes per-document-type counts behind a single cached mapping. A
//! cold cache costs one round trip per type (count=1 queries read purely
//! for `numFound`); there is no batching. TTL expiry is the only
//! invalidation path.

use crate::client::IndexClient;
use crate::query::builder::QueryBuilder;
use crate::query::executor::QueryExecutor;
use crate::query::request::{SearchRequest, SortOrder};
use crate::state::TtlCache;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Cache key for the whole stats mapping (not per type)
const STATS_CACHE_KEY: &str = "solr_index_stats";

/// How long a computed stats mapping stays valid
pub const STATS_TTL: Duration = Duration::from_secs(300);

/// Mapping from document-type name to indexed document count
pub type IndexStats = HashMap<String, u64>;

/// Memoized per-type document counts.
#[derive(Clone)]
pub struct StatsCache {
    cache: TtlCache<String, IndexStats>,
    builder: QueryBuilder,
    executor: QueryExecutor,
}

impl StatsCache {
    pub fn new(builder: QueryBuilder, executor: QueryExecutor) -> Self {
        Self {
            cache: TtlCache::new(1, STATS_TTL),
            builder,
            executor,
        }
    }

    /// Return the per-type count mapping, computing and caching it on a
    /// miss. Failed lookups count as zero.
    pub async fn index_stats(
        &self,
        client: Option<&dyn IndexClient>,
        document_types: &[String],
    ) -> IndexStats {
        if let Some(stats) = self.cache.get(&STATS_CACHE_KEY.to_string()).await {
            return stats;
        }

        let mut stats = IndexStats::with_capacity(document_types.len());
        for doc_type in document_types {
            let count = self.fetch_stat(client, doc_type).await;
            stats.insert(doc_type.clone(), count);
        }

        debug!(types = document_types.len(), "computed index stats");
        self.cache
            .insert(STATS_CACHE_KEY.to_string(), stats.clone())
            .await;
        stats
    }

    /// Query the index for one type and read `numFound`.
    async fn fetch_stat(&self, client: Option<&dyn IndexClient>, doc_type: &str) -> u64 {
        let request = SearchRequest::new(format!("post_type:{}", doc_type))
            .with_offset(0)
            .with_count(1)
            .with_sort("score", SortOrder::Descending);

        let built = self.builder.build(&request);
        self.executor
            .execute(client, &request, &built)
            .await
            .num_found_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticsLog;
    use crate::error::Result;
    use crate::query::builder::BuiltQuery;
    use crate::query::response::{SelectOutcome, SolrSelectBody};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Client answering every select with a fixed count, tracking calls.
    struct CountingClient {
        num_found: u64,
        selects: AtomicUsize,
    }

    impl CountingClient {
        fn new(num_found: u64) -> Self {
            Self {
                num_found,
                selects: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IndexClient for CountingClient {
        async fn ping(&self) -> Result<u16> {
            Ok(200)
        }

        async fn select(&self, built: &BuiltQuery) -> Result<SelectOutcome> {
            self.selects.fetch_add(1, Ordering::SeqCst);
            assert_eq!(built.rows, 1);
            assert_eq!(built.start, 0);

            let body: SolrSelectBody = serde_json::from_value(serde_json::json!({
                "response": { "numFound": self.num_found, "docs": [] }
            }))
            .unwrap();
            Ok(SelectOutcome {
                status: 200,
                body: Some(body),
            })
        }

        async fn optimize(&self) -> Result<()> {
            Ok(())
        }
    }

    fn stats_cache() -> StatsCache {
        let diagnostics = Arc::new(DiagnosticsLog::new());
        StatsCache::new(
            QueryBuilder::new(Default::default()),
            QueryExecutor::new(diagnostics),
        )
    }

    #[tokio::test]
    async fn test_cold_cache_issues_one_query_per_type() {
        let cache = stats_cache();
        let client = CountingClient::new(12);
        let types = vec!["post".to_string(), "page".to_string()];

        let stats = cache.index_stats(Some(&client), &types).await;

        assert_eq!(client.selects.load(Ordering::SeqCst), 2);
        assert_eq!(stats.get("post"), Some(&12));
        assert_eq!(stats.get("page"), Some(&12));
    }

    #[tokio::test]
    async fn test_warm_cache_issues_no_queries() {
        let cache = stats_cache();
        let client = CountingClient::new(3);
        let types = vec!["post".to_string(), "page".to_string()];

        let first = cache.index_stats(Some(&client), &types).await;
        let second = cache.index_stats(Some(&client), &types).await;

        assert_eq!(client.selects.load(Ordering::SeqCst), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_absent_client_counts_as_zero() {
        let cache = stats_cache();
        let types = vec!["post".to_string()];

        let stats = cache.index_stats(None, &types).await;
        assert_eq!(stats.get("post"), Some(&0));
    }
}
