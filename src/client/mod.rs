//! Index service client
//!
//! [`IndexClient`] is the seam between the query pipeline and the remote
//! index: `ping` for connectivity checks, `select` for queries, and
//! `optimize` for the fire-and-forget index-optimize command. The reqwest
//! implementation lives in [`solr`]; [`factory`] resolves the endpoint
//! from configuration and fails closed when it is incomplete.

pub mod factory;
pub mod solr;

use crate::error::Result;
use crate::query::builder::BuiltQuery;
use crate::query::response::SelectOutcome;
use async_trait::async_trait;

pub use factory::{ConnectionFactory, ResolvedEndpoint};
pub use solr::SolrClient;

/// Client for a Solr-style index service
#[async_trait]
pub trait IndexClient: Send + Sync {
    /// Ping the index service and return the HTTP status code. `Err` is
    /// reserved for transport-level failures where no status exists.
    async fn ping(&self) -> Result<u16>;

    /// Execute a select query. Non-200 statuses are returned in the
    /// outcome, not as errors.
    async fn select(&self, built: &BuiltQuery) -> Result<SelectOutcome>;

    /// Issue an index-optimize command.
    async fn optimize(&self) -> Result<()>;
}
