//! Client-side integration layer between a content-management application
//! and a Solr-style full-text search index.
//!
//! The crate covers three pieces of logic:
//!
//! - **Query pipeline**: turn a logical search request into a faceted,
//!   filtered, highlighted query, execute it, and normalize the response
//!   or its absence ([`query`])
//! - **Schema lifecycle**: detect that the remote schema is missing and
//!   push a replacement over a raw upload protocol, throttled to once per
//!   five minutes ([`schema`])
//! - **Stats cache**: amortize per-document-type counts behind a TTL
//!   cache ([`stats`])
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                Host application                   │
//! │   search calls      health checks     admin UI    │
//! └───────┬───────────────────┬──────────────┬───────┘
//!         ▼                   ▼              ▼
//!   QueryBuilder       SchemaSynchronizer  notices
//!   QueryExecutor        │ ping / upload
//!   StatsCache           ▼
//!         └────────▶ IndexClient (reqwest) ──▶ remote index
//! ```
//!
//! Everything is explicitly constructed and dependency-injected; there are
//! no process-wide singletons. Query-path failures are absorbed into
//! [`query::QueryResult::Failure`]; schema-path failures surface as
//! descriptive strings for the admin-notice layer.

pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notices;
pub mod query;
pub mod schema;
pub mod state;
pub mod stats;

pub use client::{ConnectionFactory, IndexClient, SolrClient};
pub use config::{BooleanOperator, BridgeConfig, FacetConfiguration};
pub use diagnostics::DiagnosticsLog;
pub use error::{BridgeError, Result};
pub use query::{BuiltQuery, QueryBuilder, QueryExecutor, QueryResult, SearchRequest, SortOrder};
pub use schema::{SchemaCheckOutcome, SchemaSynchronizer};
pub use stats::{IndexStats, StatsCache};
