//! Schema lifecycle management
//!
//! Detects that the remote index is missing its schema definition and
//! pushes a replacement over a raw file-upload protocol. The state machine:
//!
//! ```text
//! Idle ─▶ Throttled
//!   └──▶ Checking ─▶ Ok
//!               └──▶ SchemaMissing ─▶ Uploading ─▶ UploadOk | UploadFailed
//! ```
//!
//! Only a literal 404 from ping triggers an upload; every other ping
//! failure records diagnostics and stops. Preflight checks (site sanity,
//! schema file, client certificate) run before any network call.

pub mod synchronizer;
pub mod upload;

pub use synchronizer::{
    NoPrecheck, SchemaCheckOutcome, SchemaSynchronizer, SitePrecheck, SCHEMA_CHECK_TTL,
};
pub use upload::{HttpSchemaUploader, SchemaTransport};
