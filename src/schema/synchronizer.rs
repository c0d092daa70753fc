//! Schema presence check and upload
//!
//! Periodic health check called deliberately by the host application:
//! ping the index, and when the remote reports the schema missing
//! (a literal 404, nothing broader), push a replacement over the raw
//! upload transport. The whole check is throttled to once per five
//! minutes regardless of outcome.

use crate::client::factory::{ConnectionFactory, ResolvedEndpoint};
use crate::client::IndexClient;
use crate::config::BridgeConfig;
use crate::diagnostics::DiagnosticsLog;
use crate::schema::upload::{HttpSchemaUploader, SchemaTransport};
use crate::state::ThrottleFlag;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// How long one check suppresses the next
pub const SCHEMA_CHECK_TTL: Duration = Duration::from_secs(300);

/// Site-level sanity check run before any upload. Returns a descriptive
/// message on failure, `None` when the site is fit to upload.
pub trait SitePrecheck: Send + Sync {
    fn check(&self) -> Option<String>;
}

/// Precheck that always passes.
pub struct NoPrecheck;

impl SitePrecheck for NoPrecheck {
    fn check(&self) -> Option<String> {
        None
    }
}

/// Result of one schema check invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaCheckOutcome {
    /// Not a managed environment; schema checking never runs here
    NotManaged,

    /// A check ran within the throttle window; nothing was done
    Throttled,

    /// Ping succeeded, or failed in a way that does not trigger an upload
    Healthy,

    /// A local precondition failed before any network call
    PreflightFailed { message: String },

    /// Schema uploaded successfully
    Uploaded { message: String },

    /// Schema upload returned a non-200 status or failed in transit
    UploadFailed { message: String },
}

impl SchemaCheckOutcome {
    /// Operator-facing message, when the outcome produced one.
    pub fn message(&self) -> Option<&str> {
        match self {
            SchemaCheckOutcome::PreflightFailed { message }
            | SchemaCheckOutcome::Uploaded { message }
            | SchemaCheckOutcome::UploadFailed { message } => Some(message),
            _ => None,
        }
    }
}

/// Checks for a missing remote schema and uploads a replacement.
pub struct SchemaSynchronizer {
    config: Arc<BridgeConfig>,
    factory: ConnectionFactory,
    throttle: ThrottleFlag,
    diagnostics: Arc<DiagnosticsLog>,
    precheck: Arc<dyn SitePrecheck>,
    transport: Option<Arc<dyn SchemaTransport>>,
}

impl SchemaSynchronizer {
    pub fn new(config: Arc<BridgeConfig>, diagnostics: Arc<DiagnosticsLog>) -> Self {
        Self {
            factory: ConnectionFactory::new(config.clone()),
            throttle: ThrottleFlag::new(SCHEMA_CHECK_TTL),
            config,
            diagnostics,
            precheck: Arc::new(NoPrecheck),
            transport: None,
        }
    }

    /// Replace the site precheck.
    pub fn with_precheck(mut self, precheck: Arc<dyn SitePrecheck>) -> Self {
        self.precheck = precheck;
        self
    }

    /// Replace the upload transport (the default is a fresh
    /// [`HttpSchemaUploader`] per invocation).
    pub fn with_transport(mut self, transport: Arc<dyn SchemaTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Run the schema check. No-op outside managed environments; a hard
    /// no-op while the throttle flag is set. After any actual check
    /// attempt the flag is set unconditionally, so the check runs at most
    /// once per five minutes regardless of outcome.
    pub async fn check(&self) -> SchemaCheckOutcome {
        if !self.config.endpoint.is_managed() {
            return SchemaCheckOutcome::NotManaged;
        }

        if self.throttle.is_set().await {
            return SchemaCheckOutcome::Throttled;
        }

        let outcome = self.run_check().await;
        self.throttle.set().await;
        outcome
    }

    async fn run_check(&self) -> SchemaCheckOutcome {
        let endpoint = match self.factory.resolve_endpoint() {
            Ok(endpoint) => endpoint,
            Err(e) => {
                self.diagnostics.record_error(e.to_string());
                return SchemaCheckOutcome::Healthy;
            }
        };

        let client = match self.factory.build_with(&endpoint) {
            Ok(client) => client,
            Err(e) => {
                self.diagnostics.record_error(e.to_string());
                return SchemaCheckOutcome::Healthy;
            }
        };

        match client.ping().await {
            Ok(200) => {
                self.diagnostics.record_status(200);
                SchemaCheckOutcome::Healthy
            }
            Ok(404) => {
                // Schema is missing on the remote.
                self.diagnostics.record_status(404);
                info!("index ping returned 404; submitting schema");
                self.submit_schema(&endpoint).await
            }
            Ok(code) => {
                // Non-404 failures never trigger an upload.
                self.diagnostics.record_status(code);
                self.diagnostics
                    .record_error(format!("ping failed with status {}", code));
                warn!(status = code, "index ping failed");
                SchemaCheckOutcome::Healthy
            }
            Err(e) => {
                warn!(error = %e, "index ping failed");
                self.diagnostics.record_error(e.to_string());
                SchemaCheckOutcome::Healthy
            }
        }
    }

    /// Upload the schema document after preflight checks. Fails fast, with
    /// no network traffic, when the site precheck fails or the schema or
    /// certificate file is missing.
    pub async fn submit_schema(&self, endpoint: &ResolvedEndpoint) -> SchemaCheckOutcome {
        if let Some(message) = self.precheck.check() {
            return SchemaCheckOutcome::PreflightFailed { message };
        }

        let schema = self.resolve_schema_file();
        if !schema.is_file() {
            return SchemaCheckOutcome::PreflightFailed {
                message: format!("{} does not exist.", schema.display()),
            };
        }

        if !endpoint.client_cert.is_file() {
            return SchemaCheckOutcome::PreflightFailed {
                message: format!("{} does not exist.", endpoint.client_cert.display()),
            };
        }

        let body = match tokio::fs::read(&schema).await {
            Ok(body) => body,
            Err(e) => {
                return SchemaCheckOutcome::PreflightFailed {
                    message: format!("failed to read {}: {}", schema.display(), e),
                }
            }
        };

        let transport: Arc<dyn SchemaTransport> = match &self.transport {
            Some(transport) => transport.clone(),
            None => Arc::new(HttpSchemaUploader::new(
                endpoint,
                self.config.schema.upload_port,
                Duration::from_secs(self.config.http.timeout_secs),
            )),
        };

        match transport.put_schema(body).await {
            Ok(200) => {
                self.diagnostics.record_status(200);
                SchemaCheckOutcome::Uploaded {
                    message: "Schema Upload Success: 200".to_string(),
                }
            }
            Ok(code) => {
                self.diagnostics.record_status(code);
                SchemaCheckOutcome::UploadFailed {
                    message: format!("Schema Upload Error: {}", code),
                }
            }
            Err(e) => {
                self.diagnostics.record_error(e.to_string());
                SchemaCheckOutcome::UploadFailed {
                    message: "Schema Upload Error: 0".to_string(),
                }
            }
        }
    }

    /// Prefer a custom schema override under the uploads area, falling
    /// back to the bundled default.
    fn resolve_schema_file(&self) -> PathBuf {
        let custom = self.config.schema.override_schema();
        if custom.is_file() {
            custom
        } else {
            self.config.schema.bundled_schema.clone()
        }
    }
}
