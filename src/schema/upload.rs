//! Raw schema upload transport

use crate::client::factory::ResolvedEndpoint;
use crate::error::{BridgeError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Byte-stream PUT transport for schema documents. The schema file is an
/// opaque XML document transferred byte-for-byte.
#[async_trait]
pub trait SchemaTransport: Send + Sync {
    /// Upload the schema document and return the HTTP status code. `Err`
    /// is reserved for transport-level failures where no status exists.
    async fn put_schema(&self, body: Vec<u8>) -> Result<u16>;
}

/// Reqwest PUT to the index's dedicated upload port, authenticated with
/// the client certificate.
pub struct HttpSchemaUploader {
    url: String,
    client_cert: PathBuf,
    timeout: Duration,
}

impl HttpSchemaUploader {
    pub fn new(endpoint: &ResolvedEndpoint, upload_port: u16, timeout: Duration) -> Self {
        Self {
            url: format!("https://{}:{}{}", endpoint.host, upload_port, endpoint.path),
            client_cert: endpoint.client_cert.clone(),
            timeout,
        }
    }

    pub fn target_url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SchemaTransport for HttpSchemaUploader {
    async fn put_schema(&self, body: Vec<u8>) -> Result<u16> {
        let pem = tokio::fs::read(&self.client_cert).await?;
        let identity = reqwest::Identity::from_pem(&pem)
            .map_err(|e| BridgeError::Configuration(format!("invalid client cert: {}", e)))?;

        // Peer verification is disabled on purpose: the upload endpoint is
        // trusted via network placement, not certificate validation.
        let client = reqwest::Client::builder()
            .identity(identity)
            .danger_accept_invalid_certs(true)
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                BridgeError::Configuration(format!("failed to build upload client: {}", e))
            })?;

        info!(url = %self.url, bytes = body.len(), "uploading schema");
        let response = client
            .put(&self.url)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(body)
            .send()
            .await?;

        Ok(response.status().as_u16())
    }
}
