//! Connection factory
//!
//! Resolves the endpoint once per invocation and builds the HTTP client.
//! If host, port, or path is empty after override resolution, construction
//! fails closed rather than producing a half-configured client.

use crate::client::solr::SolrClient;
use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

/// Fully resolved index endpoint, shared by ping/select/upload within one
/// invocation.
#[derive(Debug, Clone)]
pub struct ResolvedEndpoint {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub client_cert: PathBuf,
}

impl ResolvedEndpoint {
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
    }
}

/// Builds index clients from configuration.
#[derive(Clone)]
pub struct ConnectionFactory {
    config: Arc<BridgeConfig>,
}

impl ConnectionFactory {
    pub fn new(config: Arc<BridgeConfig>) -> Self {
        Self { config }
    }

    /// Resolve the endpoint, applying override precedence. Fails closed
    /// when host, port, or path is missing.
    pub fn resolve_endpoint(&self) -> Result<ResolvedEndpoint> {
        let endpoint = &self.config.endpoint;
        let host = endpoint.host.clone().unwrap_or_default();
        let path = endpoint.index_path().unwrap_or_default();

        let port = match endpoint.port {
            Some(port) if !host.is_empty() && !path.is_empty() => port,
            _ => {
                error!(
                    host = %host,
                    port = ?endpoint.port,
                    path = %path,
                    "host, port or path are empty; refusing to build a client"
                );
                return Err(BridgeError::NoClient(
                    "host, port or path are empty".to_string(),
                ));
            }
        };

        Ok(ResolvedEndpoint {
            scheme: endpoint.resolved_scheme().to_string(),
            host,
            port,
            path,
            client_cert: endpoint.client_cert.clone(),
        })
    }

    /// Build a client for the resolved endpoint with a bounded timeout.
    pub fn build(&self) -> Result<SolrClient> {
        let endpoint = self.resolve_endpoint()?;
        self.build_with(&endpoint)
    }

    /// Build a client for an already-resolved endpoint, so one resolution
    /// can be shared across ping, select, and upload within an invocation.
    pub fn build_with(&self, endpoint: &ResolvedEndpoint) -> Result<SolrClient> {
        let mut builder =
            reqwest::Client::builder().timeout(Duration::from_secs(self.config.http.timeout_secs));

        // Client-certificate authentication only applies over TLS.
        if endpoint.scheme == "https" && endpoint.client_cert.exists() {
            let pem = std::fs::read(&endpoint.client_cert)?;
            let identity = reqwest::Identity::from_pem(&pem)
                .map_err(|e| BridgeError::Configuration(format!("invalid client cert: {}", e)))?;
            builder = builder.identity(identity);
        }

        let http = builder
            .build()
            .map_err(|e| BridgeError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(SolrClient::new(http, endpoint.base_url()))
    }

    /// Build a client, logging instead of propagating on failure. Callers
    /// treat `None` as "no client available".
    pub fn build_or_none(&self) -> Option<SolrClient> {
        match self.build() {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "index client unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;

    fn config_with_endpoint(endpoint: EndpointConfig) -> Arc<BridgeConfig> {
        Arc::new(BridgeConfig {
            endpoint,
            ..Default::default()
        })
    }

    #[test]
    fn test_fails_closed_without_host() {
        let factory = ConnectionFactory::new(config_with_endpoint(EndpointConfig {
            port: Some(449),
            environment: Some("live".to_string()),
            ..Default::default()
        }));

        assert!(matches!(
            factory.resolve_endpoint(),
            Err(BridgeError::NoClient(_))
        ));
        assert!(factory.build_or_none().is_none());
    }

    #[test]
    fn test_fails_closed_without_path() {
        let factory = ConnectionFactory::new(config_with_endpoint(EndpointConfig {
            host: Some("index.example".to_string()),
            port: Some(449),
            ..Default::default()
        }));

        assert!(factory.resolve_endpoint().is_err());
    }

    #[test]
    fn test_resolved_base_url() {
        let factory = ConnectionFactory::new(config_with_endpoint(EndpointConfig {
            host: Some("index.example".to_string()),
            port: Some(449),
            environment: Some("live".to_string()),
            ..Default::default()
        }));

        let endpoint = factory.resolve_endpoint().unwrap();
        assert_eq!(
            endpoint.base_url(),
            "https://index.example:449/sites/self/environments/live/index"
        );
    }

    #[test]
    fn test_builds_client_for_plain_http_endpoint() {
        let factory = ConnectionFactory::new(config_with_endpoint(EndpointConfig {
            host: Some("127.0.0.1".to_string()),
            port: Some(8983),
            scheme: Some("http".to_string()),
            path_override: Some("/solr".to_string()),
            environment: Some("test".to_string()),
            ..Default::default()
        }));

        let client = factory.build().unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8983/solr");
    }
}
