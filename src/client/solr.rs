//! Reqwest-backed Solr client

use crate::client::IndexClient;
use crate::error::{BridgeError, Result};
use crate::query::builder::BuiltQuery;
use crate::query::response::{SelectOutcome, SolrSelectBody};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

/// HTTP client speaking the Solr select/ping/update JSON protocol against
/// one resolved endpoint.
#[derive(Clone)]
pub struct SolrClient {
    http: Client,
    base_url: String,
}

impl SolrClient {
    /// Create a client for the given base URL, e.g.
    /// `https://index.example:449/sites/self/environments/live/index`.
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn handler_url(&self, handler: &str) -> String {
        format!("{}/{}", self.base_url, handler)
    }
}

#[async_trait]
impl IndexClient for SolrClient {
    async fn ping(&self) -> Result<u16> {
        let response = self
            .http
            .get(self.handler_url("admin/ping"))
            .query(&[("wt", "json")])
            .send()
            .await?;

        let status = response.status().as_u16();
        debug!(status, url = %self.base_url, "pinged index service");
        Ok(status)
    }

    async fn select(&self, built: &BuiltQuery) -> Result<SelectOutcome> {
        let response = self
            .http
            .get(self.handler_url("select"))
            .query(&built.to_params())
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            return Ok(SelectOutcome { status, body: None });
        }

        let body: SolrSelectBody = response.json().await?;
        Ok(SelectOutcome {
            status,
            body: Some(body),
        })
    }

    async fn optimize(&self) -> Result<()> {
        let response = self
            .http
            .post(self.handler_url("update"))
            .query(&[("wt", "json")])
            .json(&serde_json::json!({ "optimize": {} }))
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            error!(status, "index optimize command rejected");
            return Err(BridgeError::BadStatus(status));
        }
        Ok(())
    }
}

/// Issue an optimize command and swallow any failure; errors are logged
/// for the operator, never surfaced to the caller.
pub async fn optimize_quietly(client: &dyn IndexClient) {
    if let Err(e) = client.optimize().await {
        error!(error = %e, "index optimize failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_url_joining() {
        let client = SolrClient::new(Client::new(), "http://localhost:8983/solr/core0/");
        assert_eq!(client.base_url(), "http://localhost:8983/solr/core0");
        assert_eq!(
            client.handler_url("admin/ping"),
            "http://localhost:8983/solr/core0/admin/ping"
        );
    }
}
