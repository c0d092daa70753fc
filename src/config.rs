//! Bridge configuration
//!
//! Typed configuration for the index endpoint, facet behavior, schema
//! management, and HTTP client tuning. Values are layered: built-in
//! defaults, then an optional config file, then environment variables
//! (prefix `SOLR_BRIDGE`), then the managed platform's own variables
//! (`PANTHEON_INDEX_HOST` and friends) for any endpoint field still unset.
//! Explicit overrides always win over computed defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main bridge configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Index endpoint configuration
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Facet configuration
    #[serde(default)]
    pub facets: FacetConfiguration,

    /// Schema management configuration
    #[serde(default)]
    pub schema: SchemaConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

impl BridgeConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var("SOLR_BRIDGE_CONFIG")
            .unwrap_or_else(|_| "config/solr-bridge.toml".to_string());

        let mut cfg: BridgeConfig = config::Config::builder()
            // Override defaults with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: SOLR_BRIDGE)
            .add_source(
                config::Environment::with_prefix("SOLR_BRIDGE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        cfg.endpoint.absorb_platform_env();
        Ok(cfg)
    }
}

/// Index endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Index service host
    pub host: Option<String>,

    /// Index service port
    pub port: Option<u16>,

    /// Endpoint scheme; only `http` or `https` are honored
    pub scheme: Option<String>,

    /// Explicit index path; takes precedence over the computed default
    pub path_override: Option<String>,

    /// Managed environment name; presence marks this deployment as managed
    pub environment: Option<String>,

    /// Client TLS certificate used for both queries and schema upload
    #[serde(default = "default_client_cert")]
    pub client_cert: PathBuf,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            scheme: None,
            path_override: None,
            environment: None,
            client_cert: default_client_cert(),
        }
    }
}

impl EndpointConfig {
    /// Fill unset fields from the managed platform's environment variables.
    pub fn absorb_platform_env(&mut self) {
        if self.host.is_none() {
            self.host = std::env::var("PANTHEON_INDEX_HOST").ok();
        }
        if self.port.is_none() {
            self.port = std::env::var("PANTHEON_INDEX_PORT")
                .ok()
                .and_then(|p| p.parse().ok());
        }
        if self.environment.is_none() {
            self.environment = std::env::var("PANTHEON_ENVIRONMENT").ok();
        }
    }

    /// Whether this deployment identifies itself as a managed environment.
    pub fn is_managed(&self) -> bool {
        self.environment.is_some()
    }

    /// Effective scheme. Anything other than `http` or `https` falls back
    /// to `https`.
    pub fn resolved_scheme(&self) -> &str {
        match self.scheme.as_deref() {
            Some("http") => "http",
            Some("https") => "https",
            _ => "https",
        }
    }

    /// Remote path identifying this site's index. The explicit override
    /// wins; otherwise the path is computed from the environment name.
    pub fn index_path(&self) -> Option<String> {
        if let Some(path) = &self.path_override {
            if !path.is_empty() {
                return Some(path.clone());
            }
        }
        self.environment
            .as_ref()
            .map(|env| format!("/sites/self/environments/{}/index", env))
    }
}

fn default_client_cert() -> PathBuf {
    PathBuf::from("certs/binding.pem")
}

/// Boolean operator applied between query terms when none is written out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum BooleanOperator {
    And,
    Or,
}

impl BooleanOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BooleanOperator::And => "AND",
            BooleanOperator::Or => "OR",
        }
    }
}

/// Facet configuration, read-only during a query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetConfiguration {
    /// Facet on categories
    #[serde(default)]
    pub enable_categories: bool,

    /// Facet on tags
    #[serde(default)]
    pub enable_tags: bool,

    /// Facet on post author
    #[serde(default)]
    pub enable_author: bool,

    /// Facet on post type
    #[serde(default)]
    pub enable_post_type: bool,

    /// Custom taxonomies to facet on, as `<name>_taxonomy` fields
    #[serde(default)]
    pub custom_taxonomies: Vec<String>,

    /// Custom fields to facet on, as `<name>_str` fields
    #[serde(default)]
    pub custom_fields: Vec<String>,

    /// Facet result-size limit, applied only when tag faceting is enabled
    #[serde(default = "default_max_tag_facets")]
    pub max_tag_facets: i32,

    /// Default boolean operator for queries, if any
    pub default_operator: Option<BooleanOperator>,
}

impl Default for FacetConfiguration {
    fn default() -> Self {
        Self {
            enable_categories: false,
            enable_tags: false,
            enable_author: false,
            enable_post_type: false,
            custom_taxonomies: Vec::new(),
            custom_fields: Vec::new(),
            max_tag_facets: default_max_tag_facets(),
            default_operator: None,
        }
    }
}

fn default_max_tag_facets() -> i32 {
    10
}

/// Schema management configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Writable uploads area checked for a custom schema override at
    /// `<uploads_dir>/solr-bridge/schema.xml`
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: PathBuf,

    /// Bundled default schema used when no override is present
    #[serde(default = "default_bundled_schema")]
    pub bundled_schema: PathBuf,

    /// Port the raw schema upload endpoint listens on
    #[serde(default = "default_upload_port")]
    pub upload_port: u16,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            uploads_dir: default_uploads_dir(),
            bundled_schema: default_bundled_schema(),
            upload_port: default_upload_port(),
        }
    }
}

impl SchemaConfig {
    /// Location of the custom schema override, if a site chooses to ship one.
    pub fn override_schema(&self) -> PathBuf {
        self.uploads_dir.join("solr-bridge").join("schema.xml")
    }
}

fn default_uploads_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_bundled_schema() -> PathBuf {
    PathBuf::from("schema.xml")
}

fn default_upload_port() -> u16 {
    449
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}
