use thiserror::Error;

/// Bridge error types
#[derive(Error, Debug)]
pub enum BridgeError {
    /// No usable index client (incomplete configuration or unavailable endpoint)
    #[error("no index client available: {0}")]
    NoClient(String),

    /// Network/protocol-level failure talking to the index service
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-200 response from the index service
    #[error("unexpected index status: {0}")]
    BadStatus(u16),

    /// Local validation failed before a network operation
    #[error("preflight failure: {0}")]
    Preflight(String),

    /// Schema upload returned a non-200 status
    #[error("schema upload failed with status {0}")]
    Upload(u16),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Conversion from reqwest::Error
impl From<reqwest::Error> for BridgeError {
    fn from(err: reqwest::Error) -> Self {
        BridgeError::Transport(err.to_string())
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Transport(format!("malformed index response: {}", err))
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for BridgeError {
    fn from(err: config::ConfigError) -> Self {
        BridgeError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            BridgeError::BadStatus(404).to_string(),
            "unexpected index status: 404"
        );
        assert_eq!(
            BridgeError::Preflight("/tmp/schema.xml does not exist.".to_string()).to_string(),
            "preflight failure: /tmp/schema.xml does not exist."
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BridgeError = io.into();
        assert!(matches!(err, BridgeError::Io(_)));
    }
}
