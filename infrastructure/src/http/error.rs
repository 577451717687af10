//! Error types for the Atlassian HTTP adapter

use thiserror::Error;

/// Result type alias for Atlassian operations
pub type Result<T> = std::result::Result<T, AtlassianError>;

/// Errors raised while talking to a Jira or Confluence instance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtlassianError {
    /// Missing or invalid connection settings
    #[error("{0}")]
    Configuration(String),

    /// HTTP 401
    #[error("{0}")]
    Authentication(String),

    /// HTTP 403
    #[error("{0}")]
    Authorization(String),

    /// HTTP 404
    #[error("{0}")]
    NotFound(String),

    /// HTTP 400
    #[error("{0}")]
    Validation(String),

    /// HTTP 429
    #[error("{message}")]
    RateLimit {
        message: String,
        retry_after: Option<u64>,
    },

    /// HTTP 5xx
    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Timeout(String),

    /// Any other non-success status
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl AtlassianError {
    /// HTTP status this error was mapped from, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            AtlassianError::Authentication(_) => Some(401),
            AtlassianError::Authorization(_) => Some(403),
            AtlassianError::NotFound(_) => Some(404),
            AtlassianError::Validation(_) => Some(400),
            AtlassianError::RateLimit { .. } => Some(429),
            AtlassianError::Service { status, .. } | AtlassianError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Map a non-success status and its extracted message
    pub fn from_status(status: u16, message: &str, retry_after: Option<u64>) -> Self {
        match status {
            400 => AtlassianError::Validation(format!("Validation failed: {message}")),
            401 => AtlassianError::Authentication(format!("Authentication failed: {message}")),
            403 => AtlassianError::Authorization(format!("Permission denied: {message}")),
            404 => AtlassianError::NotFound(format!("Not found: {message}")),
            429 => AtlassianError::RateLimit {
                message: format!("Rate limit exceeded: {message}"),
                retry_after,
            },
            s if s >= 500 => AtlassianError::Service {
                status,
                message: format!("Server error: {message}"),
            },
            _ => AtlassianError::Http {
                status,
                message: format!("HTTP {status}: {message}"),
            },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            AtlassianError::Authentication(_) | AtlassianError::Authorization(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            AtlassianError::from_status(400, "bad jql", None),
            AtlassianError::Validation(ref m) if m == "Validation failed: bad jql"
        ));
        assert_eq!(
            AtlassianError::from_status(403, "nope", None).to_string(),
            "Permission denied: nope"
        );
        assert_eq!(
            AtlassianError::from_status(404, "Issue does not exist", None).to_string(),
            "Not found: Issue does not exist"
        );
        assert_eq!(
            AtlassianError::from_status(429, "slow down", Some(30)),
            AtlassianError::RateLimit {
                message: "Rate limit exceeded: slow down".to_string(),
                retry_after: Some(30),
            }
        );
        assert_eq!(AtlassianError::from_status(503, "down", None).status(), Some(503));
        assert_eq!(
            AtlassianError::from_status(418, "teapot", None).to_string(),
            "HTTP 418: teapot"
        );
    }

    #[test]
    fn test_is_auth() {
        assert!(AtlassianError::from_status(401, "x", None).is_auth());
        assert!(AtlassianError::from_status(403, "x", None).is_auth());
        assert!(!AtlassianError::Network("x".into()).is_auth());
    }
}
