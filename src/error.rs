//! Error types
//!
//! [`ServiceError`] describes a single failed call against a listing service.
//! [`InventoryError`] is what a run ends with: it tells the user which scope
//! (project, zone, buckets) failed and wraps the service error underneath.

use std::fmt;
use thiserror::Error;

/// Failure of one call against the zone directory or a listing service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API request failed: {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl ServiceError {
    /// Short, user-facing hint for well-known failure classes
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ServiceError::Auth(_) | ServiceError::Api { status: 401, .. } => {
                Some("Run 'gcloud auth application-default login' or pass --access-token.")
            }
            ServiceError::Api { status: 403, .. } => {
                Some("Permission denied. Check your GCP IAM permissions.")
            }
            ServiceError::Api { status: 404, .. } => {
                Some("Resource not found. Check the project and zone names.")
            }
            ServiceError::Api { status: 429, .. } => {
                Some("Rate limit exceeded. Please try again later.")
            }
            ServiceError::Api { status: 500 | 502 | 503, .. } => {
                Some("GCP service temporarily unavailable. Please try again.")
            }
            _ => None,
        }
    }
}

/// The scope a listing was running for when it failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Instances { project: String, zone: String },
    Buckets { project: String },
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Instances { project, zone } => {
                write!(f, "instances in zone {} of project {}", zone, project)
            }
            Scope::Buckets { project } => write!(f, "buckets of project {}", project),
        }
    }
}

/// Terminal failure of an inventory run
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("{0}")]
    Usage(String),

    #[error("listing zones of project {project} failed: {source}")]
    DirectoryUnavailable {
        project: String,
        #[source]
        source: ServiceError,
    },

    #[error("listing {scope} failed: {source}")]
    ListingFailure {
        scope: Scope,
        #[source]
        source: ServiceError,
    },

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl InventoryError {
    /// The service error behind this failure, if any
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            InventoryError::DirectoryUnavailable { source, .. }
            | InventoryError::ListingFailure { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Message for the error stream, with a hint appended when one applies
    pub fn user_message(&self) -> String {
        match self.service_error().and_then(ServiceError::hint) {
            Some(hint) => format!("Error: {} ({})", self, hint),
            None => format!("Error: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_failure_names_zone_and_project() {
        let err = InventoryError::ListingFailure {
            scope: Scope::Instances {
                project: "demo".to_string(),
                zone: "z2".to_string(),
            },
            source: ServiceError::Api {
                status: 500,
                message: "backend error".to_string(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("zone z2"));
        assert!(msg.contains("project demo"));
        assert!(msg.contains("backend error"));
    }

    #[test]
    fn test_user_message_appends_hint() {
        let err = InventoryError::DirectoryUnavailable {
            project: "demo".to_string(),
            source: ServiceError::Api {
                status: 403,
                message: "forbidden".to_string(),
            },
        };
        let msg = err.user_message();
        assert!(msg.starts_with("Error: listing zones of project demo failed"));
        assert!(msg.contains("IAM"));
    }

    #[test]
    fn test_usage_error_has_no_hint() {
        let err = InventoryError::Usage("project is required".to_string());
        assert_eq!(err.user_message(), "Error: project is required");
        assert!(err.service_error().is_none());
    }
}
