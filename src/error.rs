//! Error types for Prospect
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Prospect operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, session management, form validation, and
/// calls to the backend API.
#[derive(Error, Debug)]
pub enum ProspectError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Form validation failed before submission; carries the field name
    #[error("Validation error ({field}): {message}")]
    Validation {
        /// Form field that failed validation
        field: String,
        /// User-facing message explaining the failure
        message: String,
    },

    /// Backend returned a non-success HTTP status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Response body text, if any
        message: String,
    },

    /// A protected command was invoked without a stored session
    #[error("Authentication required: {0}")]
    AuthRequired(String),

    /// Session storage errors (missing directory, malformed file)
    #[error("Session error: {0}")]
    Session(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ProspectError {
    /// Build a validation error for a named form field
    pub fn validation(field: &str, message: &str) -> Self {
        ProspectError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for Prospect operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = ProspectError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_validation_error_display() {
        let error = ProspectError::validation("email", "Adresse email invalide");
        assert_eq!(
            error.to_string(),
            "Validation error (email): Adresse email invalide"
        );
    }

    #[test]
    fn test_api_error_display() {
        let error = ProspectError::Api {
            status: 404,
            message: "not found".to_string(),
        };
        let s = error.to_string();
        assert!(s.contains("status 404"));
        assert!(s.contains("not found"));
    }

    #[test]
    fn test_auth_required_error_display() {
        let error = ProspectError::AuthRequired("run `prospect login`".to_string());
        assert_eq!(
            error.to_string(),
            "Authentication required: run `prospect login`"
        );
    }

    #[test]
    fn test_session_error_display() {
        let error = ProspectError::Session("malformed session file".to_string());
        assert_eq!(error.to_string(), "Session error: malformed session file");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: ProspectError = io_error.into();
        assert!(matches!(error, ProspectError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: ProspectError = json_error.into();
        assert!(matches!(error, ProspectError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: ProspectError = yaml_error.into();
        assert!(matches!(error, ProspectError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProspectError>();
    }
}
