//! Error types and handling for the tourist map

use thiserror::Error;

/// Main error type for the tourist map library
#[derive(Error, Debug)]
pub enum TourismError {
    /// Mapping provider could not be loaded (missing credentials, SDK failure)
    #[error("Map initialization failed: {message}")]
    Initialization { message: String },

    /// Backend unreachable or answered with a non-success status
    #[error(
        "Request failed{}: {}",
        .status.map(|s| format!(" with status {s}")).unwrap_or_default(),
        .body
    )]
    RequestFailed { status: Option<u16>, body: String },

    /// Malformed user or record input
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TourismError {
    /// Create a new initialization error
    pub fn initialization<S: Into<String>>(message: S) -> Self {
        Self::Initialization {
            message: message.into(),
        }
    }

    /// Create a new request failure
    pub fn request_failed<S: Into<String>>(status: Option<u16>, body: S) -> Self {
        Self::RequestFailed {
            status,
            body: body.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status carried by a request failure, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            TourismError::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TourismError::Initialization { .. } => {
                "The map could not be loaded. Please check your maps API key.".to_string()
            }
            TourismError::RequestFailed { status: None, .. } => {
                "Unable to reach the recommendation service. Please check your connection."
                    .to_string()
            }
            TourismError::RequestFailed {
                status: Some(status),
                ..
            } => format!("The recommendation service answered with an error ({status})."),
            TourismError::Validation { message } => format!("Invalid input: {message}"),
            TourismError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            TourismError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let init_err = TourismError::initialization("missing API key");
        assert!(matches!(init_err, TourismError::Initialization { .. }));

        let request_err = TourismError::request_failed(Some(503), "busy");
        assert!(matches!(
            request_err,
            TourismError::RequestFailed {
                status: Some(503),
                ..
            }
        ));

        let validation_err = TourismError::validation("duration must be positive");
        assert!(matches!(validation_err, TourismError::Validation { .. }));
    }

    #[test]
    fn test_request_failed_display() {
        let with_status = TourismError::request_failed(Some(500), "boom");
        assert_eq!(with_status.to_string(), "Request failed with status 500: boom");
        assert_eq!(with_status.status(), Some(500));

        let without_status = TourismError::request_failed(None, "connection refused");
        assert_eq!(without_status.to_string(), "Request failed: connection refused");
        assert_eq!(without_status.status(), None);
    }

    #[test]
    fn test_user_messages() {
        let init_err = TourismError::initialization("test");
        assert!(init_err.user_message().contains("maps API key"));

        let request_err = TourismError::request_failed(Some(404), "not found");
        assert!(request_err.user_message().contains("404"));

        let validation_err = TourismError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TourismError = io_err.into();
        assert!(matches!(err, TourismError::Io { .. }));
    }
}
