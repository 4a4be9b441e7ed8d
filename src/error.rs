//! Error types and handling for the Earth wheel

use thiserror::Error;

/// Main error type for the Earth wheel engine and weather proxy
#[derive(Error, Debug)]
pub enum WheelError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// External API communication errors (reverse geocoding)
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Weather table errors
    #[error("Store error: {message}")]
    Store { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WheelError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WheelError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            WheelError::Api { .. } => {
                "Unable to reach the geocoding service. A well-known destination will be used instead."
                    .to_string()
            }
            WheelError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WheelError::Store { .. } => {
                "Weather data is currently unavailable.".to_string()
            }
            WheelError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<fjall::Error> for WheelError {
    fn from(err: fjall::Error) -> Self {
        WheelError::store(err.to_string())
    }
}

impl From<reqwest::Error> for WheelError {
    fn from(err: reqwest::Error) -> Self {
        WheelError::api(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = WheelError::config("bad port");
        assert!(matches!(config_err, WheelError::Config { .. }));

        let api_err = WheelError::api("connection failed");
        assert!(matches!(api_err, WheelError::Api { .. }));

        let validation_err = WheelError::validation("invalid coordinates");
        assert!(matches!(validation_err, WheelError::Validation { .. }));

        let store_err = WheelError::store("keyspace unavailable");
        assert!(matches!(store_err, WheelError::Store { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = WheelError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = WheelError::api("test");
        assert!(api_err.user_message().contains("geocoding service"));

        let validation_err = WheelError::validation("latitude 91");
        assert!(validation_err.user_message().contains("latitude 91"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let wheel_err: WheelError = io_err.into();
        assert!(matches!(wheel_err, WheelError::Io { .. }));
    }
}
