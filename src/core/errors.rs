use std::error::Error;

/// Base trait for all application errors
pub trait WinprobeError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at '{path}': {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to parse config file at '{path}': {message}")]
    ParseFailed { path: String, message: String },
}

impl WinprobeError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ReadFailed { .. } => "CONFIG_READ_FAILED",
            ConfigError::ParseFailed { .. } => "CONFIG_PARSE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ConfigError::ParseFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_codes() {
        let err = ConfigError::ReadFailed {
            path: "/tmp/config.toml".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(err.error_code(), "CONFIG_READ_FAILED");
        assert!(!err.is_user_error());

        let err = ConfigError::ParseFailed {
            path: "/tmp/config.toml".to_string(),
            message: "bad toml".to_string(),
        };
        assert_eq!(err.error_code(), "CONFIG_PARSE_FAILED");
        assert!(err.is_user_error());
    }
}
