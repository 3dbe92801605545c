//! Error types for access operations
//!
//! Authorization decisions are never errors: a denied check is `false` and a
//! skipped installation is an outcome. These errors cover failures of the
//! host backends and of configuration.

use thiserror::Error;

use crate::config::ConfigError;

/// Access error types.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The host's role table rejected or failed an operation
    #[error("Role store error: {0}")]
    RoleStore(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for access operations.
pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    /// Get error code for logs and API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AccessError::RoleStore(_) => "ROLE_STORE_ERROR",
            AccessError::Config(_) => "CONFIG_ERROR",
            AccessError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AccessError::RoleStore("locked".into()).error_code(),
            "ROLE_STORE_ERROR"
        );
        assert_eq!(AccessError::Internal("x".into()).error_code(), "INTERNAL_ERROR");

        let err: AccessError = ConfigError::InvalidValue {
            key: "members_min_version".into(),
            message: "not a version".into(),
        }
        .into();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid configuration value for members_min_version: not a version"
        );
    }
}
