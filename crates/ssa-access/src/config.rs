//! Access configuration.
//!
//! Provides the tunables of the capability layer. Configuration is loaded
//! from environment variables with defaults matching a stock installation.

use serde::{Deserialize, Serialize};
use ssa_rbac::{is_namespaced, TEAM_MEMBER_DISPLAY_NAME};
use thiserror::Error;

use crate::members::{parse_version, MEMBERS_BASELINE_VERSION};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration for the capability layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Minimum Members extension version passed to extension detection.
    pub members_min_version: String,

    /// Host capability (or role name) identifying administrators.
    pub administrator_capability: String,

    /// Display name used when installing the team member role.
    pub team_member_display_name: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            members_min_version: MEMBERS_BASELINE_VERSION.to_string(),
            administrator_capability: "administrator".to_string(),
            team_member_display_name: TEAM_MEMBER_DISPLAY_NAME.to_string(),
        }
    }
}

impl AccessConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SSA_MEMBERS_MIN_VERSION`: Members version handed to detection (default: 2.0)
    /// - `SSA_ADMINISTRATOR_CAPABILITY`: Capability marking administrators (default: administrator)
    /// - `SSA_TEAM_MEMBER_DISPLAY_NAME`: Team member role label (default: Team Member)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            members_min_version: std::env::var("SSA_MEMBERS_MIN_VERSION")
                .unwrap_or(default.members_min_version),
            administrator_capability: std::env::var("SSA_ADMINISTRATOR_CAPABILITY")
                .unwrap_or(default.administrator_capability),
            team_member_display_name: std::env::var("SSA_TEAM_MEMBER_DISPLAY_NAME")
                .unwrap_or(default.team_member_display_name),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if parse_version(&self.members_min_version).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "members_min_version".to_string(),
                message: format!("`{}` is not a dotted version", self.members_min_version),
            });
        }
        if self.administrator_capability.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "administrator_capability".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if is_namespaced(&self.administrator_capability) {
            return Err(ConfigError::InvalidValue {
                key: "administrator_capability".to_string(),
                message: format!(
                    "`{}` is a plugin capability and cannot identify administrators",
                    self.administrator_capability
                ),
            });
        }
        if self.team_member_display_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "team_member_display_name".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
