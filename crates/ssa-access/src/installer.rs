//! Role installation
//!
//! Idempotent creation and removal of the `team_member` role in the host's
//! role table.

use serde::{Deserialize, Serialize};
use ssa_rbac::{RoleDefinition, TEAM_MEMBER_ROLE};
use tracing::{debug, info};

use crate::error::AccessResult;
use crate::host::RoleStore;

/// Outcome of [`RoleInstaller::maybe_install_roles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallOutcome {
    /// The role was absent and has been installed.
    Installed,
    /// The role already exists; nothing was written.
    AlreadyPresent,
    /// The role table is not initialized yet; nothing was written.
    Skipped,
}

/// Installs and removes the plugin's roles.
pub struct RoleInstaller<'a> {
    store: &'a dyn RoleStore,
    display_name: &'a str,
}

impl<'a> RoleInstaller<'a> {
    /// Create an installer writing to `store`.
    ///
    /// # Arguments
    ///
    /// * `store` - The host's role table
    /// * `display_name` - Label of the team member role
    pub fn new(store: &'a dyn RoleStore, display_name: &'a str) -> Self {
        Self {
            store,
            display_name,
        }
    }

    /// Install the team member role if the role table is ready and the role
    /// is missing.
    pub fn maybe_install_roles(&self) -> AccessResult<InstallOutcome> {
        if !self.store.is_initialized() {
            debug!("Role table not initialized, skipping role install");
            return Ok(InstallOutcome::Skipped);
        }

        if self.store.get(TEAM_MEMBER_ROLE)?.is_some() {
            return Ok(InstallOutcome::AlreadyPresent);
        }

        self.add_roles()?;
        Ok(InstallOutcome::Installed)
    }

    /// Define the team member role, overwriting any existing definition.
    pub fn add_roles(&self) -> AccessResult<()> {
        info!(role = TEAM_MEMBER_ROLE, "Installing role");
        self.store
            .put(RoleDefinition::team_member_named(self.display_name))
    }

    /// Remove the team member role.
    ///
    /// # Returns
    ///
    /// `true` if the role existed
    pub fn remove_roles(&self) -> AccessResult<bool> {
        let removed = self.store.delete(TEAM_MEMBER_ROLE)?;
        if removed {
            info!(role = TEAM_MEMBER_ROLE, "Removed role");
        }
        Ok(removed)
    }
}
