//! Role definitions
//!
//! This module defines the roles the plugin installs into the host's role
//! table, along with their default capability grants.

use serde::{Deserialize, Serialize};

use crate::capabilities::Capability;
use crate::grants::GrantSet;

/// Name of the role the plugin installs for staff members.
pub const TEAM_MEMBER_ROLE: &str = "team_member";

/// Display name of the team member role.
pub const TEAM_MEMBER_DISPLAY_NAME: &str = "Team Member";

/// Host capability that lets a user access the dashboard at all.
pub const BASE_READ: &str = "read";

/// A named bundle of default capability grants.
///
/// The host's role table owns role records; this type is only the shape
/// handed to it.
///
/// # Examples
///
/// ```
/// use ssa_rbac::{Capability, RoleDefinition};
///
/// let role = RoleDefinition::team_member();
/// assert_eq!(role.name, "team_member");
/// assert!(role.grants(Capability::ManageAppointments.as_str()));
/// assert!(!role.grants(Capability::ManageStaff.as_str()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Role key in the host's role table
    pub name: String,

    /// Human-readable name shown in the host's user editor
    pub display_name: String,

    /// Default capabilities of users holding this role
    pub capabilities: GrantSet,
}

impl RoleDefinition {
    /// Create a role definition.
    ///
    /// # Arguments
    ///
    /// * `name` - Role key
    /// * `display_name` - Human-readable name
    /// * `capabilities` - Default grants
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        capabilities: GrantSet,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            capabilities,
        }
    }

    /// The team member role: base read access plus managing appointments
    /// and staff blackout dates.
    pub fn team_member() -> Self {
        Self::team_member_named(TEAM_MEMBER_DISPLAY_NAME)
    }

    /// The team member role with a custom display name.
    ///
    /// The capability set is fixed; only the label shown to site
    /// administrators varies.
    pub fn team_member_named(display_name: impl Into<String>) -> Self {
        Self::new(
            TEAM_MEMBER_ROLE,
            display_name,
            GrantSet::from_keys(&[
                BASE_READ,
                Capability::ManageAppointments.as_str(),
                Capability::ManageStaffBlackoutDates.as_str(),
            ]),
        )
    }

    /// Check whether this role grants a capability by default.
    pub fn grants(&self, key: &str) -> bool {
        self.capabilities.is_granted(key)
    }
}
