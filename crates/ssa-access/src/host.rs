//! Host seams
//!
//! The host application owns user identity, the role table and plugin
//! discovery. This module defines the traits through which the capability
//! layer reaches them; nothing here is accessed as ambient global state.

use serde::{Deserialize, Serialize};
use ssa_rbac::RoleDefinition;
use uuid::Uuid;

use crate::error::AccessResult;
use crate::members::{CapGroup, CapRegistration};

/// Opaque user identity resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Create a fresh identity. Hosts normally hand identities in; this is
    /// for in-memory hosts and tests.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The host's role table.
pub trait RoleStore {
    /// Whether the role table has been loaded for this request.
    ///
    /// Early in bootstrap the table may not exist yet; callers skip rather
    /// than fail.
    fn is_initialized(&self) -> bool;

    /// Get a role by name.
    fn get(&self, name: &str) -> AccessResult<Option<RoleDefinition>>;

    /// Insert or overwrite a role.
    fn put(&self, role: RoleDefinition) -> AccessResult<()>;

    /// Delete a role.
    ///
    /// # Returns
    ///
    /// `true` if the role existed
    fn delete(&self, name: &str) -> AccessResult<bool>;
}

/// The host's user identity API.
pub trait UserDirectory {
    /// Run the host's capability check for a user.
    ///
    /// Hosts route this through the capability-check filter, so the answer
    /// reflects any elevation the resolver applied.
    fn user_can(&self, user: &UserId, capability: &str) -> bool;

    /// Whether the user is a network-wide super administrator.
    fn is_super_admin(&self, user: &UserId) -> bool;

    /// The identity bound to the current request, if anyone is logged in.
    fn current_user_id(&self) -> Option<UserId>;
}

/// Symbol table of the host's loaded extensions.
pub trait HostSymbols {
    /// Whether a global function is registered by some loaded extension.
    fn function_exists(&self, name: &str) -> bool;
}

/// Registration API exposed by the Members extension.
pub trait MembersApi {
    /// Register a capability group.
    fn register_cap_group(&mut self, key: &str, group: CapGroup);

    /// Register a capability within a group.
    fn register_cap(&mut self, key: &str, cap: CapRegistration);
}
