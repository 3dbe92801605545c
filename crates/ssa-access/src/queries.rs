//! Capability queries
//!
//! Boolean and set helpers for application code, layered on the host's
//! capability check. Each call goes through [`UserDirectory::user_can`], so
//! the resolver's elevation applies.

use ssa_rbac::{get_all_cap_slugs, FULL_ACCESS};

use crate::host::{UserDirectory, UserId};

/// A capability check that is either a single key or a set of keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityCheck<'c> {
    /// A single capability.
    One(&'c str),
    /// Any of several capabilities.
    AnyOf(&'c [&'c str]),
}

impl<'c> From<&'c str> for CapabilityCheck<'c> {
    fn from(capability: &'c str) -> Self {
        CapabilityCheck::One(capability)
    }
}

impl<'c> From<&'c [&'c str]> for CapabilityCheck<'c> {
    fn from(capabilities: &'c [&'c str]) -> Self {
        CapabilityCheck::AnyOf(capabilities)
    }
}

impl<'c, const N: usize> From<&'c [&'c str; N]> for CapabilityCheck<'c> {
    fn from(capabilities: &'c [&'c str; N]) -> Self {
        CapabilityCheck::AnyOf(capabilities)
    }
}

/// Query helpers over a user directory.
///
/// # Example
///
/// ```
/// use ssa_access::memory::MemoryHost;
/// use ssa_access::queries::CapabilityQuery;
/// use ssa_access::AccessConfig;
/// use ssa_rbac::GrantSet;
///
/// let host = MemoryHost::new(AccessConfig::default());
/// let user = host.add_user(&[], GrantSet::from_keys(&["ssa_manage_staff"]));
/// let query = CapabilityQuery::new(&host);
///
/// assert!(query.user_can_any(&user, "ssa_manage_staff"));
/// assert_eq!(
///     query.user_can_which(&user, &["ssa_manage_resources", "ssa_manage_staff"]),
///     Some("ssa_manage_staff")
/// );
/// ```
pub struct CapabilityQuery<'a> {
    users: &'a dyn UserDirectory,
}

impl<'a> CapabilityQuery<'a> {
    /// Create a query helper over the host's user directory.
    pub fn new(users: &'a dyn UserDirectory) -> Self {
        Self { users }
    }

    /// Whether the user holds the capability, any of the capabilities, or
    /// full access.
    pub fn user_can_any<'c>(&self, user: &UserId, caps: impl Into<CapabilityCheck<'c>>) -> bool {
        match caps.into() {
            CapabilityCheck::One(capability) => {
                self.users.user_can(user, capability) || self.users.user_can(user, FULL_ACCESS)
            }
            CapabilityCheck::AnyOf(capabilities) => {
                capabilities
                    .iter()
                    .any(|capability| self.users.user_can(user, capability))
                    || self.users.user_can(user, FULL_ACCESS)
            }
        }
    }

    /// The first capability, in input order, the user holds.
    pub fn user_can_which<'c>(&self, user: &UserId, caps: &[&'c str]) -> Option<&'c str> {
        caps.iter()
            .copied()
            .find(|capability| self.users.user_can(user, capability))
    }

    /// The capabilities the user holds, in input order.
    ///
    /// This filters; it does not answer whether the user holds all of them.
    /// Compare the length with the input for that.
    pub fn user_can_all<'c>(&self, user: &UserId, caps: &[&'c str]) -> Vec<&'c str> {
        caps.iter()
            .copied()
            .filter(|capability| self.users.user_can(user, capability))
            .collect()
    }

    /// [`Self::user_can_any`] for the current user; `false` when logged out.
    pub fn current_user_can_any<'c>(&self, caps: impl Into<CapabilityCheck<'c>>) -> bool {
        self.users
            .current_user_id()
            .map(|user| self.user_can_any(&user, caps))
            .unwrap_or(false)
    }

    /// [`Self::user_can_which`] for the current user; `None` when logged out.
    pub fn current_user_can_which<'c>(&self, caps: &[&'c str]) -> Option<&'c str> {
        let user = self.users.current_user_id()?;
        self.user_can_which(&user, caps)
    }

    /// [`Self::user_can_all`] for the current user; empty when logged out.
    pub fn current_user_can_all<'c>(&self, caps: &[&'c str]) -> Vec<&'c str> {
        match self.users.current_user_id() {
            Some(user) => self.user_can_all(&user, caps),
            None => Vec::new(),
        }
    }

    /// Every registry capability the current user holds, in registry order.
    pub fn current_user_all_caps(&self) -> Vec<&'static str> {
        self.current_user_can_all(&get_all_cap_slugs())
    }
}
