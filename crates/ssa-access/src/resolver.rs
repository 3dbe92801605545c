//! # Permission resolver
//!
//! The capability-check filter. The host calls it once per capability
//! evaluation with the user's assembled grant set; it decides whether
//! privileged users are elevated to `ssa_full_access` before the host reads
//! the requested key.
//!
//! ## Precedence
//!
//! ```text
//! key outside ssa_            -> unchanged
//! ssa_full_access granted     -> grant requested key
//! unknown ssa_ key            -> unchanged
//! admin, Members inactive     -> grant full access + requested key
//! admin, Members active       -> same, only if no registry key is granted yet
//! ```

use ssa_rbac::capabilities::{is_namespaced, is_registered};
use ssa_rbac::{GrantSet, FULL_ACCESS};
use tracing::{debug, trace};

use crate::config::AccessConfig;
use crate::host::{HostSymbols, UserDirectory, UserId};
use crate::members::has_members_plugin;

/// Resolves namespaced capability checks against a grant set.
pub struct PermissionResolver<'a> {
    config: &'a AccessConfig,
    users: &'a dyn UserDirectory,
    symbols: &'a dyn HostSymbols,
}

impl<'a> PermissionResolver<'a> {
    /// Create a resolver over the host's user directory and symbol table.
    pub fn new(
        config: &'a AccessConfig,
        users: &'a dyn UserDirectory,
        symbols: &'a dyn HostSymbols,
    ) -> Self {
        Self {
            config,
            users,
            symbols,
        }
    }

    /// Whether the user is an administrator or a super administrator.
    ///
    /// A namespaced administrator capability is never looked up: the host
    /// routes that check back through this filter.
    pub fn is_privileged(&self, user: &UserId) -> bool {
        let administrator = self.config.administrator_capability.as_str();
        (!is_namespaced(administrator) && self.users.user_can(user, administrator))
            || self.users.is_super_admin(user)
    }

    /// Whether the Members extension is active.
    pub fn members_active(&self) -> bool {
        has_members_plugin(self.symbols, &self.config.members_min_version)
    }

    /// Filter a grant set for a capability check.
    ///
    /// # Arguments
    ///
    /// * `grants` - The user's grants as assembled by the host
    /// * `requested` - Requested capability keys; only the first is inspected
    /// * `_args` - Extra hook arguments, unused
    /// * `user` - The user being checked
    ///
    /// # Returns
    ///
    /// The grant set, possibly with `ssa_full_access` and the requested key
    /// added
    pub fn filter_user_has_cap(
        &self,
        mut grants: GrantSet,
        requested: &[&str],
        _args: &[serde_json::Value],
        user: &UserId,
    ) -> GrantSet {
        let capability = requested.first().copied().unwrap_or("");
        if !is_namespaced(capability) {
            return grants;
        }

        if grants.has_full_access() {
            trace!(capability, user = %user, "Full access implies capability");
            grants.grant(capability);
            return grants;
        }

        if !is_registered(capability) && capability != FULL_ACCESS {
            trace!(capability, "Ignoring unknown namespaced capability");
            return grants;
        }

        if !self.is_privileged(user) {
            return grants;
        }

        if !self.members_active() {
            debug!(capability, user = %user, "Granting administrator full access");
            grants.grant(FULL_ACCESS);
            grants.grant(capability);
        } else if !grants.has_any_registered() {
            debug!(
                capability,
                user = %user,
                "No capabilities assigned through Members, falling back to full access"
            );
            grants.grant(FULL_ACCESS);
            grants.grant(capability);
        } else {
            trace!(capability, user = %user, "Deferring to Members assignments");
        }

        grants
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;
    use std::collections::HashSet;

    /// Directory answering from fixed sets, without routing back through
    /// the filter.
    #[derive(Default)]
    struct StaticHost {
        admins: HashSet<UserId>,
        super_admins: HashSet<UserId>,
        members_loaded: bool,
    }

    impl UserDirectory for StaticHost {
        fn user_can(&self, user: &UserId, capability: &str) -> bool {
            capability == "administrator" && self.admins.contains(user)
        }

        fn is_super_admin(&self, user: &UserId) -> bool {
            self.super_admins.contains(user)
        }

        fn current_user_id(&self) -> Option<UserId> {
            None
        }
    }

    impl HostSymbols for StaticHost {
        fn function_exists(&self, name: &str) -> bool {
            self.members_loaded && name == "members_register_cap_group"
        }
    }

    fn admin_host(members_loaded: bool) -> (StaticHost, UserId) {
        let admin = UserId::new();
        let mut host = StaticHost {
            members_loaded,
            ..StaticHost::default()
        };
        host.admins.insert(admin);
        (host, admin)
    }

    #[test]
    fn test_unrelated_capability_unchanged() {
        let (host, admin) = admin_host(false);
        let config = AccessConfig::default();
        let resolver = PermissionResolver::new(&config, &host, &host);

        let grants = GrantSet::from_keys(&["read"]);
        let result = resolver.filter_user_has_cap(grants.clone(), &["edit_posts"], &[], &admin);
        assert_eq!(result, grants);

        let result = resolver.filter_user_has_cap(grants.clone(), &[], &[], &admin);
        assert_eq!(result, grants);
    }

    #[test]
    fn test_full_access_grants_requested() {
        let host = StaticHost::default();
        let config = AccessConfig::default();
        let resolver = PermissionResolver::new(&config, &host, &host);
        let user = UserId::new();

        let grants = GrantSet::from_keys(&[FULL_ACCESS]);
        let result =
            resolver.filter_user_has_cap(grants, &["ssa_manage_resources"], &[], &user);
        assert!(result.is_granted("ssa_manage_resources"));

        // Even keys outside the registry are implied by full access.
        let grants = GrantSet::from_keys(&[FULL_ACCESS]);
        let result = resolver.filter_user_has_cap(grants, &["ssa_future_thing"], &[], &user);
        assert!(result.is_granted("ssa_future_thing"));
    }

    #[test]
    fn test_unknown_namespaced_capability_ignored() {
        let (host, admin) = admin_host(false);
        let config = AccessConfig::default();
        let resolver = PermissionResolver::new(&config, &host, &host);

        let result =
            resolver.filter_user_has_cap(GrantSet::new(), &["ssa_launch_rockets"], &[], &admin);
        assert!(result.is_empty());
    }

    #[test]
    fn test_admin_without_members_gets_full_access() {
        let (host, admin) = admin_host(false);
        let config = AccessConfig::default();
        let resolver = PermissionResolver::new(&config, &host, &host);

        let result =
            resolver.filter_user_has_cap(GrantSet::new(), &["ssa_manage_staff"], &[], &admin);
        assert!(result.has_full_access());
        assert!(result.is_granted("ssa_manage_staff"));
    }

    #[test]
    fn test_full_access_check_itself_elevates_admin() {
        let (host, admin) = admin_host(false);
        let config = AccessConfig::default();
        let resolver = PermissionResolver::new(&config, &host, &host);

        let result = resolver.filter_user_has_cap(GrantSet::new(), &[FULL_ACCESS], &[], &admin);
        assert!(result.has_full_access());
    }

    #[test]
    fn test_super_admin_without_members_gets_full_access() {
        let mut host = StaticHost::default();
        let user = UserId::new();
        host.super_admins.insert(user);
        let config = AccessConfig::default();
        let resolver = PermissionResolver::new(&config, &host, &host);

        let result =
            resolver.filter_user_has_cap(GrantSet::new(), &["ssa_manage_resources"], &[], &user);
        assert!(result.has_full_access());
    }

    #[test]
    fn test_regular_user_not_elevated() {
        let host = StaticHost::default();
        let config = AccessConfig::default();
        let resolver = PermissionResolver::new(&config, &host, &host);

        let grants = GrantSet::from_keys(&["read", "ssa_manage_appointments"]);
        let result = resolver.filter_user_has_cap(
            grants.clone(),
            &["ssa_manage_appointments"],
            &[],
            &UserId::new(),
        );
        assert_eq!(result, grants);
    }

    #[test]
    fn test_members_admin_with_explicit_grant_not_elevated() {
        let (host, admin) = admin_host(true);
        let config = AccessConfig::default();
        let resolver = PermissionResolver::new(&config, &host, &host);

        let grants = GrantSet::from_keys(&["ssa_manage_appointments"]);
        let result =
            resolver.filter_user_has_cap(grants.clone(), &["ssa_manage_staff"], &[], &admin);
        assert!(!result.has_full_access());
        assert!(!result.is_granted("ssa_manage_staff"));
        assert_eq!(result, grants);
    }

    #[test]
    fn test_members_admin_without_grants_falls_back() {
        let (host, admin) = admin_host(true);
        let config = AccessConfig::default();
        let resolver = PermissionResolver::new(&config, &host, &host);

        let mut grants = GrantSet::new();
        grants.set("ssa_manage_staff", false);
        let result = resolver.filter_user_has_cap(grants, &["ssa_manage_staff"], &[], &admin);
        assert!(result.has_full_access());
        assert!(result.is_granted("ssa_manage_staff"));
    }

    #[test]
    fn test_members_gate_below_baseline_treated_inactive() {
        let (host, admin) = admin_host(true);
        let config = AccessConfig {
            members_min_version: "1.0".to_string(),
            ..AccessConfig::default()
        };
        let resolver = PermissionResolver::new(&config, &host, &host);
        assert!(!resolver.members_active());

        let grants = GrantSet::from_keys(&["ssa_manage_appointments"]);
        let result = resolver.filter_user_has_cap(grants, &["ssa_manage_staff"], &[], &admin);
        assert!(result.has_full_access());
    }

    #[test]
    fn test_namespaced_administrator_capability_does_not_recurse() {
        let config = AccessConfig {
            administrator_capability: "ssa_manage_site_settings".to_string(),
            ..AccessConfig::default()
        };
        let host = MemoryHost::new(config.clone());
        let user = host.add_user(&["administrator"], GrantSet::new());
        let resolver = PermissionResolver::new(&config, &host, &host);

        assert!(!resolver.is_privileged(&user));
        assert!(!host.user_can(&user, "ssa_manage_staff"));

        host.set_super_admin(&user, true);
        assert!(host.user_can(&user, "ssa_manage_staff"));
    }

    #[test]
    fn test_custom_administrator_capability() {
        let (host, admin) = admin_host(false);
        let config = AccessConfig {
            administrator_capability: "manage_options".to_string(),
            ..AccessConfig::default()
        };
        let resolver = PermissionResolver::new(&config, &host, &host);

        assert!(!resolver.is_privileged(&admin));
        let result =
            resolver.filter_user_has_cap(GrantSet::new(), &["ssa_manage_staff"], &[], &admin);
        assert!(result.is_empty());
    }
}
