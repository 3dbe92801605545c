//! Lifecycle hooks
//!
//! The host's request pipeline calls into the capability layer at a few
//! fixed points. Instead of registering callbacks on a global dispatcher,
//! the host holds an [`AccessControl`] and invokes the [`CapabilityHooks`]
//! methods directly.
//!
//! ```text
//! bootstrap      -> on_init(members)            Members registration
//! admin bootstrap-> on_admin_init()             role installer
//! every check    -> user_has_cap(grants, ...)   resolver
//! Members query  -> members_get_capabilities()  registry merge
//! ```

use ssa_rbac::GrantSet;
use tracing::info;

use crate::config::AccessConfig;
use crate::error::AccessResult;
use crate::host::{HostSymbols, MembersApi, RoleStore, UserDirectory, UserId};
use crate::installer::{InstallOutcome, RoleInstaller};
use crate::members::{
    filter_members_get_capabilities, has_members_plugin, members_register_cap_group,
    members_register_caps,
};
use crate::queries::CapabilityQuery;
use crate::resolver::PermissionResolver;

/// Entry points the host pipeline invokes.
pub trait CapabilityHooks {
    /// General initialization. Registers the capability group and the
    /// capabilities with Members when it is loaded.
    ///
    /// # Returns
    ///
    /// `true` if registration happened
    fn on_init(&self, members: &mut dyn MembersApi) -> bool;

    /// Administrative initialization. Installs the team member role if needed.
    fn on_admin_init(&self) -> AccessResult<InstallOutcome>;

    /// Capability-check filter, called once per check.
    fn user_has_cap(
        &self,
        grants: GrantSet,
        caps: &[&str],
        args: &[serde_json::Value],
        user: &UserId,
    ) -> GrantSet;

    /// Members filter enumerating the capabilities it manages.
    fn members_get_capabilities(&self, caps: Vec<(String, String)>) -> Vec<(String, String)>;
}

/// The capability layer bound to a host.
///
/// # Example
///
/// ```
/// use ssa_access::hooks::{AccessControl, CapabilityHooks};
/// use ssa_access::installer::InstallOutcome;
/// use ssa_access::memory::{MemoryHost, MemoryMembers};
/// use ssa_access::AccessConfig;
///
/// let host = MemoryHost::new(AccessConfig::default());
/// let access = AccessControl::for_host(AccessConfig::default(), &host).unwrap();
///
/// let mut members = MemoryMembers::default();
/// assert!(!access.on_init(&mut members));
/// assert_eq!(access.on_admin_init().unwrap(), InstallOutcome::Installed);
/// ```
pub struct AccessControl<'h> {
    config: AccessConfig,
    users: &'h dyn UserDirectory,
    roles: &'h dyn RoleStore,
    symbols: &'h dyn HostSymbols,
}

impl<'h> AccessControl<'h> {
    /// Bind the capability layer to separate host components.
    ///
    /// Fails if the configuration does not validate.
    pub fn new(
        config: AccessConfig,
        users: &'h dyn UserDirectory,
        roles: &'h dyn RoleStore,
        symbols: &'h dyn HostSymbols,
    ) -> AccessResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            users,
            roles,
            symbols,
        })
    }

    /// Bind the capability layer to a host implementing every seam.
    pub fn for_host<H>(config: AccessConfig, host: &'h H) -> AccessResult<Self>
    where
        H: UserDirectory + RoleStore + HostSymbols,
    {
        Self::new(config, host, host, host)
    }

    /// The active configuration.
    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Whether the Members extension is active.
    pub fn has_members_plugin(&self) -> bool {
        has_members_plugin(self.symbols, &self.config.members_min_version)
    }

    /// The capability-check resolver.
    pub fn resolver(&self) -> PermissionResolver<'_> {
        PermissionResolver::new(&self.config, self.users, self.symbols)
    }

    /// Query helpers over the host's user directory.
    pub fn query(&self) -> CapabilityQuery<'h> {
        CapabilityQuery::new(self.users)
    }

    /// The role installer.
    pub fn installer(&self) -> RoleInstaller<'_> {
        RoleInstaller::new(self.roles, &self.config.team_member_display_name)
    }
}

impl CapabilityHooks for AccessControl<'_> {
    fn on_init(&self, members: &mut dyn MembersApi) -> bool {
        if !self.has_members_plugin() {
            return false;
        }
        info!("Members extension detected, registering capabilities");
        members_register_cap_group(members);
        members_register_caps(members);
        true
    }

    fn on_admin_init(&self) -> AccessResult<InstallOutcome> {
        self.installer().maybe_install_roles()
    }

    fn user_has_cap(
        &self,
        grants: GrantSet,
        caps: &[&str],
        args: &[serde_json::Value],
        user: &UserId,
    ) -> GrantSet {
        self.resolver().filter_user_has_cap(grants, caps, args, user)
    }

    fn members_get_capabilities(&self, caps: Vec<(String, String)>) -> Vec<(String, String)> {
        filter_members_get_capabilities(caps)
    }
}
