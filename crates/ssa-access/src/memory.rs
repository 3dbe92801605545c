//! In-memory host
//!
//! A self-contained stand-in for the host application: a role table, a user
//! directory whose capability check runs the resolver the way the host's
//! own check does, a symbol table, and a recorder for Members registrations.
//!
//! Suitable for tests and single-process embedding.

use chrono::{DateTime, Utc};
use ssa_rbac::{GrantSet, RoleDefinition, BASE_READ};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;
use tracing::warn;

use crate::config::AccessConfig;
use crate::error::{AccessError, AccessResult};
use crate::host::{HostSymbols, MembersApi, RoleStore, UserDirectory, UserId};
use crate::members::{CapGroup, CapRegistration, MEMBERS_DETECTION_SYMBOL};
use crate::resolver::PermissionResolver;

/// A role record held by the in-memory role table.
#[derive(Debug, Clone)]
struct StoredRole {
    definition: RoleDefinition,
    updated_at: DateTime<Utc>,
}

/// A user known to the in-memory directory.
#[derive(Debug, Clone, Default)]
struct MemoryUser {
    roles: Vec<String>,
    grants: GrantSet,
    super_admin: bool,
}

/// In-memory host implementation.
///
/// # Example
///
/// ```
/// use ssa_access::host::UserDirectory;
/// use ssa_access::memory::MemoryHost;
/// use ssa_access::AccessConfig;
///
/// let host = MemoryHost::new(AccessConfig::default());
/// let admin = host.add_user(&["administrator"], Default::default());
///
/// // Without Members, administrators hold every ssa_ capability.
/// assert!(host.user_can(&admin, "ssa_manage_site_settings"));
/// ```
pub struct MemoryHost {
    /// Configuration the embedded resolver runs with
    config: AccessConfig,
    /// Role table; `None` until initialized
    roles: RwLock<Option<BTreeMap<String, StoredRole>>>,
    /// Known users
    users: RwLock<HashMap<UserId, MemoryUser>>,
    /// Functions registered by loaded extensions
    symbols: RwLock<HashSet<String>>,
    /// Identity bound to the current request
    current_user: RwLock<Option<UserId>>,
}

impl std::fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryHost")
            .field("config", &self.config)
            .finish()
    }
}

impl MemoryHost {
    /// Create a host with an initialized role table holding the
    /// `administrator` role.
    pub fn new(config: AccessConfig) -> Self {
        let host = Self::uninitialized(config);
        if let Ok(mut roles) = host.roles.write() {
            let administrator = RoleDefinition::new(
                "administrator",
                "Administrator",
                GrantSet::from_keys(&[BASE_READ, "manage_options"]),
            );
            let mut table = BTreeMap::new();
            table.insert(
                administrator.name.clone(),
                StoredRole {
                    definition: administrator,
                    updated_at: Utc::now(),
                },
            );
            *roles = Some(table);
        }
        host
    }

    /// Create a host whose role table has not been loaded yet.
    pub fn uninitialized(config: AccessConfig) -> Self {
        Self {
            config,
            roles: RwLock::new(None),
            users: RwLock::new(HashMap::new()),
            symbols: RwLock::new(HashSet::new()),
            current_user: RwLock::new(None),
        }
    }

    /// Load an empty role table if none is loaded.
    pub fn initialize_roles(&self) -> AccessResult<()> {
        let mut roles = self.roles.write().map_err(poisoned)?;
        roles.get_or_insert_with(BTreeMap::new);
        Ok(())
    }

    /// When a role was last written.
    pub fn role_updated_at(&self, name: &str) -> Option<DateTime<Utc>> {
        let roles = self.roles.read().ok()?;
        roles.as_ref()?.get(name).map(|role| role.updated_at)
    }

    /// Add a user holding the given roles and direct grants.
    pub fn add_user(&self, roles: &[&str], grants: GrantSet) -> UserId {
        let id = UserId::new();
        let user = MemoryUser {
            roles: roles.iter().map(|role| role.to_string()).collect(),
            grants,
            super_admin: false,
        };
        match self.users.write() {
            Ok(mut users) => {
                users.insert(id, user);
            }
            Err(_) => warn!(user = %id, "User table lock poisoned, user not added"),
        }
        id
    }

    /// Mark a user as super administrator.
    pub fn set_super_admin(&self, user: &UserId, super_admin: bool) {
        if let Ok(mut users) = self.users.write() {
            if let Some(record) = users.get_mut(user) {
                record.super_admin = super_admin;
            }
        }
    }

    /// Record a direct grant (or explicit denial) on a user.
    pub fn set_user_grant(&self, user: &UserId, key: &str, granted: bool) {
        if let Ok(mut users) = self.users.write() {
            if let Some(record) = users.get_mut(user) {
                record.grants.set(key, granted);
            }
        }
    }

    /// Register a global function, as loading an extension would.
    pub fn register_function(&self, name: &str) {
        if let Ok(mut symbols) = self.symbols.write() {
            symbols.insert(name.to_string());
        }
    }

    /// Load the Members extension.
    pub fn load_members(&self) {
        self.register_function(MEMBERS_DETECTION_SYMBOL);
    }

    /// Bind a user to the current request.
    pub fn log_in(&self, user: &UserId) {
        if let Ok(mut current) = self.current_user.write() {
            *current = Some(*user);
        }
    }

    /// Clear the current request's identity.
    pub fn log_out(&self) {
        if let Ok(mut current) = self.current_user.write() {
            *current = None;
        }
    }

    /// Assemble a user's grants before filtering: each role name, each role's
    /// capabilities, then the user's direct grants on top.
    pub fn assemble_grants(&self, user: &UserId) -> Option<GrantSet> {
        let record = self.users.read().ok()?.get(user).cloned()?;
        let roles = self.roles.read().ok()?;

        let mut grants = GrantSet::new();
        for role in &record.roles {
            grants.grant(role.as_str());
            if let Some(stored) = roles.as_ref().and_then(|table| table.get(role)) {
                grants.merge(&stored.definition.capabilities);
            }
        }
        grants.merge(&record.grants);
        Some(grants)
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> AccessError {
    AccessError::Internal("role table lock poisoned".to_string())
}

impl RoleStore for MemoryHost {
    fn is_initialized(&self) -> bool {
        self.roles.read().map(|roles| roles.is_some()).unwrap_or(false)
    }

    fn get(&self, name: &str) -> AccessResult<Option<RoleDefinition>> {
        let roles = self.roles.read().map_err(poisoned)?;
        Ok(roles
            .as_ref()
            .and_then(|table| table.get(name))
            .map(|stored| stored.definition.clone()))
    }

    fn put(&self, role: RoleDefinition) -> AccessResult<()> {
        let mut roles = self.roles.write().map_err(poisoned)?;
        let table = roles
            .as_mut()
            .ok_or_else(|| AccessError::RoleStore("role table not initialized".to_string()))?;
        table.insert(
            role.name.clone(),
            StoredRole {
                definition: role,
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn delete(&self, name: &str) -> AccessResult<bool> {
        let mut roles = self.roles.write().map_err(poisoned)?;
        Ok(roles
            .as_mut()
            .map(|table| table.remove(name).is_some())
            .unwrap_or(false))
    }
}

impl UserDirectory for MemoryHost {
    fn user_can(&self, user: &UserId, capability: &str) -> bool {
        let Some(grants) = self.assemble_grants(user) else {
            return false;
        };
        let resolver = PermissionResolver::new(&self.config, self, self);
        resolver
            .filter_user_has_cap(grants, &[capability], &[], user)
            .is_granted(capability)
    }

    fn is_super_admin(&self, user: &UserId) -> bool {
        self.users
            .read()
            .ok()
            .and_then(|users| users.get(user).map(|record| record.super_admin))
            .unwrap_or(false)
    }

    fn current_user_id(&self) -> Option<UserId> {
        self.current_user.read().ok().and_then(|current| *current)
    }
}

impl HostSymbols for MemoryHost {
    fn function_exists(&self, name: &str) -> bool {
        self.symbols
            .read()
            .map(|symbols| symbols.contains(name))
            .unwrap_or(false)
    }
}

/// Records registrations made against the Members extension.
#[derive(Debug, Clone, Default)]
pub struct MemoryMembers {
    /// Registered groups, in registration order
    pub groups: Vec<(String, CapGroup)>,
    /// Registered capabilities, in registration order
    pub caps: Vec<(String, CapRegistration)>,
}

impl MembersApi for MemoryMembers {
    fn register_cap_group(&mut self, key: &str, group: CapGroup) {
        self.groups.push((key.to_string(), group));
    }

    fn register_cap(&mut self, key: &str, cap: CapRegistration) {
        self.caps.push((key.to_string(), cap));
    }
}
