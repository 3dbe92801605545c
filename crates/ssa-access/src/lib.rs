//! # SSA Access
//!
//! Capability checks for Simply Schedule Appointments, bound to the host
//! application through injected traits.
//!
//! ## Features
//!
//! - **Permission resolver**: The per-check filter elevating administrators
//!   to `ssa_full_access`
//! - **Query helpers**: any / which / filter checks for application code
//! - **Role installer**: Idempotent install and removal of `team_member`
//! - **Members integration**: Capability group registration with the
//!   optional Members extension
//! - **Lifecycle hooks**: Explicit entry points for the host pipeline
//! - **In-memory host**: Role table, user directory and symbol table for
//!   tests and embedding
//!
//! ## Data Flow
//!
//! ```text
//! host capability check
//!   -> assemble grant set (roles + direct grants)
//!   -> PermissionResolver::filter_user_has_cap (may add ssa_full_access)
//!   -> host reads the requested key
//!   -> CapabilityQuery layers any / which / filter on top
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use ssa_access::hooks::{AccessControl, CapabilityHooks};
//! use ssa_access::memory::MemoryHost;
//! use ssa_access::AccessConfig;
//! use ssa_rbac::GrantSet;
//!
//! let host = MemoryHost::new(AccessConfig::default());
//! let access = AccessControl::for_host(AccessConfig::default(), &host).unwrap();
//! access.on_admin_init().unwrap();
//!
//! let staff = host.add_user(&["team_member"], GrantSet::new());
//! let query = access.query();
//! assert!(query.user_can_any(&staff, "ssa_manage_appointments"));
//! assert!(!query.user_can_any(&staff, "ssa_manage_site_settings"));
//! assert_eq!(
//!     query.user_can_all(&staff, &ssa_rbac::get_all_cap_slugs()),
//!     vec!["ssa_manage_appointments", "ssa_manage_staff_blackout_dates"]
//! );
//! ```

pub mod config;
pub mod error;
pub mod hooks;
pub mod host;
pub mod installer;
pub mod members;
pub mod memory;
pub mod queries;
pub mod resolver;

// Re-exports
pub use config::{AccessConfig, ConfigError};
pub use error::{AccessError, AccessResult};
pub use hooks::{AccessControl, CapabilityHooks};
pub use host::{HostSymbols, MembersApi, RoleStore, UserDirectory, UserId};
pub use installer::{InstallOutcome, RoleInstaller};
pub use members::{CapGroup, CapRegistration};
pub use queries::{CapabilityCheck, CapabilityQuery};
pub use resolver::PermissionResolver;
