//! # SSA RBAC
//!
//! Capability data for Simply Schedule Appointments: the fixed capability
//! registry, per-check grant sets and the roles the plugin installs.
//!
//! ## Overview
//!
//! The ssa-rbac crate handles:
//! - **Capabilities**: The seven `ssa_` capabilities and their labels
//! - **Full access**: The synthetic `ssa_full_access` capability
//! - **Grant Sets**: Capability key to boolean mappings supplied by the host
//! - **Roles**: The `team_member` role and its default grants
//!
//! ## Architecture
//!
//! ```text
//! Registry (static, ordered)
//!   ssa_manage_site_settings          Manage SSA Settings
//!   ssa_manage_staff                  Manage Staff Members
//!   ssa_manage_appointment_types      Manage Appointment Types
//!   ssa_manage_appointments           Manage Appointments
//!   ssa_manage_others_appointments    Manage Others' (Staff) Appointments
//!   ssa_manage_staff_blackout_dates   Manage Blackout Dates
//!   ssa_manage_resources              Manage Resources
//!
//! ssa_full_access  (synthetic, implies every ssa_ capability)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use ssa_rbac::{get_all_cap_slugs, Capability, GrantSet, RoleDefinition, FULL_ACCESS};
//!
//! let slugs = get_all_cap_slugs();
//! assert_eq!(slugs.len(), 7);
//!
//! let mut grants = GrantSet::from_keys(&["read"]);
//! grants.grant(FULL_ACCESS);
//! assert!(grants.has_full_access());
//!
//! let role = RoleDefinition::team_member();
//! assert!(role.grants(Capability::ManageAppointments.as_str()));
//! ```
//!
//! ## Integration with ssa-access
//!
//! This crate is pure data. `ssa-access` layers the capability-check filter,
//! query helpers and role installation on top of it.

pub mod capabilities;
pub mod grants;
pub mod roles;

// Re-export main types for convenience
pub use capabilities::{
    get_all_cap_slugs, get_all_caps, is_namespaced, is_registered, Capability, CAPABILITY_PREFIX,
    FULL_ACCESS,
};
pub use grants::GrantSet;
pub use roles::{RoleDefinition, BASE_READ, TEAM_MEMBER_DISPLAY_NAME, TEAM_MEMBER_ROLE};
