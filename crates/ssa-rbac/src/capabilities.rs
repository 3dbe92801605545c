//! # Capabilities
//!
//! The fixed capability registry for Simply Schedule Appointments.
//! Every capability key lives under the `ssa_` namespace.

use serde::{Deserialize, Serialize};

/// Prefix shared by every capability this crate owns.
pub const CAPABILITY_PREFIX: &str = "ssa_";

/// Synthetic capability implying every namespaced capability.
///
/// It is never part of the registry and is never assigned through a role;
/// the capability-check filter grants it to privileged users.
pub const FULL_ACCESS: &str = "ssa_full_access";

/// Capabilities that can be checked against a user.
///
/// Declaration order is the registry order, which matters for display only:
/// - **ManageSiteSettings**: plugin-wide settings
/// - **ManageStaff**: staff member records
/// - **ManageAppointmentTypes**: bookable appointment types
/// - **ManageAppointments**: the user's own appointments
/// - **ManageOthersAppointments**: appointments of other staff members
/// - **ManageStaffBlackoutDates**: staff availability exceptions
/// - **ManageResources**: shared bookable resources
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Manage plugin settings.
    #[serde(rename = "ssa_manage_site_settings")]
    ManageSiteSettings,

    /// Manage staff members.
    #[serde(rename = "ssa_manage_staff")]
    ManageStaff,

    /// Manage appointment types.
    #[serde(rename = "ssa_manage_appointment_types")]
    ManageAppointmentTypes,

    /// Manage the user's own appointments.
    #[serde(rename = "ssa_manage_appointments")]
    ManageAppointments,

    /// Manage appointments that belong to other staff members.
    #[serde(rename = "ssa_manage_others_appointments")]
    ManageOthersAppointments,

    /// Manage staff blackout dates.
    #[serde(rename = "ssa_manage_staff_blackout_dates")]
    ManageStaffBlackoutDates,

    /// Manage resources.
    #[serde(rename = "ssa_manage_resources")]
    ManageResources,
}

const ALL: [Capability; 7] = [
    Capability::ManageSiteSettings,
    Capability::ManageStaff,
    Capability::ManageAppointmentTypes,
    Capability::ManageAppointments,
    Capability::ManageOthersAppointments,
    Capability::ManageStaffBlackoutDates,
    Capability::ManageResources,
];

impl Capability {
    /// Get the capability key checked against the host's user store.
    ///
    /// # Example
    ///
    /// ```
    /// use ssa_rbac::Capability;
    ///
    /// assert_eq!(Capability::ManageStaff.as_str(), "ssa_manage_staff");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::ManageSiteSettings => "ssa_manage_site_settings",
            Capability::ManageStaff => "ssa_manage_staff",
            Capability::ManageAppointmentTypes => "ssa_manage_appointment_types",
            Capability::ManageAppointments => "ssa_manage_appointments",
            Capability::ManageOthersAppointments => "ssa_manage_others_appointments",
            Capability::ManageStaffBlackoutDates => "ssa_manage_staff_blackout_dates",
            Capability::ManageResources => "ssa_manage_resources",
        }
    }

    /// Get the human-readable label shown in role editors.
    pub fn label(&self) -> &'static str {
        match self {
            Capability::ManageSiteSettings => "Manage SSA Settings",
            Capability::ManageStaff => "Manage Staff Members",
            Capability::ManageAppointmentTypes => "Manage Appointment Types",
            Capability::ManageAppointments => "Manage Appointments",
            Capability::ManageOthersAppointments => "Manage Others' (Staff) Appointments",
            Capability::ManageStaffBlackoutDates => "Manage Blackout Dates",
            Capability::ManageResources => "Manage Resources",
        }
    }

    /// Parse a capability from its key.
    ///
    /// Keys are matched exactly; `ssa_full_access` is not a registry entry and
    /// parses to `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use ssa_rbac::Capability;
    ///
    /// assert_eq!(
    ///     Capability::parse("ssa_manage_resources"),
    ///     Some(Capability::ManageResources)
    /// );
    /// assert_eq!(Capability::parse("ssa_full_access"), None);
    /// assert_eq!(Capability::parse("manage_options"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        ALL.iter().copied().find(|cap| cap.as_str() == s)
    }

    /// Get all capabilities in registry order.
    pub fn all() -> &'static [Capability] {
        &ALL
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get the registry as ordered `(key, label)` pairs.
///
/// # Example
///
/// ```
/// use ssa_rbac::capabilities::get_all_caps;
///
/// let caps = get_all_caps();
/// assert_eq!(caps.len(), 7);
/// assert_eq!(caps[0], ("ssa_manage_site_settings", "Manage SSA Settings"));
/// ```
pub fn get_all_caps() -> Vec<(&'static str, &'static str)> {
    ALL.iter().map(|cap| (cap.as_str(), cap.label())).collect()
}

/// Get the registry keys, in the same order as [`get_all_caps`].
pub fn get_all_cap_slugs() -> Vec<&'static str> {
    ALL.iter().map(Capability::as_str).collect()
}

/// Check whether a key lives under the `ssa_` namespace.
pub fn is_namespaced(key: &str) -> bool {
    key.starts_with(CAPABILITY_PREFIX)
}

/// Check whether a key is one of the registry capabilities.
pub fn is_registered(key: &str) -> bool {
    Capability::parse(key).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_parsing() {
        assert_eq!(
            Capability::parse("ssa_manage_site_settings"),
            Some(Capability::ManageSiteSettings)
        );
        assert_eq!(
            Capability::parse("ssa_manage_others_appointments"),
            Some(Capability::ManageOthersAppointments)
        );
        assert_eq!(Capability::parse("SSA_MANAGE_STAFF"), None);
        assert_eq!(Capability::parse(FULL_ACCESS), None);
        assert_eq!(Capability::parse(""), None);
    }

    #[test]
    fn test_all_capabilities_count() {
        assert_eq!(Capability::all().len(), 7);
        assert_eq!(get_all_caps().len(), 7);
        assert_eq!(get_all_cap_slugs().len(), 7);
    }

    #[test]
    fn test_slugs_match_registry_order() {
        let keys: Vec<&str> = get_all_caps().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, get_all_cap_slugs());
        assert_eq!(
            get_all_cap_slugs(),
            vec![
                "ssa_manage_site_settings",
                "ssa_manage_staff",
                "ssa_manage_appointment_types",
                "ssa_manage_appointments",
                "ssa_manage_others_appointments",
                "ssa_manage_staff_blackout_dates",
                "ssa_manage_resources",
            ]
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(Capability::ManageStaffBlackoutDates.label(), "Manage Blackout Dates");
        assert_eq!(
            Capability::ManageOthersAppointments.label(),
            "Manage Others' (Staff) Appointments"
        );
    }

    #[test]
    fn test_every_key_is_namespaced() {
        for cap in Capability::all() {
            assert!(is_namespaced(cap.as_str()));
            assert!(is_registered(cap.as_str()));
        }
        assert!(is_namespaced(FULL_ACCESS));
        assert!(!is_registered(FULL_ACCESS));
        assert!(!is_namespaced("administrator"));
    }

    #[test]
    fn test_serde_uses_capability_keys() {
        let json = serde_json::to_string(&Capability::ManageResources).unwrap();
        assert_eq!(json, "\"ssa_manage_resources\"");

        let parsed: Capability = serde_json::from_str("\"ssa_manage_staff\"").unwrap();
        assert_eq!(parsed, Capability::ManageStaff);
    }
}
