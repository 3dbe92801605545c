//! # Members integration
//!
//! Optional integration with the third-party Members permissions extension.
//! When the extension is loaded, the plugin's capabilities show up as a
//! checkbox group in its role editor.

use serde::{Deserialize, Serialize};
use ssa_rbac::capabilities::{get_all_caps, Capability};
use std::cmp::Ordering;
use tracing::debug;

use crate::host::{HostSymbols, MembersApi};

/// Symbol the Members extension registers once loaded.
pub const MEMBERS_DETECTION_SYMBOL: &str = "members_register_cap_group";

/// Version the detection gate compares against.
pub const MEMBERS_BASELINE_VERSION: &str = "2.0";

/// Key of the capability group registered with Members.
pub const CAP_GROUP_KEY: &str = "ssa";

/// Label of the capability group registered with Members.
pub const CAP_GROUP_LABEL: &str = "Simply Schedule Appointments";

/// Icon of the capability group registered with Members.
pub const CAP_GROUP_ICON: &str = "dashicons-calendar";

/// A capability group as handed to Members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapGroup {
    /// Label shown above the group.
    pub label: String,
    /// Dashicon class name.
    pub icon: String,
    /// Capabilities listed in the group. Members fills this from
    /// [`CapRegistration::group`], so it is registered empty.
    pub caps: Vec<String>,
}

/// A single capability as handed to Members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapRegistration {
    /// Label shown next to the checkbox.
    pub label: String,
    /// Key of the owning group.
    pub group: String,
}

/// Parse a dotted numeric version such as `2.0` or `3.1.4`.
pub fn parse_version(version: &str) -> Option<Vec<u64>> {
    let version = version.trim();
    if version.is_empty() {
        return None;
    }
    version.split('.').map(|part| part.parse().ok()).collect()
}

/// Compare two dotted versions component by component. When one is a
/// prefix of the other, the shorter sorts lower (`2` < `2.0`).
fn compare_versions(a: &[u64], b: &[u64]) -> Ordering {
    for (left, right) in a.iter().zip(b) {
        match left.cmp(right) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Determine whether the Members extension is active.
///
/// `min_version` is only compared against the 2.0 baseline: at or above it,
/// detection is a plain symbol lookup; below it (or unparseable), the
/// extension is reported inactive. A bare `2` sorts below `2.0`. The
/// installed extension's own version is never consulted.
///
/// # Example
///
/// ```
/// use ssa_access::host::HostSymbols;
/// use ssa_access::members::has_members_plugin;
///
/// struct Loaded;
/// impl HostSymbols for Loaded {
///     fn function_exists(&self, name: &str) -> bool {
///         name == "members_register_cap_group"
///     }
/// }
///
/// assert!(has_members_plugin(&Loaded, "2.0"));
/// assert!(!has_members_plugin(&Loaded, "1.9"));
/// ```
pub fn has_members_plugin(symbols: &dyn HostSymbols, min_version: &str) -> bool {
    let baseline = [2, 0];
    match parse_version(min_version) {
        Some(min) if compare_versions(&min, &baseline) != Ordering::Less => {
            symbols.function_exists(MEMBERS_DETECTION_SYMBOL)
        }
        _ => false,
    }
}

/// Register the plugin's capability group with Members.
pub fn members_register_cap_group(members: &mut dyn MembersApi) {
    debug!(group = CAP_GROUP_KEY, "Registering Members capability group");
    members.register_cap_group(
        CAP_GROUP_KEY,
        CapGroup {
            label: CAP_GROUP_LABEL.to_string(),
            icon: CAP_GROUP_ICON.to_string(),
            caps: Vec::new(),
        },
    );
}

/// Register every registry capability with Members, in registry order.
pub fn members_register_caps(members: &mut dyn MembersApi) {
    for cap in Capability::all() {
        debug!(capability = %cap, "Registering Members capability");
        members.register_cap(
            cap.as_str(),
            CapRegistration {
                label: cap.label().to_string(),
                group: CAP_GROUP_KEY.to_string(),
            },
        );
    }
}

/// Members filter enumerating the capabilities it should manage.
///
/// Returns `caps` with the registry merged in. Registry labels replace the
/// label of an already-known key; keys keep their first-seen position.
pub fn filter_members_get_capabilities(caps: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut merged = caps;
    for (key, label) in get_all_caps() {
        match merged.iter_mut().find(|(existing, _)| existing == key) {
            Some(entry) => entry.1 = label.to_string(),
            None => merged.push((key.to_string(), label.to_string())),
        }
    }
    merged
}
