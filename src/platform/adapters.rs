use std::sync::Arc;

use crate::error::{BridgeError, BridgeResult};

use super::types::{ActivityRecord, InstalledPackage};

/// Seam between the bridge handler and the device's package-management and
/// activity-launch subsystems. One adapter per OS family; the handler never
/// touches the platform directly, so dispatch is testable without a device.
pub trait Platform: Send + Sync {
    fn id(&self) -> &str {
        "unsupported"
    }

    /// Enumerate every installed application with its resolved display label.
    /// May block for a non-trivial time on devices with many packages.
    fn list_installed_packages(&self) -> BridgeResult<Vec<InstalledPackage>> {
        Err(BridgeError::NotImplemented)
    }

    /// Enumerate the activity components a package declares, including
    /// disabled ones, in declaration order.
    fn package_activities(&self, _package: &str) -> BridgeResult<Vec<ActivityRecord>> {
        Err(BridgeError::NotImplemented)
    }

    /// Start the given activity in a new task context.
    fn launch_activity(&self, _package: &str, _activity: &str) -> BridgeResult<()> {
        Err(BridgeError::NotImplemented)
    }
}

pub type SharedPlatform = Arc<dyn Platform>;

#[cfg(any(target_os = "android", test))]
pub mod android;
#[cfg(any(not(target_os = "android"), test))]
pub mod portable;
