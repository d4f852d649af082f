use super::Platform;
use crate::error::{BridgeError, BridgeResult};
use crate::platform::types::{ActivityRecord, InstalledPackage};

/// Adapter for hosts without a package-management subsystem. Every query
/// reports an internal error, which the handler masks as an empty result.
#[derive(Debug, Default)]
pub struct PortablePlatform;

impl PortablePlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for PortablePlatform {
    fn id(&self) -> &str {
        "unsupported"
    }

    fn list_installed_packages(&self) -> BridgeResult<Vec<InstalledPackage>> {
        Err(platform_not_supported("list_installed_packages"))
    }

    fn package_activities(&self, _package: &str) -> BridgeResult<Vec<ActivityRecord>> {
        Err(platform_not_supported("package_activities"))
    }

    fn launch_activity(&self, _package: &str, _activity: &str) -> BridgeResult<()> {
        Err(platform_not_supported("launch_activity"))
    }
}

fn platform_not_supported(operation: &str) -> BridgeError {
    BridgeError::Internal(format!("platform query not supported: {operation}"))
}
