use serde::{Deserialize, Serialize};

/// One entry from the device's installed-application registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledPackage {
    /// Unique package identifier (e.g. "com.android.settings").
    pub package_name: String,
    /// User-visible display label, as resolved by the platform.
    pub label: String,
    /// Whether the platform flags this package as a system application.
    pub system: bool,
}

/// One activity component declared by a package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Fully-qualified component class name.
    pub name: String,
    /// Explicit component label, if the package declares one.
    pub label: Option<String>,
    /// Whether other applications may launch this component directly.
    pub exported: bool,
}
