mod adapters;
pub mod factory;
pub mod types;

pub use adapters::{Platform, SharedPlatform};
pub use factory::default_platform;
pub use types::{ActivityRecord, InstalledPackage};
