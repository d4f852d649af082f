use std::sync::Arc;

use super::adapters::SharedPlatform;

pub fn default_platform() -> SharedPlatform {
    #[cfg(target_os = "android")]
    {
        Arc::new(super::adapters::android::AndroidPlatform::new())
    }

    #[cfg(not(target_os = "android"))]
    {
        Arc::new(super::adapters::portable::PortablePlatform::new())
    }
}
