pub mod channel;
pub mod error;
pub mod handler;
pub mod platform;
pub mod server;

pub use crate::channel::{MethodCall, MethodReply};
pub use crate::error::{BridgeError, BridgeResult};
pub use crate::handler::BridgeHandler;
pub use crate::platform::{default_platform, Platform, SharedPlatform};
