//! Wire types for the bridge channel.
//!
//! The UI layer sends a named method call with a JSON argument map and reads
//! back a standardised `{ ok, data }` / `{ ok, error }` envelope. An unknown
//! method name produces the `not_implemented` error code, which is the only
//! error condition ever surfaced through the channel.

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;

/// Inbound request: a named operation with a JSON argument map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    /// Operation name (e.g. "getInstalledAppsPaged").
    pub method: String,
    /// Argument map; absent keys fall back to per-operation defaults.
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Outbound reply envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodReply {
    pub ok: bool,
    /// Successful payload (mutually exclusive with `error`). The launch
    /// operation replies with an explicit `null` payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Error object (mutually exclusive with `data`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ReplyError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyError {
    /// Machine-readable code ("not_implemented", "invalid_input", "internal").
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

/// Error codes carried in [`ReplyError::code`].
pub mod error_codes {
    pub const NOT_IMPLEMENTED: &str = "not_implemented";
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const INTERNAL: &str = "internal";
}

impl MethodCall {
    pub fn new(method: &str, arguments: serde_json::Value) -> Self {
        Self {
            method: method.to_string(),
            arguments,
        }
    }
}

impl MethodReply {
    /// Create a successful reply.
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error reply from a bridge error.
    pub fn from_error(error: &BridgeError) -> Self {
        let code = match error {
            BridgeError::NotImplemented => error_codes::NOT_IMPLEMENTED,
            BridgeError::InvalidInput(_) => error_codes::INVALID_INPUT,
            BridgeError::Internal(_) => error_codes::INTERNAL,
        };
        Self {
            ok: false,
            data: None,
            error: Some(ReplyError {
                code: code.to_string(),
                message: error.to_string(),
            }),
        }
    }

    /// Check whether this reply carries the not-implemented signal.
    pub fn is_not_implemented(&self) -> bool {
        self.error
            .as_ref()
            .is_some_and(|error| error.code == error_codes::NOT_IMPLEMENTED)
    }
}
