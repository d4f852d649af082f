//! Dispatch for the bridge channel's three operations.
//!
//! Every operation is one platform query followed by in-memory filtering,
//! sorting, and pagination. Platform failures never reach the caller: the
//! query operations mask them as an empty result and the launch operation as
//! a payload-less success, with the failure reported to the tracing sink.
//! The only error a caller ever sees is `NotImplemented` for an unknown
//! method name.

use serde::Serialize;
use serde_json::Value;

use crate::channel::{MethodCall, MethodReply};
use crate::error::{BridgeError, BridgeResult};
use crate::platform::SharedPlatform;

const DEFAULT_PAGE_LIMIT: i64 = 50;

/// One installed application, as replied to the UI layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSummary {
    pub app_name: String,
    pub package_name: String,
}

/// One declared activity component, as replied to the UI layer.
///
/// `exported` is serialized as the literal string "true" or "false", never a
/// boolean; existing channel consumers depend on that shape.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityInfo {
    pub name: String,
    pub label: String,
    pub exported: String,
}

pub struct BridgeHandler {
    platform: SharedPlatform,
}

impl BridgeHandler {
    pub fn new(platform: SharedPlatform) -> Self {
        Self { platform }
    }

    /// Handle one channel call, producing the reply envelope.
    pub fn handle(&self, call: &MethodCall) -> MethodReply {
        match self.dispatch(call) {
            Ok(data) => MethodReply::success(data),
            Err(error) => MethodReply::from_error(&error),
        }
    }

    /// Dispatch one channel call to its operation. `Err(NotImplemented)` for
    /// unknown method names is the only error this returns.
    pub fn dispatch(&self, call: &MethodCall) -> BridgeResult<Value> {
        let args = &call.arguments;
        match call.method.as_str() {
            "getInstalledAppsPaged" => {
                let start_index = int_argument(args, "startIndex", 0);
                let limit = int_argument(args, "limit", DEFAULT_PAGE_LIMIT);
                let show_system_apps = bool_argument(args, "showSystemApps", true);
                self.get_installed_apps_paged(start_index, limit, show_system_apps)
            }
            "getAllActivities" => {
                let package_name = string_argument(args, "packageName");
                let show_unexported = bool_argument(args, "showUnexported", true);
                self.get_all_activities(&package_name, show_unexported)
            }
            "launchActivity" => {
                let package_name = string_argument(args, "packageName");
                let activity_name = string_argument(args, "activityName");
                self.launch_activity(&package_name, &activity_name)
            }
            _ => Err(BridgeError::NotImplemented),
        }
    }

    fn get_installed_apps_paged(
        &self,
        start_index: i64,
        limit: i64,
        show_system_apps: bool,
    ) -> BridgeResult<Value> {
        let mut packages = match self.platform.list_installed_packages() {
            Ok(packages) => packages,
            Err(error) => {
                tracing::warn!("installed package query failed: {error}");
                return to_reply_value(Vec::<AppSummary>::new());
            }
        };

        packages.retain(|package| show_system_apps || !package.system);
        // Stable sort: packages sharing a label keep their registry order.
        packages.sort_by(|left, right| left.label.cmp(&right.label));

        // Negative indices clamp to zero rather than inheriting slice
        // semantics from the pagination primitives.
        let start_index = start_index.max(0) as usize;
        let limit = limit.max(0) as usize;

        let page: Vec<AppSummary> = packages
            .into_iter()
            .skip(start_index)
            .take(limit)
            .map(|package| AppSummary {
                app_name: package.label,
                package_name: package.package_name,
            })
            .collect();
        to_reply_value(page)
    }

    fn get_all_activities(&self, package_name: &str, show_unexported: bool) -> BridgeResult<Value> {
        let records = match self.platform.package_activities(package_name) {
            Ok(records) => records,
            Err(error) => {
                // Masked: callers cannot distinguish a failed lookup from a
                // package with zero matching activities.
                tracing::warn!("activity query failed for {package_name}: {error}");
                return to_reply_value(Vec::<ActivityInfo>::new());
            }
        };

        // Declaration order is preserved; only the exported filter applies.
        let activities: Vec<ActivityInfo> = records
            .into_iter()
            .filter(|record| show_unexported || record.exported)
            .map(|record| {
                let label = record
                    .label
                    .unwrap_or_else(|| default_activity_label(&record.name));
                ActivityInfo {
                    name: record.name,
                    label,
                    exported: record.exported.to_string(),
                }
            })
            .collect();
        to_reply_value(activities)
    }

    fn launch_activity(&self, package_name: &str, activity_name: &str) -> BridgeResult<Value> {
        if let Err(error) = self.platform.launch_activity(package_name, activity_name) {
            // Fire-and-forget: launch failure is never surfaced to the caller.
            tracing::warn!("activity launch failed for {package_name}/{activity_name}: {error}");
        }
        Ok(Value::Null)
    }
}

fn int_argument(args: &Value, key: &str, default: i64) -> i64 {
    args.get(key).and_then(Value::as_i64).unwrap_or(default)
}

fn bool_argument(args: &Value, key: &str, default: bool) -> bool {
    args.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn string_argument(args: &Value, key: &str) -> String {
    args.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Fallback label when a component declares none: the trailing segment of the
/// class name.
fn default_activity_label(class_name: &str) -> String {
    class_name
        .rsplit('.')
        .next()
        .unwrap_or(class_name)
        .to_string()
}

fn to_reply_value<T: Serialize>(records: T) -> BridgeResult<Value> {
    serde_json::to_value(records)
        .map_err(|error| BridgeError::Internal(format!("failed to serialize reply: {error}")))
}
