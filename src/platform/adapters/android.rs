use std::process::Command;

use super::Platform;
use crate::error::{BridgeError, BridgeResult};
use crate::platform::types::{ActivityRecord, InstalledPackage};

/// Adapter for on-device use, backed by the platform toolbox binaries:
/// `pm` for the installed-application registry, `dumpsys` for a package's
/// component table, and `am` for activity launch (`am start` enters a new
/// task context).
///
/// The toolbox has no label resolver, so display labels fall back to the
/// package name. Components without an intent filter are not visible in the
/// dump output, a limitation relative to a resolver with full package
/// visibility.
#[derive(Debug, Default)]
pub struct AndroidPlatform;

impl AndroidPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for AndroidPlatform {
    fn id(&self) -> &str {
        "android"
    }

    fn list_installed_packages(&self) -> BridgeResult<Vec<InstalledPackage>> {
        let output = run_toolbox("pm", &["list", "packages", "-f"])?;
        Ok(parse_package_list(&output))
    }

    fn package_activities(&self, package: &str) -> BridgeResult<Vec<ActivityRecord>> {
        if package.is_empty() {
            return Err(BridgeError::InvalidInput("missing package name".to_string()));
        }
        let output = run_toolbox("dumpsys", &["package", package])?;
        Ok(parse_activity_table(package, &output))
    }

    fn launch_activity(&self, package: &str, activity: &str) -> BridgeResult<()> {
        if package.is_empty() || activity.is_empty() {
            return Err(BridgeError::InvalidInput(
                "missing package or activity name".to_string(),
            ));
        }
        let component = format!("{package}/{activity}");
        let output = run_toolbox("am", &["start", "-n", &component])?;
        ensure_launch_succeeded(&component, &output)
    }
}

fn run_toolbox(program: &str, args: &[&str]) -> BridgeResult<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|error| BridgeError::Internal(format!("failed to run {program}: {error}")))?;
    if !output.status.success() {
        return Err(BridgeError::Internal(format!(
            "{program} failed with status {}",
            output.status
        )));
    }
    String::from_utf8(output.stdout)
        .map_err(|error| BridgeError::Internal(format!("{program} produced invalid utf-8: {error}")))
}

/// Parse `pm list packages -f` output. Each line has the shape
/// `package:<apk path>=<package name>`; packages installed outside the user
/// data partition carry the system flag.
fn parse_package_list(output: &str) -> Vec<InstalledPackage> {
    let mut packages = Vec::new();
    for line in output.lines() {
        let Some(entry) = line.trim().strip_prefix("package:") else {
            continue;
        };
        // The APK path itself may contain '='; the package name never does,
        // so split at the last one.
        let Some((apk_path, package_name)) = entry.rsplit_once('=') else {
            continue;
        };
        if package_name.is_empty() {
            continue;
        }
        packages.push(InstalledPackage {
            package_name: package_name.to_string(),
            label: package_name.to_string(),
            system: is_system_partition(apk_path),
        });
    }
    packages
}

fn is_system_partition(apk_path: &str) -> bool {
    ["/system/", "/system_ext/", "/product/", "/vendor/", "/apex/"]
        .iter()
        .any(|prefix| apk_path.starts_with(prefix))
}

/// Scan `dumpsys package <pkg>` output for activity component entries in the
/// resolver table, preserving declaration order and dropping duplicates
/// (one component can appear under several actions). Entries annotated
/// `exported=false` keep that flag; unannotated resolver entries are
/// launchable from the shell and count as exported.
fn parse_activity_table(package: &str, output: &str) -> Vec<ActivityRecord> {
    let mut records: Vec<ActivityRecord> = Vec::new();
    let mut in_activity_table = false;
    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("Activity Resolver Table") {
            in_activity_table = true;
            continue;
        }
        // A new top-level resolver section ends the activity table.
        if in_activity_table && trimmed.ends_with("Resolver Table:") {
            in_activity_table = false;
        }
        if !in_activity_table {
            continue;
        }
        let Some(component) = component_token(package, trimmed) else {
            continue;
        };
        let name = expand_class_name(package, component);
        if records.iter().any(|record| record.name == name) {
            continue;
        }
        records.push(ActivityRecord {
            name,
            label: None,
            exported: !trimmed.contains("exported=false"),
        });
    }
    records
}

/// Find the `<package>/<class>` token on a resolver entry line, if any.
fn component_token<'a>(package: &str, line: &'a str) -> Option<&'a str> {
    line.split_whitespace().find(|token| {
        token
            .strip_prefix(package)
            .is_some_and(|rest| rest.starts_with('/') && rest.len() > 1)
    })
}

/// Expand the resolver's shorthand (`com.example/.Main`) to a fully-qualified
/// component class name.
fn expand_class_name(package: &str, component: &str) -> String {
    match component.split_once('/') {
        Some((_, class)) if class.starts_with('.') => format!("{package}{class}"),
        Some((_, class)) => class.to_string(),
        None => component.to_string(),
    }
}

/// `am start` exits zero even when the launch is rejected; failures are
/// reported on stdout as an `Error:` line.
fn ensure_launch_succeeded(component: &str, output: &str) -> BridgeResult<()> {
    match output.lines().find(|line| line.trim_start().starts_with("Error")) {
        Some(error_line) => Err(BridgeError::Internal(format!(
            "am start {component} failed: {}",
            error_line.trim()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_list_parses_paths_and_system_flag() {
        let output = "\
package:/system/priv-app/Settings/Settings.apk=com.android.settings
package:/data/app/~~abc==/com.example.notes-1/base.apk=com.example.notes
package:/product/app/Calendar/Calendar.apk=com.android.calendar
malformed line
package:/data/app/incomplete.apk=
";
        let packages = parse_package_list(output);
        assert_eq!(packages.len(), 3);
        assert!(packages[0].system);
        assert_eq!(packages[0].package_name, "com.android.settings");
        assert!(!packages[1].system);
        assert_eq!(packages[1].package_name, "com.example.notes");
        assert!(packages[2].system);
    }

    #[test]
    fn activity_table_expands_shorthand_and_dedupes() {
        let output = "\
Activity Resolver Table:
  Non-Data Actions:
      android.intent.action.MAIN:
        43f2a1b com.example.notes/.MainActivity filter 8a51828
        51c09d2 com.example.notes/com.example.notes.EditorActivity filter 91b2c3d
      android.intent.action.VIEW:
        43f2a1b com.example.notes/.MainActivity filter 8a51828
        77ab001 com.example.notes/.DebugActivity exported=false

Receiver Resolver Table:
  Non-Data Actions:
      android.intent.action.BOOT_COMPLETED:
        12ab34c com.example.notes/.BootReceiver filter 5d6e7f8
";
        let records = parse_activity_table("com.example.notes", output);
        let names: Vec<&str> = records.iter().map(|record| record.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "com.example.notes.MainActivity",
                "com.example.notes.EditorActivity",
                "com.example.notes.DebugActivity",
            ]
        );
        assert!(records[0].exported);
        assert!(!records[2].exported);
    }

    #[test]
    fn activity_table_ignores_other_packages() {
        let output = "\
Activity Resolver Table:
  Non-Data Actions:
      android.intent.action.MAIN:
        43f2a1b com.other.app/.MainActivity filter 8a51828
";
        let records = parse_activity_table("com.example.notes", output);
        assert!(records.is_empty());
    }

    #[test]
    fn launch_output_error_line_is_detected() {
        let failure = "Starting: Intent { cmp=com.example.notes/.Hidden }\n\
Error: Activity not started, unable to resolve Intent\n";
        let result = ensure_launch_succeeded("com.example.notes/.Hidden", failure);
        assert!(matches!(
            result,
            Err(BridgeError::Internal(message)) if message.contains("unable to resolve")
        ));

        let success = "Starting: Intent { cmp=com.example.notes/.MainActivity }\n";
        assert!(ensure_launch_succeeded("com.example.notes/.MainActivity", success).is_ok());
    }

    #[test]
    fn empty_package_name_is_rejected_before_shelling_out() {
        let adapter = AndroidPlatform::new();
        assert!(matches!(
            adapter.package_activities(""),
            Err(BridgeError::InvalidInput(_))
        ));
        assert!(matches!(
            adapter.launch_activity("", ""),
            Err(BridgeError::InvalidInput(_))
        ));
    }
}
