//! Application lifecycle and bundle identity.

use std::path::Path;

use tracing::{debug, instrument};

use crate::errors::AutomationError;
use crate::osascript::sanitize;
use crate::types::AppInfo;
use crate::Automation;

fn app_id_script(name: &str) -> String {
    format!("id of application \"{}\"", sanitize(name))
}

impl Automation {
    /// Resolve a possibly-localized app name to its canonical bundle name,
    /// e.g. `계산기` to `Calculator`.
    ///
    /// Spotlight indexes display names in every localization, so it is
    /// asked first; failing that, the name is probed directly against
    /// AppleScript. An unrecognized name is returned unchanged and the
    /// downstream script reports the failure in its own words.
    #[instrument(skip(self))]
    pub async fn resolve_app_name(&self, name: &str) -> String {
        if let Some(bundle) = spotlight_bundle_name(name).await {
            debug!(%bundle, "resolved via Spotlight");
            return bundle;
        }
        match self.engine().run(&app_id_script(name)).await {
            Ok(result) if result.exit_code == 0 => name.to_string(),
            _ => {
                debug!(name, "name not recognized, passing through");
                name.to_string()
            }
        }
    }

    /// Launch (activate) an application. Localized names are resolved
    /// first.
    #[instrument(skip(self))]
    pub async fn launch_app(&self, name: &str) -> Result<(), AutomationError> {
        let resolved = self.resolve_app_name(name).await;
        self.engine()
            .execute(&format!(
                "tell application \"{}\" to activate",
                sanitize(&resolved)
            ))
            .await?;
        Ok(())
    }

    /// Quit an application. `force` skips save dialogs.
    #[instrument(skip(self))]
    pub async fn quit_app(&self, name: &str, force: bool) -> Result<(), AutomationError> {
        let resolved = self.resolve_app_name(name).await;
        let suffix = if force { " without saving" } else { "" };
        self.engine()
            .execute(&format!(
                "tell application \"{}\" to quit{suffix}",
                sanitize(&resolved)
            ))
            .await?;
        Ok(())
    }

    /// Whether the application currently has a System Events process.
    pub async fn is_running(&self, name: &str) -> Result<bool, AutomationError> {
        let resolved = self.resolve_app_name(name).await;
        self.process_running(&resolved).await
    }

    /// Membership test against the live process table, no name resolution.
    pub(crate) async fn process_running(&self, name: &str) -> Result<bool, AutomationError> {
        let out = self
            .engine()
            .execute(&format!(
                "tell application \"System Events\" to return (name of processes) contains \"{}\"",
                sanitize(name)
            ))
            .await?;
        Ok(out.trim() == "true")
    }

    /// Names of running GUI applications. Background-only processes are
    /// excluded.
    pub async fn list_running_apps(&self) -> Result<Vec<String>, AutomationError> {
        let out = self
            .engine()
            .execute(
                "tell application \"System Events\" to return name of every process whose background only is false",
            )
            .await?;
        Ok(out
            .split(", ")
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect())
    }

    /// Bundle id, filesystem path and running state for an application.
    #[instrument(skip(self))]
    pub async fn app_info(&self, name: &str) -> Result<AppInfo, AutomationError> {
        let resolved = self.resolve_app_name(name).await;
        let running = self.process_running(&resolved).await?;

        let bundle_id = self.engine().execute(&app_id_script(&resolved)).await?;
        let bundle_id = bundle_id.trim().to_string();

        let path = self
            .engine()
            .execute(&format!(
                "tell application \"Finder\" to return POSIX path of (application file id \"{}\" as alias)",
                sanitize(&bundle_id)
            ))
            .await?;

        Ok(AppInfo {
            name: name.to_string(),
            bundle_id,
            path: path.trim().to_string(),
            running,
        })
    }
}

/// Ask the Spotlight content index for an application bundle whose display
/// name matches, and return the bundle's file stem
/// (`/Applications/Safari.app` yields `Safari`).
///
/// A missing `mdfind` binary or a failed query degrades to "no match";
/// resolution is best-effort by design.
async fn spotlight_bundle_name(name: &str) -> Option<String> {
    let query = format!(
        "kMDItemDisplayName == '{name}' && kMDItemContentType == 'com.apple.application-bundle'"
    );
    let output = tokio::process::Command::new("mdfind")
        .arg(&query)
        .output()
        .await
        .ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let path = stdout.lines().next()?.trim();
    if !path.ends_with(".app") {
        return None;
    }
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}
