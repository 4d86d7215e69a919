//! Accessibility permission probing.

use crate::Automation;

impl Automation {
    /// Whether this process may drive System Events.
    ///
    /// macOS gates UI scripting behind the Accessibility permission; a
    /// trivial query failing is how denial shows up, so the probe is a
    /// boolean and carries no error of its own.
    pub async fn check_accessibility(&self) -> bool {
        match self
            .engine()
            .run("tell application \"System Events\" to return name of first process")
            .await
        {
            Ok(result) => result.exit_code == 0,
            Err(_) => false,
        }
    }
}
