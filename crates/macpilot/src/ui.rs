//! UI interaction through System Events: buttons, menus, text fields,
//! keystrokes, readiness, and the element tree.

use std::time::Duration;

use tracing::{debug, instrument};

use crate::decode::decode_elements;
use crate::errors::AutomationError;
use crate::osascript::sanitize;
use crate::types::UIElement;
use crate::Automation;

/// Polls before the readiness wait gives up.
const READY_ATTEMPTS: u32 = 20;
/// Pause between readiness polls.
const READY_POLL: Duration = Duration::from_millis(300);

/// Canonical AppleScript keyword for a keystroke modifier.
fn modifier_keyword(modifier: &str) -> Option<&'static str> {
    match modifier.trim().to_ascii_lowercase().as_str() {
        "command" | "cmd" => Some("command"),
        "control" | "ctrl" => Some("control"),
        "option" | "alt" => Some("option"),
        "shift" => Some("shift"),
        _ => None,
    }
}

impl Automation {
    /// Click a named button in a window of a process.
    #[instrument(skip(self))]
    pub async fn click_button(
        &self,
        app: &str,
        button: &str,
        window: usize,
    ) -> Result<(), AutomationError> {
        let script = format!(
            r#"tell application "System Events" to tell process "{app}"
  click button "{button}" of window {window}
end tell"#,
            app = sanitize(app),
            button = sanitize(button),
        );
        self.engine().execute(&script).await?;
        Ok(())
    }

    /// Click a menu bar item. The app is activated first and given a
    /// moment to come frontmost before the click lands.
    #[instrument(skip(self))]
    pub async fn click_menu_item(
        &self,
        app: &str,
        menu: &str,
        item: &str,
    ) -> Result<(), AutomationError> {
        let safe = sanitize(app);
        let script = format!(
            r#"tell application "{safe}" to activate
delay 0.3
tell application "System Events" to tell process "{safe}"
  click menu item "{item}" of menu "{menu}" of menu bar 1
end tell"#,
            item = sanitize(item),
            menu = sanitize(menu),
        );
        self.engine().execute(&script).await?;
        Ok(())
    }

    /// Focus the Nth text field of a window and set its value.
    #[instrument(skip(self, text))]
    pub async fn type_in_field(
        &self,
        app: &str,
        field: usize,
        text: &str,
        window: usize,
    ) -> Result<(), AutomationError> {
        let script = format!(
            r#"tell application "System Events" to tell process "{app}"
  set focused of text field {field} of window {window} to true
  set value of text field {field} of window {window} to "{text}"
end tell"#,
            app = sanitize(app),
            text = sanitize(text),
        );
        self.engine().execute(&script).await?;
        Ok(())
    }

    /// Send a keystroke through System Events, optionally held under
    /// modifiers (`command`, `control`, `option`, `shift`).
    ///
    /// Modifier names land outside the quoted literal the sanitizer
    /// protects, so unknown names are rejected instead of interpolated.
    #[instrument(skip(self))]
    pub async fn keystroke(&self, key: &str, modifiers: &[String]) -> Result<(), AutomationError> {
        let mut keywords = Vec::with_capacity(modifiers.len());
        for modifier in modifiers {
            let keyword = modifier_keyword(modifier).ok_or_else(|| {
                AutomationError::InvalidArgument(format!("unknown modifier: {modifier}"))
            })?;
            keywords.push(format!("{keyword} down"));
        }
        let using = if keywords.is_empty() {
            String::new()
        } else {
            format!(" using {{{}}}", keywords.join(", "))
        };
        let script = format!(
            "tell application \"System Events\" to keystroke \"{key}\"{using}",
            key = sanitize(key),
        );
        self.engine().execute(&script).await?;
        Ok(())
    }

    /// Wait until a process has at least one window, activating the app
    /// as needed to get one.
    ///
    /// Polls a bounded number of times with a fixed delay; an app that
    /// is running but windowless gets re-activated each round. In-flight
    /// subprocesses are never killed — the bound is on retries only.
    #[instrument(skip(self))]
    pub async fn wait_until_ready(&self, app: &str) -> Result<(), AutomationError> {
        let safe = sanitize(app);
        if !self.process_running(app).await? {
            self.activate(&safe).await?;
        }
        for attempt in 0..READY_ATTEMPTS {
            if self.process_running(app).await? {
                if self.window_count(app).await? > 0 {
                    debug!(attempt, "window present");
                    return Ok(());
                }
                // Running but windowless; activating opens one.
                self.activate(&safe).await?;
            }
            tokio::time::sleep(READY_POLL).await;
        }
        Err(AutomationError::Timeout(format!(
            "timed out waiting for {app} to be ready"
        )))
    }

    async fn activate(&self, sanitized_app: &str) -> Result<(), AutomationError> {
        self.engine()
            .execute(&format!("tell application \"{sanitized_app}\" to activate"))
            .await?;
        Ok(())
    }

    /// The element tree of a window: a flat top-level listing for
    /// `max_depth <= 1`, otherwise two levels.
    ///
    /// The wire format cannot carry deeper nesting, so any depth past 2
    /// behaves as 2.
    #[instrument(skip(self))]
    pub async fn ui_elements(
        &self,
        app: &str,
        window: usize,
        max_depth: usize,
    ) -> Result<Vec<UIElement>, AutomationError> {
        let depth_aware = max_depth > 1;
        let script = if depth_aware {
            tree_script(app, window)
        } else {
            flat_script(app, window)
        };
        let out = self.engine().execute(&script).await?;
        Ok(decode_elements(&out, depth_aware))
    }
}

fn flat_script(app: &str, window: usize) -> String {
    format!(
        r#"tell application "System Events" to tell process "{app}"
  set output to ""
  set elems to UI elements of window {window}
  repeat with e in elems
    set r to role of e
    set n to ""
    try
      set n to name of e
    end try
    set d to ""
    try
      set d to description of e
    end try
    set output to output & r & "||" & n & "||" & d & "\n"
  end repeat
  return output
end tell"#,
        app = sanitize(app),
    )
}

fn tree_script(app: &str, window: usize) -> String {
    format!(
        r#"tell application "System Events" to tell process "{app}"
  set output to ""
  set elems to UI elements of window {window}
  repeat with e in elems
    set r to role of e
    set n to ""
    try
      set n to name of e
    end try
    set d to ""
    try
      set d to description of e
    end try
    set output to output & "0||" & r & "||" & n & "||" & d & "\n"
    try
      set kids to UI elements of e
      repeat with c in kids
        set cr to role of c
        set cn to ""
        try
          set cn to name of c
        end try
        set cd to ""
        try
          set cd to description of c
        end try
        set output to output & "1||" & cr & "||" & cn & "||" & cd & "\n"
      end repeat
    end try
  end repeat
  return output
end tell"#,
        app = sanitize(app),
    )
}
