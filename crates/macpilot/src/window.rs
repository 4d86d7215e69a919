//! Window geometry and focus through System Events.
//!
//! Window indices are 1-based and racy against the user: they hold only
//! for the duration of one listing call.

use tracing::{debug, instrument};

use crate::decode::{parse_bounds, parse_window_record};
use crate::errors::AutomationError;
use crate::osascript::sanitize;
use crate::types::{WindowBounds, WindowInfo};
use crate::Automation;

impl Automation {
    /// Bounds of the Nth window of a process.
    #[instrument(skip(self))]
    pub async fn window_bounds(
        &self,
        app: &str,
        index: usize,
    ) -> Result<WindowBounds, AutomationError> {
        let script = format!(
            r#"tell application "System Events" to tell process "{app}"
  set w to window {index}
  set {{x, y}} to position of w
  set {{width, height}} to size of w
  return (x as text) & "," & (y as text) & "," & (width as text) & "," & (height as text)
end tell"#,
            app = sanitize(app),
        );
        let out = self.engine().execute(&script).await?;
        Ok(parse_bounds(&out))
    }

    /// Move and/or resize the Nth window of a process. Passing `None`
    /// for both position and size is a no-op.
    #[instrument(skip(self))]
    pub async fn set_window_bounds(
        &self,
        app: &str,
        position: Option<(i32, i32)>,
        size: Option<(i32, i32)>,
        index: usize,
    ) -> Result<(), AutomationError> {
        let mut body = Vec::new();
        if let Some((x, y)) = position {
            body.push(format!("set position of w to {{{x}, {y}}}"));
        }
        if let Some((width, height)) = size {
            body.push(format!("set size of w to {{{width}, {height}}}"));
        }
        if body.is_empty() {
            return Ok(());
        }

        let script = format!(
            "tell application \"System Events\" to tell process \"{app}\"\n  set w to window {index}\n  {body}\nend tell",
            app = sanitize(app),
            body = body.join("\n  "),
        );
        self.engine().execute(&script).await?;
        Ok(())
    }

    /// Number of windows the process currently has.
    pub(crate) async fn window_count(&self, app: &str) -> Result<usize, AutomationError> {
        let out = self
            .engine()
            .execute(&format!(
                "tell application \"System Events\" to tell process \"{}\" to return count of windows",
                sanitize(app)
            ))
            .await?;
        Ok(out.trim().parse().unwrap_or(0))
    }

    /// Every window of a process, in System Events order.
    ///
    /// System Events has no bulk query for composite per-window records,
    /// so this fetches the count once and then each window one at a time,
    /// in index order.
    #[instrument(skip(self))]
    pub async fn list_windows(&self, app: &str) -> Result<Vec<WindowInfo>, AutomationError> {
        let count = self.window_count(app).await?;
        let safe = sanitize(app);

        let mut windows = Vec::with_capacity(count);
        for index in 1..=count {
            let script = format!(
                r#"tell application "System Events" to tell process "{safe}"
  set w to window {index}
  set wName to name of w
  set {{x, y}} to position of w
  set {{width, height}} to size of w
  set vis to visible of w
  return wName & "|" & x & "," & y & "," & width & "," & height & "|" & vis
end tell"#
            );
            let out = self.engine().execute(&script).await?;
            windows.push(parse_window_record(&out, index));
        }
        debug!(count = windows.len(), "listed windows");
        Ok(windows)
    }

    /// Raise the Nth window of a process and bring the process frontmost.
    #[instrument(skip(self))]
    pub async fn focus_window(&self, app: &str, index: usize) -> Result<(), AutomationError> {
        let script = format!(
            r#"tell application "System Events" to tell process "{app}"
  perform action "AXRaise" of window {index}
  set frontmost to true
end tell"#,
            app = sanitize(app),
        );
        self.engine().execute(&script).await?;
        Ok(())
    }
}
