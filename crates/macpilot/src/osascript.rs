//! AppleScript execution through the `osascript` subprocess.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AutomationError;

/// Captured output of one `osascript` invocation. Both streams are
/// trimmed of trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Escape a string for interpolation into a double-quoted AppleScript
/// string literal.
///
/// Backslashes are escaped before quotes, and nothing else is touched;
/// this is minimal literal escaping, not grammar-aware quoting. Apply it
/// to every externally supplied string at the interpolation slot itself,
/// never to an already-composed fragment.
pub fn sanitize(input: &str) -> String {
    input.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Executes AppleScript source and reports its outcome.
///
/// One call is one subprocess; there is no session reuse or pooling.
#[async_trait]
pub trait ScriptEngine: Send + Sync {
    /// Run a script. Script-level failure is reported through
    /// [`ScriptResult::exit_code`]; the only error here is failing to
    /// spawn or collect the subprocess.
    async fn run(&self, script: &str) -> Result<ScriptResult, AutomationError>;

    /// Run a script and return its stdout, failing with
    /// [`AutomationError::ScriptFailed`] on non-zero exit.
    async fn execute(&self, script: &str) -> Result<String, AutomationError> {
        let result = self.run(script).await?;
        if result.exit_code != 0 {
            return Err(AutomationError::ScriptFailed {
                exit_code: result.exit_code,
                stderr: result.stderr,
            });
        }
        Ok(result.stdout)
    }
}

/// The real engine: spawns `osascript -e <script>` once per call.
#[derive(Debug, Default)]
pub struct Osascript;

#[async_trait]
impl ScriptEngine for Osascript {
    async fn run(&self, script: &str) -> Result<ScriptResult, AutomationError> {
        debug!(bytes = script.len(), "running osascript");
        // output() drains stdout and stderr concurrently; element tree
        // queries can emit thousands of lines and would deadlock a
        // sequential read once the pipe buffer fills.
        let output = tokio::process::Command::new("osascript")
            .arg("-e")
            .arg(script)
            .output()
            .await?;
        Ok(ScriptResult {
            stdout: String::from_utf8_lossy(&output.stdout)
                .trim_end()
                .to_string(),
            stderr: String::from_utf8_lossy(&output.stderr)
                .trim_end()
                .to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fake_engine::{failed, ok, FakeEngine};

    #[test]
    fn escapes_quotes() {
        assert_eq!(sanitize(r#"say "hi""#), r#"say \"hi\""#);
    }

    #[test]
    fn escapes_backslashes_before_quotes() {
        // A pre-escaped quote must not collapse back into a bare quote.
        assert_eq!(sanitize(r#"\""#), r#"\\\""#);
    }

    #[test]
    fn leaves_everything_else_alone() {
        assert_eq!(sanitize("계산기 & Café {x}"), "계산기 & Café {x}");
    }

    #[test]
    fn output_has_no_unescaped_specials() {
        let input = r#"a"b\c"d\\"#;
        let escaped = sanitize(input);
        let mut chars = escaped.chars();
        while let Some(c) = chars.next() {
            assert_ne!(c, '"', "unescaped quote in {escaped:?}");
            if c == '\\' {
                let next = chars.next().expect("trailing lone backslash");
                assert!(next == '\\' || next == '"');
            }
        }
    }

    #[test]
    fn unescaping_round_trips() {
        let input = r#"he said "1\2" twice"#;
        let mut restored = String::new();
        let sanitized = sanitize(input);
        let mut chars = sanitized.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                restored.push(chars.next().unwrap());
            } else {
                restored.push(c);
            }
        }
        assert_eq!(restored, input);
    }

    #[tokio::test]
    async fn execute_returns_stdout_on_success() {
        let engine = FakeEngine::new(vec![ok("42")]);
        assert_eq!(engine.execute("return 42").await.unwrap(), "42");
    }

    #[tokio::test]
    async fn execute_surfaces_exit_code_and_stderr_verbatim() {
        let engine = FakeEngine::new(vec![failed(1, "execution error: App isn't running. (-600)")]);
        match engine.execute("tell application \"Nope\" to quit").await {
            Err(AutomationError::ScriptFailed { exit_code, stderr }) => {
                assert_eq!(exit_code, 1);
                assert_eq!(stderr, "execution error: App isn't running. (-600)");
            }
            other => panic!("expected ScriptFailed, got {other:?}"),
        }
    }
}
