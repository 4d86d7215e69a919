use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomationError {
    /// osascript exited non-zero. Carries the engine's own diagnostics
    /// unmodified; most causes (app not found, element not found,
    /// permission denied) are permanent, so nothing retries on this.
    #[error("osascript failed ({exit_code}): {stderr}")]
    ScriptFailed { exit_code: i32, stderr: String },

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Platform-specific error: {0}")]
    PlatformError(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
