//! Desktop application automation for macOS through AppleScript.
//!
//! Every operation composes an AppleScript program from typed, sanitized
//! fragments, runs it through a [`ScriptEngine`] (one `osascript`
//! subprocess per call), and decodes the line-oriented text System Events
//! hands back into typed values.

use std::sync::Arc;

mod app;
pub mod decode;
pub mod errors;
mod input;
pub mod osascript;
mod permissions;
#[cfg(test)]
mod tests;
pub mod types;
mod ui;
mod window;

pub use errors::AutomationError;
pub use osascript::{sanitize, Osascript, ScriptEngine, ScriptResult};
pub use types::{AppInfo, UIElement, WindowBounds, WindowInfo};

/// The main entry point for driving applications.
///
/// All scripting goes through the engine the value was built with; the
/// capability methods live in the `app`, `window`, `ui` and `input`
/// modules.
#[derive(Clone)]
pub struct Automation {
    engine: Arc<dyn ScriptEngine>,
}

impl Automation {
    /// Automation backed by the real `osascript` subprocess engine.
    pub fn new() -> Self {
        Self {
            engine: Arc::new(Osascript),
        }
    }

    /// Automation backed by a caller-supplied engine. Tests use this to
    /// script engine responses without touching the OS.
    pub fn with_engine(engine: Arc<dyn ScriptEngine>) -> Self {
        Self { engine }
    }

    pub(crate) fn engine(&self) -> &dyn ScriptEngine {
        self.engine.as_ref()
    }
}

impl Default for Automation {
    fn default() -> Self {
        Self::new()
    }
}
