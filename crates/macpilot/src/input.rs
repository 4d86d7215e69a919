//! Native input synthesis, bypassing the scripting engine.
//!
//! These act on whatever currently has system input focus, not on a named
//! app. macOS only; other targets get a stub.

use crate::errors::AutomationError;
use crate::Automation;

#[cfg(target_os = "macos")]
mod imp {
    use std::time::Duration;

    use enigo::{Button, Coordinate, Direction, Enigo, Keyboard, Mouse, Settings};

    use crate::errors::AutomationError;

    fn controller() -> Result<Enigo, AutomationError> {
        Enigo::new(&Settings::default())
            .map_err(|e| AutomationError::PlatformError(format!("input controller: {e:?}")))
    }

    pub fn type_text(text: &str) -> Result<(), AutomationError> {
        let mut enigo = controller()?;
        enigo
            .text(text)
            .map_err(|e| AutomationError::PlatformError(format!("type text: {e:?}")))
    }

    pub fn mouse_click(x: i32, y: i32) -> Result<(), AutomationError> {
        let mut enigo = controller()?;
        enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| AutomationError::PlatformError(format!("move mouse: {e:?}")))?;
        // Let the cursor land before the click registers.
        std::thread::sleep(Duration::from_millis(50));
        enigo
            .button(Button::Left, Direction::Click)
            .map_err(|e| AutomationError::PlatformError(format!("mouse click: {e:?}")))
    }
}

#[cfg(not(target_os = "macos"))]
mod imp {
    use crate::errors::AutomationError;

    pub fn type_text(_text: &str) -> Result<(), AutomationError> {
        Err(AutomationError::UnsupportedPlatform(
            "native input synthesis requires macOS".to_string(),
        ))
    }

    pub fn mouse_click(_x: i32, _y: i32) -> Result<(), AutomationError> {
        Err(AutomationError::UnsupportedPlatform(
            "native input synthesis requires macOS".to_string(),
        ))
    }
}

impl Automation {
    /// Type literal text into whatever has input focus.
    pub fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        imp::type_text(text)
    }

    /// Single left click at absolute screen coordinates.
    pub fn mouse_click(&self, x: i32, y: i32) -> Result<(), AutomationError> {
        imp::mouse_click(x, y)
    }
}
