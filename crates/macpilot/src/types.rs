//! Value types decoded from System Events output.

use serde::{Deserialize, Serialize};

/// Position and size of a window, in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// One window of a running process.
///
/// `index` is 1-based and only meaningful for the duration of the listing
/// call that produced it; System Events owns the ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    pub name: String,
    pub index: usize,
    pub bounds: WindowBounds,
    pub visible: bool,
}

/// Identity of an application bundle as known to the OS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    /// The name as supplied by the caller, possibly localized.
    pub name: String,
    pub bundle_id: String,
    pub path: String,
    pub running: bool,
}

/// A node of the accessibility element tree.
///
/// Fields System Events could not read are empty strings, never absent.
/// `children` is populated only for top-level elements of a depth-aware
/// query; the wire format carries at most two levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UIElement {
    pub role: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<UIElement>>,
}
