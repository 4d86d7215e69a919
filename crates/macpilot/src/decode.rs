//! Decoding of the line-oriented text results osascript returns.
//!
//! Scripts emit scalars, delimited tuples, or the `||`-separated element
//! records; everything here is pure and total — malformed input degrades,
//! it never fails.

use tracing::debug;

use crate::types::{UIElement, WindowBounds, WindowInfo};

const FIELD_SEP: &str = "||";

/// Parse an `x,y,width,height` tuple. Missing or non-numeric fields
/// decode to 0.
pub fn parse_bounds(line: &str) -> WindowBounds {
    let mut fields = line
        .split(',')
        .map(|field| field.trim().parse::<i32>().unwrap_or(0));
    WindowBounds {
        x: fields.next().unwrap_or(0),
        y: fields.next().unwrap_or(0),
        width: fields.next().unwrap_or(0),
        height: fields.next().unwrap_or(0),
    }
}

/// Parse one `name|x,y,width,height|visible` window record. A window
/// without a readable name is labeled by its index.
pub fn parse_window_record(line: &str, index: usize) -> WindowInfo {
    let mut fields = line.splitn(3, '|');
    let name = fields.next().unwrap_or("").to_string();
    let bounds = parse_bounds(fields.next().unwrap_or(""));
    let visible = fields.next().map(|v| v.trim() == "true").unwrap_or(false);
    WindowInfo {
        name: if name.is_empty() {
            format!("Window {index}")
        } else {
            name
        },
        index,
        bounds,
        visible,
    }
}

/// Decode the newline-delimited element listing.
///
/// Flat mode (`depth_aware == false`): every record is
/// `role||name||description` and becomes one top-level element with no
/// children.
///
/// Depth-aware mode: records are `depth||role||name||description` with
/// depth 0 or 1. A depth-0 record opens a new top-level element and
/// becomes the current parent; later records attach to it as children.
/// The producing script descends exactly one level, so two levels is the
/// ceiling of this format — a contract, not an accident.
///
/// Traversal order is preserved. Fields the engine could not read stay as
/// empty strings. Malformed records — an unparseable depth tag, or a
/// child record with no preceding parent — are dropped silently.
pub fn decode_elements(raw: &str, depth_aware: bool) -> Vec<UIElement> {
    let mut elements: Vec<UIElement> = Vec::new();

    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split(FIELD_SEP);

        if !depth_aware {
            elements.push(UIElement {
                role: fields.next().unwrap_or("").to_string(),
                name: fields.next().unwrap_or("").to_string(),
                description: fields.next().unwrap_or("").to_string(),
                children: None,
            });
            continue;
        }

        let depth = match fields.next().map(|d| d.trim().parse::<u8>()) {
            Some(Ok(depth)) => depth,
            _ => {
                debug!(line, "skipping record with unparseable depth tag");
                continue;
            }
        };
        let element = UIElement {
            role: fields.next().unwrap_or("").to_string(),
            name: fields.next().unwrap_or("").to_string(),
            description: fields.next().unwrap_or("").to_string(),
            children: None,
        };

        if depth == 0 {
            elements.push(UIElement {
                children: Some(Vec::new()),
                ..element
            });
        } else {
            match elements.last_mut().and_then(|parent| parent.children.as_mut()) {
                Some(children) => children.push(element),
                None => debug!(line, "dropping child record with no parent"),
            }
        }
    }

    elements
}
