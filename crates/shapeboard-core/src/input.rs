//! Input event types shared by the controller and the platform shells.

use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
}

/// Keys the canvas reacts to. Everything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(name: &str) -> Self {
        match name {
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => Key::Other(other.to_string()),
        }
    }
}

/// Where keyboard focus was when a key went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyTarget {
    /// The canvas or the page itself.
    #[default]
    Canvas,
    /// An `input`, `textarea` or content-editable element.
    TextInput,
}

impl KeyTarget {
    /// Classify the focused element by tag name.
    pub fn from_element(tag_name: &str, content_editable: bool) -> Self {
        let tag = tag_name.to_ascii_lowercase();
        if content_editable || tag == "input" || tag == "textarea" {
            KeyTarget::TextInput
        } else {
            KeyTarget::Canvas
        }
    }
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub target: KeyTarget,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            target: KeyTarget::Canvas,
        }
    }

    pub fn in_text_input(key: Key) -> Self {
        Self {
            key,
            target: KeyTarget::TextInput,
        }
    }
}

/// Whether an event was handled by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Handled; the caller should stop propagation.
    Consumed,
    /// Not handled; default handling may continue.
    Ignored,
}

impl EventResponse {
    pub fn is_consumed(self) -> bool {
        self == EventResponse::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_key_names() {
        assert_eq!(Key::from_dom("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom("Backspace"), Key::Backspace);
        assert_eq!(Key::from_dom("a"), Key::Other("a".to_string()));
    }

    #[test]
    fn test_text_input_targets() {
        assert_eq!(KeyTarget::from_element("INPUT", false), KeyTarget::TextInput);
        assert_eq!(KeyTarget::from_element("textarea", false), KeyTarget::TextInput);
        assert_eq!(KeyTarget::from_element("div", true), KeyTarget::TextInput);
        assert_eq!(KeyTarget::from_element("canvas", false), KeyTarget::Canvas);
    }
}
