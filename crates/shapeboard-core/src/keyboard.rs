//! Keyboard commands acting on the current selection.

use crate::input::{Key, KeyEvent, KeyTarget};
use kurbo::Vec2;

/// What a key press does to the first selected shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    /// Remove the shape and clear the selection.
    Delete,
    /// Move the shape by a fixed offset.
    Nudge(Vec2),
}

impl KeyCommand {
    /// Map a key to a command. `step` is the nudge distance.
    pub fn for_key(key: &Key, step: f64) -> Option<Self> {
        match key {
            Key::Delete | Key::Backspace => Some(KeyCommand::Delete),
            Key::ArrowUp => Some(KeyCommand::Nudge(Vec2::new(0.0, -step))),
            Key::ArrowDown => Some(KeyCommand::Nudge(Vec2::new(0.0, step))),
            Key::ArrowLeft => Some(KeyCommand::Nudge(Vec2::new(-step, 0.0))),
            Key::ArrowRight => Some(KeyCommand::Nudge(Vec2::new(step, 0.0))),
            Key::Other(_) => None,
        }
    }
}

/// Keys reach the canvas only while it has focus and the user isn't typing
/// into a text field.
pub fn accepts(canvas_focused: bool, event: &KeyEvent) -> bool {
    canvas_focused && event.target != KeyTarget::TextInput
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_directions() {
        assert_eq!(
            KeyCommand::for_key(&Key::ArrowUp, 1.0),
            Some(KeyCommand::Nudge(Vec2::new(0.0, -1.0)))
        );
        assert_eq!(
            KeyCommand::for_key(&Key::ArrowLeft, 2.0),
            Some(KeyCommand::Nudge(Vec2::new(-2.0, 0.0)))
        );
        assert_eq!(
            KeyCommand::for_key(&Key::ArrowDown, 1.0),
            Some(KeyCommand::Nudge(Vec2::new(0.0, 1.0)))
        );
    }

    #[test]
    fn test_delete_keys() {
        assert_eq!(KeyCommand::for_key(&Key::Delete, 1.0), Some(KeyCommand::Delete));
        assert_eq!(KeyCommand::for_key(&Key::Backspace, 1.0), Some(KeyCommand::Delete));
        assert_eq!(KeyCommand::for_key(&Key::Other("x".into()), 1.0), None);
    }

    #[test]
    fn test_focus_guard() {
        let key = KeyEvent::new(Key::Delete);
        assert!(accepts(true, &key));
        assert!(!accepts(false, &key));
        assert!(!accepts(true, &KeyEvent::in_text_input(Key::Delete)));
    }
}
