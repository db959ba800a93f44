//! Inline text editing: which text shape is hidden behind the edit surface.

use crate::config::InteractionConfig;
use crate::render::EditSurface;
use crate::shapes::{ShapeId, Text};

/// Outcome of a request to start editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginEdit {
    /// Editing started for a shape that was displayed.
    Started,
    /// The shape was already being edited.
    AlreadyEditing,
}

/// Tracks the single text shape under edit.
#[derive(Debug, Clone, Default)]
pub struct TextEditor {
    editing: Option<ShapeId>,
}

impl TextEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shape being edited, if any.
    pub fn editing(&self) -> Option<ShapeId> {
        self.editing
    }

    pub fn is_editing(&self, id: ShapeId) -> bool {
        self.editing == Some(id)
    }

    /// Start editing `id`. A previous edit must be finished first.
    pub fn begin(&mut self, id: ShapeId) -> BeginEdit {
        if self.editing.replace(id) == Some(id) {
            BeginEdit::AlreadyEditing
        } else {
            BeginEdit::Started
        }
    }

    /// Stop editing `id`. Returns false if it wasn't being edited.
    pub fn finish(&mut self, id: ShapeId) -> bool {
        if self.editing != Some(id) {
            return false;
        }
        self.editing = None;
        true
    }

    /// Drop a deleted shape.
    pub fn forget(&mut self, id: ShapeId) {
        if self.editing == Some(id) {
            self.editing = None;
        }
    }
}

/// Describe the edit surface for a text shape.
pub fn edit_surface(text: &Text, config: &InteractionConfig) -> EditSurface {
    EditSurface {
        id: text.id,
        position: text.position,
        rotation: 0.0,
        font_size: text.font_size,
        line_height: config.line_height,
        font_family: config.font_family.clone(),
        color: text.fill,
        width: text.layout_width(),
        height: text.layout_height(),
        text: text.content.clone(),
    }
}
