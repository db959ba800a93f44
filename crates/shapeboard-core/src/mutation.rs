//! The single write path into the shape list.

use crate::canvas::CanvasDocument;
use crate::shapes::{SerializableColor, Shape, ShapeId, ShapeKind, ShapePatch};
use kurbo::{Point, Vec2};

/// Geometry change for rectangles and circles. Unset fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius: Option<f64>,
}

/// Geometry carried along with a text commit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextGeometry {
    pub width: Option<f64>,
    pub font_size: Option<u32>,
}

/// Owns the [`CanvasDocument`] and applies every change to it.
///
/// Each applied write marks the shape layer dirty; the controller turns that
/// into a single repaint request per event.
#[derive(Debug, Clone, Default)]
pub struct MutationApplier {
    document: CanvasDocument,
    dirty: bool,
}

impl MutationApplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &CanvasDocument {
        &self.document
    }

    /// Insert a newly created shape.
    pub fn add(&mut self, shape: Shape) -> bool {
        let id = shape.id();
        let kind = shape.kind();
        let added = self.document.add(shape);
        if added {
            log::info!("Created {:?} {}", kind, id);
            self.dirty = true;
        }
        added
    }

    pub fn update_position(&mut self, id: ShapeId, position: Point) -> bool {
        self.commit(id, ShapePatch::position(position))
    }

    /// Move a shape by a delta relative to its model position.
    pub fn translate(&mut self, id: ShapeId, delta: Vec2) -> bool {
        match self.document.find(id).map(Shape::position) {
            Some(position) => self.update_position(id, position + delta),
            None => false,
        }
    }

    pub fn update_geometry(&mut self, id: ShapeId, geometry: Geometry) -> bool {
        self.commit(
            id,
            ShapePatch {
                width: geometry.width,
                height: geometry.height,
                radius: geometry.radius,
                ..ShapePatch::default()
            },
        )
    }

    pub fn update_fill(&mut self, id: ShapeId, color: SerializableColor) -> bool {
        self.commit(id, ShapePatch::fill(color))
    }

    /// Change the font size of a text shape. Other shapes are left alone.
    pub fn update_font_size(&mut self, id: ShapeId, size: u32) -> bool {
        if !self.is_text(id) {
            return false;
        }
        self.commit(id, ShapePatch::font_size(size))
    }

    /// Replace a text shape's content, together with any geometry from a resize.
    pub fn update_text(&mut self, id: ShapeId, text: String, geometry: TextGeometry) -> bool {
        if !self.is_text(id) {
            return false;
        }
        self.commit(
            id,
            ShapePatch {
                text: Some(text),
                width: geometry.width,
                font_size: geometry.font_size,
                ..ShapePatch::default()
            },
        )
    }

    /// Remove a shape.
    pub fn delete(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.document.remove(id);
        if removed.is_some() {
            log::info!("Deleted shape {}", id);
            self.dirty = true;
        }
        removed
    }

    /// Return and reset the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn is_text(&self, id: ShapeId) -> bool {
        self.document
            .find(id)
            .is_some_and(|shape| shape.kind() == ShapeKind::Text)
    }

    fn commit(&mut self, id: ShapeId, patch: ShapePatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let applied = self.document.update(id, &patch);
        if applied {
            log::trace!("Committed {:?} to {}", patch, id);
            self.dirty = true;
        }
        applied
    }
}
