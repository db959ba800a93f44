//! Canvas document: the ordered shape list.

use crate::shapes::{Shape, ShapeId, ShapeKind, ShapePatch};
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// All shapes on the canvas, keyed by ID, plus their paint order.
///
/// Writes are crate-private; everything outside the crate goes through
/// [`MutationApplier`](crate::mutation::MutationApplier).
#[derive(Debug, Clone, Default)]
pub struct CanvasDocument {
    /// All shapes in the document, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Paint order (back to front). Append order.
    z_order: Vec<ShapeId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape. Returns false if a shape with the same ID already exists.
    pub(crate) fn add(&mut self, shape: Shape) -> bool {
        let id = shape.id();
        if self.shapes.contains_key(&id) {
            log::warn!("Rejected shape with duplicate id {}", id);
            return false;
        }
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        true
    }

    /// Remove a shape from the document.
    pub(crate) fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    /// Apply a partial update. Unknown IDs are ignored and return false.
    pub(crate) fn update(&mut self, id: ShapeId, patch: &ShapePatch) -> bool {
        match self.shapes.get_mut(&id) {
            Some(shape) => {
                shape.apply(patch);
                true
            }
            None => {
                log::trace!("Ignored update for missing shape {}", id);
                false
            }
        }
    }

    /// Get a shape by ID.
    pub fn find(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Get shapes in paint order (back to front).
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Shape IDs in paint order.
    pub fn ids(&self) -> &[ShapeId] {
        &self.z_order
    }

    /// Number of shapes of the given kind.
    pub fn count_of(&self, kind: ShapeKind) -> usize {
        self.shapes.values().filter(|s| s.kind() == kind).count()
    }

    /// Topmost shape under a point.
    pub fn shape_at_point(&self, point: Point) -> Option<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .copied()
            .find(|id| self.shapes.get(id).is_some_and(|s| s.hit_test(point)))
    }

    /// Union of the bounds of the given shapes. Missing IDs are skipped.
    pub fn bounds_of(&self, ids: &[ShapeId]) -> Option<Rect> {
        ids.iter()
            .filter_map(|id| self.shapes.get(id))
            .map(Shape::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}
