//! Selection set and the group-drag gesture on the transform overlay.

use crate::canvas::CanvasDocument;
use crate::shapes::ShapeId;
use kurbo::{Point, Rect, Vec2};

/// Ordered set of selected shape IDs.
///
/// Order is insertion order; keyboard commands act on the first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ShapeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[ShapeId] {
        &self.ids
    }

    /// The shape keyboard commands operate on.
    pub fn first(&self) -> Option<ShapeId> {
        self.ids.first().copied()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Replace the selection with a single shape.
    pub fn select(&mut self, id: ShapeId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Flip membership of a shape. Returns true if it is now selected.
    pub fn toggle(&mut self, id: ShapeId) -> bool {
        if let Some(index) = self.ids.iter().position(|&s| s == id) {
            self.ids.remove(index);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Bounding box of the transform overlay for the current selection.
pub fn overlay_bounds(document: &CanvasDocument, selection: &Selection) -> Option<Rect> {
    document.bounds_of(selection.ids())
}

/// Check if a point lies inside the overlay box (edges included).
pub fn hit_test_overlay(bounds: Rect, point: Point) -> bool {
    point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
}

/// State for moving every selected shape at once through the overlay.
#[derive(Debug, Clone)]
pub struct GroupDragState {
    /// Starting point of the drag.
    pub start_point: Point,
    /// Current point of the drag.
    pub current_point: Point,
    /// Model positions when the drag started.
    original_positions: Vec<(ShapeId, Point)>,
}

impl GroupDragState {
    /// Start a group drag over the selected shapes still in the document.
    pub fn new(start_point: Point, document: &CanvasDocument, selection: &Selection) -> Self {
        let original_positions = selection
            .ids()
            .iter()
            .filter_map(|&id| document.find(id).map(|shape| (id, shape.position())))
            .collect();
        Self {
            start_point,
            current_point: start_point,
            original_positions,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }

    /// Whether the pointer has moved since the drag started.
    pub fn has_moved(&self) -> bool {
        self.delta() != Vec2::ZERO
    }

    /// Get the shape IDs being moved.
    pub fn shape_ids(&self) -> Vec<ShapeId> {
        self.original_positions.iter().map(|(id, _)| *id).collect()
    }

    /// Position each shape should have at the current pointer.
    pub fn positions(&self) -> impl Iterator<Item = (ShapeId, Point)> + '_ {
        let delta = self.delta();
        self.original_positions
            .iter()
            .map(move |&(id, origin)| (id, origin + delta))
    }
}
