//! Capability surface of the external scene graph.
//!
//! The controller never paints. It asks the backend for the pointer position,
//! reads and writes live node transforms during gestures, binds the transform
//! overlay, and requests repaints.

use crate::canvas::CanvasDocument;
use crate::shapes::{SerializableColor, ShapeId};
use kurbo::{Point, Size, Vec2};
use serde::Serialize;
use std::collections::HashMap;

/// Paint layers the controller can invalidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// The shapes themselves.
    Shapes,
    /// The transform overlay (handles).
    Overlay,
}

/// Live transform of a rendered node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub position: Point,
    /// Scale left on the node by a handle resize.
    pub scale: Vec2,
    /// Unscaled size of the node.
    pub size: Size,
}

/// Everything the host needs to lay an editable text region over a text node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSurface {
    pub id: ShapeId,
    pub position: Point,
    /// Degrees, as the scene graph reports it.
    pub rotation: f64,
    pub font_size: u32,
    pub line_height: f64,
    pub font_family: String,
    pub color: SerializableColor,
    pub width: f64,
    pub height: f64,
    pub text: String,
}

/// Trait for scene-graph backends.
pub trait RenderBackend {
    /// Current pointer position in canvas coordinates, if the stage is mounted.
    fn pointer_position(&self) -> Option<Point>;

    /// Whether a node for this shape exists in the scene graph yet.
    fn has_node(&self, id: ShapeId) -> bool;

    /// Ask for a layer to be repainted on the next frame.
    fn request_repaint(&mut self, layer: Layer);

    /// Read a node's live transform.
    fn node_transform(&self, id: ShapeId) -> Option<NodeTransform>;

    /// Move a node without touching the model (optimistic drag feedback).
    fn set_node_position(&mut self, id: ShapeId, position: Point);

    /// Bake a resize into the model and reset the node's scale to 1.
    fn reset_node_scale(&mut self, id: ShapeId);

    /// Bind the transform overlay to these nodes. Empty detaches it.
    fn set_transformer_nodes(&mut self, ids: &[ShapeId]);

    /// Show or hide a node's normal rendering.
    fn set_node_visible(&mut self, id: ShapeId, visible: bool);

    /// Open an editable text region over a text node.
    fn open_edit_surface(&mut self, surface: &EditSurface);
}

/// A node in the headless scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessNode {
    pub position: Point,
    pub scale: Vec2,
    pub size: Size,
    pub visible: bool,
}

/// In-memory scene graph for tests and non-browser hosts.
///
/// Nodes only appear or follow the model when [`paint`](Self::paint) runs,
/// which mirrors a real scene graph updating on the next frame.
#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    pointer: Option<Point>,
    nodes: HashMap<ShapeId, HeadlessNode>,
    transformer: Vec<ShapeId>,
    repaints: Vec<Layer>,
    edit_surface: Option<EditSurface>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the simulated pointer. `None` simulates an unmounted stage.
    pub fn set_pointer(&mut self, pointer: Option<Point>) {
        self.pointer = pointer;
    }

    /// Rebuild nodes from the model.
    pub fn paint(&mut self, document: &CanvasDocument) {
        self.nodes.retain(|id, _| document.contains(*id));
        for shape in document.shapes() {
            let bounds = shape.bounds();
            let node = self.nodes.entry(shape.id()).or_insert(HeadlessNode {
                position: shape.position(),
                scale: Vec2::new(1.0, 1.0),
                size: bounds.size(),
                visible: true,
            });
            node.position = shape.position();
            node.size = bounds.size();
        }
        self.transformer.retain(|id| document.contains(*id));
        self.repaints.clear();
    }

    pub fn node(&self, id: ShapeId) -> Option<&HeadlessNode> {
        self.nodes.get(&id)
    }

    /// Simulate the user dragging a node.
    pub fn drag_node(&mut self, id: ShapeId, position: Point) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.position = position;
        }
    }

    /// Simulate the user pulling a resize handle.
    pub fn scale_node(&mut self, id: ShapeId, scale: Vec2) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.scale = scale;
        }
    }

    pub fn transformer_nodes(&self) -> &[ShapeId] {
        &self.transformer
    }

    /// Repaints requested since the last paint.
    pub fn pending_repaints(&self) -> &[Layer] {
        &self.repaints
    }

    pub fn edit_surface(&self) -> Option<&EditSurface> {
        self.edit_surface.as_ref()
    }
}

impl RenderBackend for HeadlessBackend {
    fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }

    fn has_node(&self, id: ShapeId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn request_repaint(&mut self, layer: Layer) {
        if !self.repaints.contains(&layer) {
            self.repaints.push(layer);
        }
    }

    fn node_transform(&self, id: ShapeId) -> Option<NodeTransform> {
        self.nodes.get(&id).map(|node| NodeTransform {
            position: node.position,
            scale: node.scale,
            size: node.size,
        })
    }

    fn set_node_position(&mut self, id: ShapeId, position: Point) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.position = position;
        }
    }

    fn reset_node_scale(&mut self, id: ShapeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.scale = Vec2::new(1.0, 1.0);
        }
    }

    fn set_transformer_nodes(&mut self, ids: &[ShapeId]) {
        self.transformer = ids.to_vec();
    }

    fn set_node_visible(&mut self, id: ShapeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.visible = visible;
        }
    }

    fn open_edit_surface(&mut self, surface: &EditSurface) {
        self.edit_surface = Some(surface.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::MutationApplier;
    use crate::shapes::{Rectangle, Shape, ShapeTrait};

    fn document_with_rect() -> (MutationApplier, ShapeId) {
        let mut applier = MutationApplier::new();
        let rect = Rectangle::new(Point::new(10.0, 20.0), 30.0, 40.0, SerializableColor::black());
        let id = rect.id();
        applier.add(Shape::Rectangle(rect));
        (applier, id)
    }

    #[test]
    fn test_nodes_appear_on_paint() {
        let (applier, id) = document_with_rect();
        let mut backend = HeadlessBackend::new();
        assert!(!backend.has_node(id));

        backend.paint(applier.document());
        let transform = backend.node_transform(id).unwrap();
        assert_eq!(transform.position, Point::new(10.0, 20.0));
        assert_eq!(transform.size, Size::new(30.0, 40.0));
        assert_eq!(transform.scale, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_paint_drops_deleted_nodes() {
        let (mut applier, id) = document_with_rect();
        let mut backend = HeadlessBackend::new();
        backend.paint(applier.document());
        backend.set_transformer_nodes(&[id]);

        applier.delete(id);
        backend.paint(applier.document());
        assert!(!backend.has_node(id));
        assert!(backend.transformer_nodes().is_empty());
    }

    #[test]
    fn test_repaint_requests_dedup() {
        let mut backend = HeadlessBackend::new();
        backend.request_repaint(Layer::Shapes);
        backend.request_repaint(Layer::Shapes);
        backend.request_repaint(Layer::Overlay);
        assert_eq!(backend.pending_repaints(), &[Layer::Shapes, Layer::Overlay]);

        backend.paint(&CanvasDocument::new());
        assert!(backend.pending_repaints().is_empty());
    }

    #[test]
    fn test_scale_reset() {
        let (applier, id) = document_with_rect();
        let mut backend = HeadlessBackend::new();
        backend.paint(applier.document());
        backend.scale_node(id, Vec2::new(2.0, 3.0));
        backend.reset_node_scale(id);
        assert_eq!(backend.node(id).unwrap().scale, Vec2::new(1.0, 1.0));
    }
}
