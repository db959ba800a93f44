//! Interaction controller: routes pointer, keyboard and toolbar events into
//! model mutations and scene-graph updates.

use crate::canvas::CanvasDocument;
use crate::config::{ConfigError, InteractionConfig};
use crate::input::{EventResponse, KeyEvent, Modifiers};
use crate::keyboard::{self, KeyCommand};
use crate::mutation::{Geometry, MutationApplier, TextGeometry};
use crate::render::{HeadlessBackend, Layer, RenderBackend};
use crate::selection::{GroupDragState, Selection, hit_test_overlay, overlay_bounds};
use crate::shapes::{ColorParseError, SerializableColor, Shape, ShapeId, ShapeKind};
use crate::text_edit::{BeginEdit, TextEditor, edit_surface};
use crate::tools::{ToolKind, ToolManager, ToolbarState};
use kurbo::Point;

/// Owns every piece of interaction state for one canvas.
pub struct InteractionController<R: RenderBackend> {
    config: InteractionConfig,
    /// Tool mode and the in-progress creation.
    tools: ToolManager,
    selection: Selection,
    /// Owns the shape model.
    mutations: MutationApplier,
    text_editor: TextEditor,
    renderer: R,
    /// Keyboard commands only run while the canvas has focus. Starts focused.
    canvas_focused: bool,
    /// Active drag of the whole selection through the overlay.
    group_drag: Option<GroupDragState>,
    /// Swallow the click that ends a gesture.
    suppress_click: bool,
    /// Some selected shapes had no node yet when the overlay was last synced.
    overlay_pending: bool,
}

impl<R: RenderBackend> InteractionController<R> {
    /// Create a controller with a validated configuration.
    pub fn new(config: InteractionConfig, renderer: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, renderer))
    }

    /// Create a controller with the default configuration.
    pub fn with_defaults(renderer: R) -> Self {
        Self::build(InteractionConfig::default(), renderer)
    }

    fn build(config: InteractionConfig, renderer: R) -> Self {
        Self {
            tools: ToolManager::new(&config),
            config,
            selection: Selection::new(),
            mutations: MutationApplier::new(),
            text_editor: TextEditor::new(),
            renderer,
            canvas_focused: true,
            group_drag: None,
            suppress_click: false,
            overlay_pending: false,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn document(&self) -> &CanvasDocument {
        self.mutations.document()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool()
    }

    pub fn toolbar(&self) -> ToolbarState {
        self.tools.toolbar
    }

    /// The text shape being edited, if any.
    pub fn editing(&self) -> Option<ShapeId> {
        self.text_editor.editing()
    }

    /// Whether existing shapes may be dragged.
    pub fn is_draggable(&self) -> bool {
        self.tools.is_draggable()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    // --- Pointer -----------------------------------------------------------

    /// Pointer went down on the canvas.
    ///
    /// In select mode a press inside the overlay starts a group drag. With a
    /// drawing tool it creates a shape at the pointer. `Consumed` tells the
    /// host not to start its own drag for this press.
    pub fn pointer_down(&mut self, modifiers: Modifiers) -> EventResponse {
        self.suppress_click = false;
        let Some(point) = self.renderer.pointer_position() else {
            log::debug!("Pointer down without a pointer position");
            return EventResponse::Ignored;
        };

        if self.tools.is_draggable() {
            if modifiers.shift || self.text_editor.editing().is_some() {
                return EventResponse::Ignored;
            }
            let over_overlay = overlay_bounds(self.mutations.document(), &self.selection)
                .is_some_and(|bounds| hit_test_overlay(bounds, point));
            if !over_overlay {
                return EventResponse::Ignored;
            }
            let drag = GroupDragState::new(point, self.mutations.document(), &self.selection);
            log::debug!("Group drag of {} shapes from {:?}", drag.shape_ids().len(), point);
            self.group_drag = Some(drag);
            return EventResponse::Consumed;
        }

        let text_count = self.mutations.document().count_of(ShapeKind::Text);
        let Some(shape) = self.tools.begin(point, text_count, &self.config) else {
            return EventResponse::Ignored;
        };
        let id = shape.id();
        if !self.mutations.add(shape) {
            return EventResponse::Ignored;
        }
        self.selection.select(id);
        self.flush();
        EventResponse::Consumed
    }

    /// Pointer moved. Only acts while a creation or a group drag is active.
    pub fn pointer_move(&mut self) {
        let Some(point) = self.renderer.pointer_position() else {
            return;
        };

        if let Some(drag) = self.group_drag.as_mut() {
            drag.current_point = point;
            for (id, position) in drag.positions() {
                self.renderer.set_node_position(id, position);
            }
            self.renderer.request_repaint(Layer::Shapes);
            self.renderer.request_repaint(Layer::Overlay);
            return;
        }

        let Some(id) = self.tools.in_progress() else {
            return;
        };
        let Some(patch) = self
            .mutations
            .document()
            .find(id)
            .and_then(|shape| self.tools.drag_patch(shape, point, self.config.min_size))
        else {
            return;
        };
        log::trace!("Sizing {} to {:?}", id, point);
        self.mutations.update_geometry(
            id,
            Geometry {
                width: patch.width,
                height: patch.height,
                radius: patch.radius,
            },
        );
        self.flush();
    }

    /// Pointer released. Ends any gesture and returns to select mode.
    pub fn pointer_up(&mut self) {
        if let Some(drag) = self.group_drag.take() {
            if drag.has_moved() {
                for (id, position) in drag.positions() {
                    self.mutations.update_position(id, position);
                }
                log::debug!("Group drag moved {} shapes by {:?}", drag.shape_ids().len(), drag.delta());
                self.suppress_click = true;
            }
        }
        if self.tools.is_active() {
            self.suppress_click = true;
        }
        self.tools.end();
        self.flush();
    }

    /// Click on the canvas.
    ///
    /// Empty canvas clears the selection. In select mode a shape click
    /// replaces the selection, or toggles it with shift held.
    pub fn click(&mut self, point: Point, modifiers: Modifiers) {
        if std::mem::take(&mut self.suppress_click) {
            log::trace!("Click swallowed after gesture");
            return;
        }

        match self.mutations.document().shape_at_point(point) {
            None => {
                if self.selection.is_empty() {
                    return;
                }
                log::debug!("Selection cleared");
                self.selection.clear();
            }
            Some(id) => {
                if !self.tools.is_draggable() {
                    return;
                }
                if modifiers.shift {
                    if self.selection.toggle(id) {
                        self.capture_toolbar(id);
                    }
                } else {
                    self.selection.select(id);
                    self.capture_toolbar(id);
                }
                log::debug!("Selection: {:?}", self.selection.ids());
            }
        }
        self.flush();
    }

    /// Double click: start editing the text shape under the point.
    pub fn double_click(&mut self, point: Point) {
        let Some(id) = self.mutations.document().shape_at_point(point) else {
            return;
        };
        let Some(surface) = self
            .mutations
            .document()
            .find(id)
            .and_then(Shape::as_text)
            .map(|text| edit_surface(text, &self.config))
        else {
            return;
        };

        if let Some(previous) = self.text_editor.editing().filter(|&p| p != id) {
            let current = self
                .mutations
                .document()
                .find(previous)
                .and_then(Shape::as_text)
                .map(|text| text.content.clone());
            match current {
                Some(text) => self.end_edit(previous, text),
                None => self.text_editor.forget(previous),
            }
        }

        if self.text_editor.begin(id) == BeginEdit::AlreadyEditing {
            log::debug!("Already editing {}", id);
            return;
        }
        log::debug!("Editing text {}", id);
        self.renderer.set_node_visible(id, false);
        self.renderer.open_edit_surface(&surface);
        self.flush();
    }

    /// A node dragged by the host came to rest. Commit its final position.
    pub fn drag_end(&mut self, id: ShapeId) {
        let Some(transform) = self.renderer.node_transform(id) else {
            log::debug!("Drag end for unknown node {}", id);
            return;
        };
        if self.mutations.update_position(id, transform.position) {
            log::debug!("Moved {} to {:?}", id, transform.position);
        }
        self.flush();
    }

    /// A handle resize finished. Bake the node's scale into the model.
    pub fn transform_end(&mut self, id: ShapeId) {
        let Some(transform) = self.renderer.node_transform(id) else {
            log::debug!("Transform end for unknown node {}", id);
            return;
        };
        let Some(shape) = self.mutations.document().find(id).cloned() else {
            return;
        };
        let scale_x = transform.scale.x.abs();
        let scale_y = transform.scale.y.abs();

        match shape {
            Shape::Rectangle(rect) => {
                // The node size is normalized; keep the stored sign so the
                // anchor stays on the same corner.
                let min = self.config.min_transform_size;
                self.mutations.update_geometry(
                    id,
                    Geometry {
                        width: Some(
                            rect.width.signum() * (transform.size.width * scale_x).max(min),
                        ),
                        height: Some(
                            rect.height.signum() * (transform.size.height * scale_y).max(min),
                        ),
                        radius: None,
                    },
                );
            }
            Shape::Circle(_) => {
                let radius = transform.size.width / 2.0 * scale_x.max(scale_y);
                self.mutations.update_geometry(
                    id,
                    Geometry {
                        radius: Some(radius.max(self.config.min_transform_size / 2.0)),
                        ..Geometry::default()
                    },
                );
            }
            Shape::Text(text) => {
                let font_size = (f64::from(text.font_size) * scale_y)
                    .floor()
                    .max(f64::from(self.config.text_min_font_size));
                let geometry = TextGeometry {
                    width: Some((transform.size.width * scale_x).max(self.config.text_min_width)),
                    font_size: Some(font_size as u32),
                };
                self.mutations.update_text(id, text.content, geometry);
            }
        }
        self.mutations.update_position(id, transform.position);
        self.renderer.reset_node_scale(id);
        log::debug!("Resized {} by {:?}", id, transform.scale);
        self.flush();
    }

    // --- Keyboard ----------------------------------------------------------

    pub fn set_canvas_focused(&mut self, focused: bool) {
        self.canvas_focused = focused;
    }

    /// Handle a key press. Returns true if the key was consumed.
    pub fn key_down(&mut self, event: KeyEvent) -> bool {
        if !keyboard::accepts(self.canvas_focused, &event) {
            return false;
        }
        let Some(command) = KeyCommand::for_key(&event.key, self.config.nudge_step) else {
            return false;
        };
        let Some(id) = self.selection.first() else {
            log::debug!("{:?} with nothing selected", command);
            return false;
        };

        match command {
            KeyCommand::Delete => {
                self.mutations.delete(id);
                self.text_editor.forget(id);
                self.selection.clear();
            }
            KeyCommand::Nudge(delta) => {
                self.mutations.translate(id, delta);
            }
        }
        self.flush();
        true
    }

    // --- Text editing ------------------------------------------------------

    /// The edit surface lost focus. Commit its text.
    pub fn text_edit_blur(&mut self, id: ShapeId, text: String) {
        if !self.text_editor.is_editing(id) {
            log::debug!("Stale blur for {}", id);
            return;
        }
        self.end_edit(id, text);
        self.flush();
    }

    fn end_edit(&mut self, id: ShapeId, text: String) {
        if !self.text_editor.finish(id) {
            return;
        }
        // Resizes were already written to the model; only the text is new.
        if self.mutations.update_text(id, text, TextGeometry::default()) {
            log::debug!("Committed text for {}", id);
        }
        self.renderer.set_node_visible(id, true);
    }

    // --- Toolbar -----------------------------------------------------------

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tools.set_tool(tool);
    }

    /// Set the fill from a hex string. Applies to every selected shape and
    /// to shapes created afterwards.
    pub fn set_fill(&mut self, color: &str) -> Result<(), ColorParseError> {
        let color = match SerializableColor::parse_hex(color) {
            Ok(color) => color,
            Err(err) => {
                log::warn!("Ignoring fill: {}", err);
                return Err(err);
            }
        };
        self.tools.toolbar.fill = color;
        for &id in self.selection.ids() {
            self.mutations.update_fill(id, color);
        }
        self.flush();
        Ok(())
    }

    /// Set the font size. Applies to selected text shapes and to text
    /// created afterwards.
    pub fn set_font_size(&mut self, size: u32) {
        if size == 0 {
            log::warn!("Ignoring zero font size");
            return;
        }
        self.tools.toolbar.font_size = size;
        for &id in self.selection.ids() {
            self.mutations.update_font_size(id, size);
        }
        self.flush();
    }

    // --- Frame -------------------------------------------------------------

    /// Called by the host after the scene graph painted a frame.
    pub fn on_paint(&mut self) {
        if self.overlay_pending {
            self.sync_overlay();
        }
    }

    fn capture_toolbar(&mut self, id: ShapeId) {
        if let Some(shape) = self.mutations.document().find(id) {
            self.tools.toolbar = ToolbarState {
                fill: shape.fill(),
                font_size: shape.font_size().unwrap_or(self.config.fallback_font_size),
            };
        }
    }

    /// Push pending model changes and the overlay to the renderer.
    fn flush(&mut self) {
        if self.mutations.take_dirty() {
            self.renderer.request_repaint(Layer::Shapes);
        }
        self.sync_overlay();
    }

    fn sync_overlay(&mut self) {
        let document = self.mutations.document();
        let mut targets = Vec::new();
        let mut pending = false;
        if self.text_editor.editing().is_none() {
            for &id in self.selection.ids() {
                if !document.contains(id) {
                    continue;
                }
                if self.renderer.has_node(id) {
                    targets.push(id);
                } else {
                    pending = true;
                }
            }
        }
        self.overlay_pending = pending;
        self.renderer.set_transformer_nodes(&targets);
        self.renderer.request_repaint(Layer::Overlay);
    }
}

impl InteractionController<HeadlessBackend> {
    /// Paint the headless scene from the model, then run the paint hook.
    pub fn paint_frame(&mut self) {
        self.renderer.paint(self.mutations.document());
        self.on_paint();
    }
}
