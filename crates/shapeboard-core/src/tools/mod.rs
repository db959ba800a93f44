//! Tool mode and drag-to-create engine.

use crate::config::InteractionConfig;
use crate::shapes::{Circle, Rectangle, SerializableColor, Shape, ShapeId, ShapeKind, ShapePatch, Text};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Circle,
    Text,
}

impl ToolKind {
    /// The kind of shape this tool draws, if any.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Select => None,
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Circle => Some(ShapeKind::Circle),
            ToolKind::Text => Some(ShapeKind::Text),
        }
    }

    /// Toolbar name of the tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Circle => "circle",
            ToolKind::Text => "text",
        }
    }

    /// Parse a toolbar tool name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "select" => Some(ToolKind::Select),
            "rectangle" | "rect" => Some(ToolKind::Rectangle),
            "circle" => Some(ToolKind::Circle),
            "text" => Some(ToolKind::Text),
            _ => None,
        }
    }
}

/// Fill and font size mirrored in the toolbar; applied to the next created shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarState {
    pub fill: SerializableColor,
    pub font_size: u32,
}

impl ToolbarState {
    pub fn from_config(config: &InteractionConfig) -> Self {
        Self {
            fill: config.default_fill,
            font_size: config.default_font_size,
        }
    }
}

/// State of a creation gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// A new shape is being sized by dragging.
    Creating {
        /// The shape that was inserted on pointer-down.
        shape_id: ShapeId,
        /// The kind of that shape.
        kind: ShapeKind,
    },
}

/// Manages the current tool and the in-progress creation gesture.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    current_tool: ToolKind,
    /// Current state of the tool.
    state: ToolState,
    /// Values applied to new shapes.
    pub toolbar: ToolbarState,
}

impl ToolManager {
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::default(),
            toolbar: ToolbarState::from_config(config),
        }
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.current_tool != tool {
            log::info!("Tool: {:?}", tool);
        }
        self.current_tool = tool;
    }

    /// Existing shapes can only be dragged in select mode.
    pub fn is_draggable(&self) -> bool {
        self.current_tool == ToolKind::Select
    }

    /// Check if a creation drag is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Creating { .. })
    }

    /// The shape being created, if any.
    pub fn in_progress(&self) -> Option<ShapeId> {
        match self.state {
            ToolState::Creating { shape_id, .. } => Some(shape_id),
            ToolState::Idle => None,
        }
    }

    /// Start a creation gesture at `point` and return the shape to insert.
    ///
    /// `text_count` is the number of text shapes already on the canvas; it
    /// only feeds the placeholder label.
    pub fn begin(
        &mut self,
        point: Point,
        text_count: usize,
        config: &InteractionConfig,
    ) -> Option<Shape> {
        let kind = self.current_tool.shape_kind()?;
        let id = Uuid::new_v4();
        let fill = self.toolbar.fill;

        let shape = match kind {
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::with_id(
                id,
                point,
                config.default_size,
                config.default_size,
                fill,
            )),
            ShapeKind::Circle => {
                Shape::Circle(Circle::with_id(id, point, config.default_size / 2.0, fill))
            }
            ShapeKind::Text => Shape::Text(Text::with_id(
                id,
                point,
                format!("Text {}", text_count + 1),
                self.toolbar.font_size,
                fill,
            )),
        };

        self.state = ToolState::Creating { shape_id: id, kind };
        Some(shape)
    }

    /// Geometry for the in-progress shape with the pointer at `pointer`.
    ///
    /// Returns `None` when no gesture is active, the tool no longer matches
    /// the shape, or the shape doesn't grow by dragging (text).
    pub fn drag_patch(&self, shape: &Shape, pointer: Point, min_size: f64) -> Option<ShapePatch> {
        let ToolState::Creating { shape_id, kind } = self.state else {
            return None;
        };
        if shape.id() != shape_id || self.current_tool.shape_kind() != Some(kind) {
            return None;
        }

        match shape {
            Shape::Rectangle(rect) => {
                let (width, height) = rectangle_drag_size(rect.position, pointer, min_size);
                Some(ShapePatch {
                    width: Some(width),
                    height: Some(height),
                    ..ShapePatch::default()
                })
            }
            Shape::Circle(circle) => Some(ShapePatch {
                radius: Some(circle_drag_radius(circle.center, pointer, min_size)),
                ..ShapePatch::default()
            }),
            Shape::Text(_) => None,
        }
    }

    /// End any gesture and fall back to select mode.
    pub fn end(&mut self) {
        if let ToolState::Creating { shape_id, kind } = self.state {
            log::debug!("Finished creating {:?} {}", kind, shape_id);
        }
        self.state = ToolState::Idle;
        self.set_tool(ToolKind::Select);
    }
}

/// Rectangle size while dragging from its anchor. Not clamped.
pub fn rectangle_drag_size(origin: Point, pointer: Point, min_size: f64) -> (f64, f64) {
    (
        min_size + (pointer.x - origin.x),
        min_size + (pointer.y - origin.y),
    )
}

/// Circle radius while dragging away from its center.
pub fn circle_drag_radius(origin: Point, pointer: Point, min_size: f64) -> f64 {
    min_size / 2.0 + pointer.distance(origin) / 2.0
}
