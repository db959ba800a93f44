//! Shapeboard Core Library
//!
//! Platform-agnostic shape model and interaction state machine for the
//! Shapeboard drawing surface.

pub mod canvas;
pub mod config;
pub mod controller;
pub mod input;
pub mod keyboard;
pub mod mutation;
pub mod render;
pub mod selection;
pub mod shapes;
pub mod text_edit;
pub mod tools;

pub use canvas::CanvasDocument;
pub use config::{ConfigError, InteractionConfig};
pub use controller::InteractionController;
pub use input::{EventResponse, Key, KeyEvent, KeyTarget, Modifiers};
pub use mutation::MutationApplier;
pub use render::{EditSurface, HeadlessBackend, Layer, NodeTransform, RenderBackend};
pub use selection::{GroupDragState, Selection};
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeKind};
pub use text_edit::TextEditor;
pub use tools::{ToolKind, ToolManager, ToolbarState};
