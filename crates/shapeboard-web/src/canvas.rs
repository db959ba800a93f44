//! The `ShapeboardCanvas` class exported to JavaScript.

use crate::backend::JsBackend;
use js_sys::Array;
use kurbo::Point;
use serde::Serialize;
use shapeboard_core::{
    InteractionConfig, InteractionController, Key, KeyEvent, KeyTarget, Modifiers, ShapeId,
    ToolKind,
};
use wasm_bindgen::prelude::*;

fn shift(held: bool) -> Modifiers {
    Modifiers {
        shift: held,
        ..Modifiers::NONE
    }
}

fn parse_id(id: &str) -> Result<ShapeId, JsValue> {
    ShapeId::parse_str(id).map_err(|err| JsValue::from_str(&format!("invalid shape id `{id}`: {err}")))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

/// One drawing surface. Created when the stage mounts; call `free()` on
/// unmount to release the callbacks.
#[wasm_bindgen]
pub struct ShapeboardCanvas {
    controller: InteractionController<JsBackend>,
}

#[wasm_bindgen]
impl ShapeboardCanvas {
    /// `callbacks` carries the scene-graph functions. `config` is an optional
    /// JSON string overriding the interaction defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(callbacks: &JsValue, config: Option<String>) -> Result<ShapeboardCanvas, JsValue> {
        let backend = JsBackend::from_callbacks(callbacks)?;
        let config = match config {
            Some(json) => InteractionConfig::from_json(&json).map_err(|err| {
                log::warn!("Rejected config: {}", err);
                JsValue::from_str(&err.to_string())
            })?,
            None => InteractionConfig::default(),
        };
        let controller = InteractionController::new(config, backend)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        log::info!("Shapeboard canvas ready");
        Ok(Self { controller })
    }

    /// Returns true when the press was handled and the stage should not
    /// start its own drag.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, shift_key: bool) -> bool {
        self.controller.pointer_down(shift(shift_key)).is_consumed()
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self) {
        self.controller.pointer_move();
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }

    pub fn click(&mut self, x: f64, y: f64, shift_key: bool) {
        self.controller.click(Point::new(x, y), shift(shift_key));
    }

    #[wasm_bindgen(js_name = doubleClick)]
    pub fn double_click(&mut self, x: f64, y: f64) {
        self.controller.double_click(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, id: &str) -> Result<(), JsValue> {
        self.controller.drag_end(parse_id(id)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = transformEnd)]
    pub fn transform_end(&mut self, id: &str) -> Result<(), JsValue> {
        self.controller.transform_end(parse_id(id)?);
        Ok(())
    }

    /// `target_tag` and `content_editable` describe the focused element.
    /// Returns true if the key was handled and default handling should stop.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, target_tag: &str, content_editable: bool) -> bool {
        self.controller.key_down(KeyEvent {
            key: Key::from_dom(key),
            target: KeyTarget::from_element(target_tag, content_editable),
        })
    }

    #[wasm_bindgen(js_name = setCanvasFocused)]
    pub fn set_canvas_focused(&mut self, focused: bool) {
        self.controller.set_canvas_focused(focused);
    }

    #[wasm_bindgen(js_name = textEditBlur)]
    pub fn text_edit_blur(&mut self, id: &str, text: String) -> Result<(), JsValue> {
        self.controller.text_edit_blur(parse_id(id)?, text);
        Ok(())
    }

    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&mut self, name: &str) -> Result<(), JsValue> {
        let tool = ToolKind::from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown tool `{name}`")))?;
        self.controller.set_tool(tool);
        Ok(())
    }

    #[wasm_bindgen(js_name = setFill)]
    pub fn set_fill(&mut self, color: &str) -> Result<(), JsValue> {
        self.controller
            .set_fill(color)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    #[wasm_bindgen(js_name = setFontSize)]
    pub fn set_font_size(&mut self, size: u32) {
        self.controller.set_font_size(size);
    }

    /// Call after the stage painted a frame.
    #[wasm_bindgen(js_name = onPaint)]
    pub fn on_paint(&mut self) {
        self.controller.on_paint();
    }

    /// Shapes in paint order.
    pub fn shapes(&self) -> Result<JsValue, JsValue> {
        let shapes: Vec<_> = self.controller.document().shapes().collect();
        to_js(&shapes)
    }

    /// Selected shape ids, first selected first.
    pub fn selection(&self) -> Array {
        self.controller
            .selection()
            .ids()
            .iter()
            .map(|id| JsValue::from_str(&id.to_string()))
            .collect()
    }

    pub fn tool(&self) -> String {
        self.controller.tool().name().to_string()
    }

    /// `{ fill, fontSize }` as shown in the toolbar.
    pub fn toolbar(&self) -> Result<JsValue, JsValue> {
        to_js(&self.controller.toolbar())
    }

    pub fn editing(&self) -> Option<String> {
        self.controller.editing().map(|id| id.to_string())
    }

    #[wasm_bindgen(js_name = isDraggable)]
    pub fn is_draggable(&self) -> bool {
        self.controller.is_draggable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_modifier() {
        assert!(shift(true).shift);
        assert_eq!(shift(false), Modifiers::NONE);
    }
}
