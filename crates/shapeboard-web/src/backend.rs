//! Scene-graph backend that forwards every call to a JavaScript callback.

use js_sys::{Array, Function, Reflect};
use kurbo::{Point, Size, Vec2};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use shapeboard_core::ShapeId;
use shapeboard_core::render::{EditSurface, Layer, NodeTransform, RenderBackend};
use wasm_bindgen::{JsCast, JsValue};

/// `{ x, y }` as returned by the stage.
#[derive(Debug, Deserialize)]
struct JsPoint {
    x: f64,
    y: f64,
}

/// Node attributes read back after a drag or resize.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsNodeTransform {
    x: f64,
    y: f64,
    #[serde(default = "unit_scale")]
    scale_x: f64,
    #[serde(default = "unit_scale")]
    scale_y: f64,
    width: f64,
    height: f64,
}

fn unit_scale() -> f64 {
    1.0
}

/// [`RenderBackend`] backed by the callbacks object handed over from JS.
pub struct JsBackend {
    pointer_position: Function,
    has_node: Function,
    request_repaint: Function,
    node_transform: Function,
    set_node_position: Function,
    reset_node_scale: Function,
    set_transformer_nodes: Function,
    set_node_visible: Function,
    open_edit_surface: Function,
}

impl JsBackend {
    /// Look up every callback on `callbacks`. Fails if one is missing or
    /// isn't a function.
    pub fn from_callbacks(callbacks: &JsValue) -> Result<Self, JsValue> {
        let get = |name: &str| -> Result<Function, JsValue> {
            Reflect::get(callbacks, &JsValue::from_str(name))?
                .dyn_into::<Function>()
                .map_err(|_| JsValue::from_str(&format!("callback `{name}` is not a function")))
        };

        Ok(Self {
            pointer_position: get("pointerPosition")?,
            has_node: get("hasNode")?,
            request_repaint: get("requestRepaint")?,
            node_transform: get("nodeTransform")?,
            set_node_position: get("setNodePosition")?,
            reset_node_scale: get("resetNodeScale")?,
            set_transformer_nodes: get("setTransformerNodes")?,
            set_node_visible: get("setNodeVisible")?,
            open_edit_surface: get("openEditSurface")?,
        })
    }
}

/// Log and swallow exceptions thrown by a callback.
fn settle(name: &str, result: Result<JsValue, JsValue>) -> Option<JsValue> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            log::error!("Callback {} threw: {:?}", name, error);
            None
        }
    }
}

/// Decode a callback's return value. `null` and `undefined` mean "none".
fn decode<T: DeserializeOwned>(name: &str, value: JsValue) -> Option<T> {
    if value.is_null() || value.is_undefined() {
        return None;
    }
    match serde_wasm_bindgen::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            log::warn!("Callback {} returned an unexpected value: {}", name, err);
            None
        }
    }
}

fn id_value(id: ShapeId) -> JsValue {
    JsValue::from_str(&id.to_string())
}

/// Name of a layer as passed to `requestRepaint`.
pub(crate) fn layer_name(layer: Layer) -> &'static str {
    match layer {
        Layer::Shapes => "shapes",
        Layer::Overlay => "overlay",
    }
}

impl RenderBackend for JsBackend {
    fn pointer_position(&self) -> Option<Point> {
        let value = settle("pointerPosition", self.pointer_position.call0(&JsValue::NULL))?;
        decode::<JsPoint>("pointerPosition", value).map(|p| Point::new(p.x, p.y))
    }

    fn has_node(&self, id: ShapeId) -> bool {
        settle("hasNode", self.has_node.call1(&JsValue::NULL, &id_value(id)))
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    fn request_repaint(&mut self, layer: Layer) {
        settle(
            "requestRepaint",
            self.request_repaint
                .call1(&JsValue::NULL, &JsValue::from_str(layer_name(layer))),
        );
    }

    fn node_transform(&self, id: ShapeId) -> Option<NodeTransform> {
        let value = settle("nodeTransform", self.node_transform.call1(&JsValue::NULL, &id_value(id)))?;
        decode::<JsNodeTransform>("nodeTransform", value).map(|node| NodeTransform {
            position: Point::new(node.x, node.y),
            scale: Vec2::new(node.scale_x, node.scale_y),
            size: Size::new(node.width, node.height),
        })
    }

    fn set_node_position(&mut self, id: ShapeId, position: Point) {
        settle(
            "setNodePosition",
            self.set_node_position.call3(
                &JsValue::NULL,
                &id_value(id),
                &JsValue::from_f64(position.x),
                &JsValue::from_f64(position.y),
            ),
        );
    }

    fn reset_node_scale(&mut self, id: ShapeId) {
        settle("resetNodeScale", self.reset_node_scale.call1(&JsValue::NULL, &id_value(id)));
    }

    fn set_transformer_nodes(&mut self, ids: &[ShapeId]) {
        let array: Array = ids.iter().map(|&id| id_value(id)).collect();
        settle(
            "setTransformerNodes",
            self.set_transformer_nodes.call1(&JsValue::NULL, &array),
        );
    }

    fn set_node_visible(&mut self, id: ShapeId, visible: bool) {
        settle(
            "setNodeVisible",
            self.set_node_visible
                .call2(&JsValue::NULL, &id_value(id), &JsValue::from_bool(visible)),
        );
    }

    fn open_edit_surface(&mut self, surface: &EditSurface) {
        match serde_wasm_bindgen::to_value(surface) {
            Ok(value) => {
                settle("openEditSurface", self.open_edit_surface.call1(&JsValue::NULL, &value));
            }
            Err(err) => log::error!("Failed to encode edit surface: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_names() {
        assert_eq!(layer_name(Layer::Shapes), "shapes");
        assert_eq!(layer_name(Layer::Overlay), "overlay");
    }
}
