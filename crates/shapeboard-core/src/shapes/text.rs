//! Text shape.

use super::{SerializableColor, ShapeId, ShapeTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A text shape anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Position (top-left corner of text bounding box).
    pub position: Point,
    /// The text content.
    #[serde(rename = "text")]
    pub content: String,
    /// Font size in pixels.
    #[serde(rename = "fontSize")]
    pub font_size: u32,
    /// Wrap width. `None` until the text has been resized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    pub fill: SerializableColor,
}

impl Text {
    /// Average glyph advance as a fraction of the font size.
    const CHAR_WIDTH_FACTOR: f64 = 0.6;

    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT: f64 = 1.0;

    /// Create a new text shape.
    pub fn new(position: Point, content: String, font_size: u32, fill: SerializableColor) -> Self {
        Self::with_id(Uuid::new_v4(), position, content, font_size, fill)
    }

    /// Create a text shape with a caller-supplied ID.
    pub fn with_id(
        id: ShapeId,
        position: Point,
        content: String,
        font_size: u32,
        fill: SerializableColor,
    ) -> Self {
        Self {
            id,
            position,
            content,
            font_size,
            width: None,
            fill,
        }
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    fn line_count(&self) -> usize {
        self.content.lines().count().max(1)
    }

    /// Approximate width based on the widest line and font size.
    fn approximate_width(&self) -> f64 {
        let max_line_len = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        max_line_len as f64 * self.font_size as f64 * Self::CHAR_WIDTH_FACTOR
    }

    /// Laid-out width: the wrap width once set, otherwise an estimate.
    pub fn layout_width(&self) -> f64 {
        self.width.unwrap_or_else(|| self.approximate_width())
    }

    /// Laid-out height of all lines.
    pub fn layout_height(&self) -> f64 {
        self.font_size as f64 * Self::LINE_HEIGHT * self.line_count() as f64
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.layout_width(),
            self.position.y + self.layout_height(),
        )
    }

    fn hit_test(&self, point: Point) -> bool {
        let bounds = self.bounds();
        point.x >= bounds.x0 && point.x <= bounds.x1 && point.y >= bounds.y0 && point.y <= bounds.y1
    }

    fn fill(&self) -> SerializableColor {
        self.fill
    }

    fn set_fill(&mut self, color: SerializableColor) {
        self.fill = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> Text {
        Text::new(Point::new(10.0, 10.0), content.to_string(), 50, SerializableColor::black())
    }

    #[test]
    fn test_approximate_bounds() {
        let t = text("Text 1");
        let bounds = t.bounds();
        assert!((bounds.width() - 6.0 * 50.0 * 0.6).abs() < 1e-9);
        assert!((bounds.height() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_multiline_height() {
        let t = text("a\nbb\nccc");
        assert!((t.layout_height() - 150.0).abs() < f64::EPSILON);
        assert!((t.layout_width() - 3.0 * 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_width_overrides_estimate() {
        let mut t = text("a very long line of text");
        t.width = Some(40.0);
        assert!((t.bounds().width() - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(text("hi")).unwrap();
        assert_eq!(json["text"], "hi");
        assert_eq!(json["fontSize"], 50);
        assert!(json.get("width").is_none());
    }
}
