//! Shape definitions for the drawing surface.

mod circle;
mod rectangle;
mod text;

pub use circle::Circle;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// A fill string that could not be read as a color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}: expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ColorParseError(pub String);

/// Serializable color representation (RGBA8).
///
/// Crosses the serde boundary as a CSS hex string so the browser layer
/// can hand it straight to the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Parse a CSS hex color (`#rgb`, `#rrggbb` or `#rrggbbaa`).
    pub fn parse_hex(color: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(color.to_string());
        let hex = color.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() {
            return Err(err());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(&hex[0..1])? * 17;
                let g = channel(&hex[1..2])? * 17;
                let b = channel(&hex[2..3])? * 17;
                Ok(Self::new(r, g, b, 255))
            }
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => Err(err()),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl std::fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for SerializableColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// The three kinds of shape, without their data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Text,
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Anchor position: top-left for rectangles and text, center for circles.
    fn position(&self) -> Point;

    /// Move the anchor to a new position.
    fn set_position(&mut self, position: Point);

    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in canvas coordinates) hits this shape.
    fn hit_test(&self, point: Point) -> bool;

    fn fill(&self) -> SerializableColor;

    fn set_fill(&mut self, color: SerializableColor);
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Text(Text),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rectangle(s) => s.id(),
            Shape::Circle(s) => s.id(),
            Shape::Text(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.position(),
            Shape::Circle(s) => s.position(),
            Shape::Text(s) => s.position(),
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Shape::Rectangle(s) => s.set_position(position),
            Shape::Circle(s) => s.set_position(position),
            Shape::Text(s) => s.set_position(position),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point),
            Shape::Circle(s) => s.hit_test(point),
            Shape::Text(s) => s.hit_test(point),
        }
    }

    pub fn fill(&self) -> SerializableColor {
        match self {
            Shape::Rectangle(s) => s.fill(),
            Shape::Circle(s) => s.fill(),
            Shape::Text(s) => s.fill(),
        }
    }

    pub fn set_fill(&mut self, color: SerializableColor) {
        match self {
            Shape::Rectangle(s) => s.set_fill(color),
            Shape::Circle(s) => s.set_fill(color),
            Shape::Text(s) => s.set_fill(color),
        }
    }

    /// Move the shape by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        let position = self.position() + delta;
        self.set_position(position);
    }

    /// Font size for text shapes.
    pub fn font_size(&self) -> Option<u32> {
        match self {
            Shape::Text(t) => Some(t.font_size),
            _ => None,
        }
    }

    /// Get the text if this shape is a text.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Apply a partial update. Fields that don't exist on this variant are ignored.
    pub fn apply(&mut self, patch: &ShapePatch) {
        if let Some(position) = patch.position {
            self.set_position(position);
        }
        if let Some(fill) = patch.fill {
            self.set_fill(fill);
        }
        match self {
            Shape::Rectangle(r) => {
                if let Some(width) = patch.width {
                    r.width = width;
                }
                if let Some(height) = patch.height {
                    r.height = height;
                }
            }
            Shape::Circle(c) => {
                if let Some(radius) = patch.radius {
                    c.radius = radius;
                }
            }
            Shape::Text(t) => {
                if let Some(content) = &patch.text {
                    t.content = content.clone();
                }
                if let Some(font_size) = patch.font_size {
                    t.font_size = font_size;
                }
                if let Some(width) = patch.width {
                    t.width = Some(width);
                }
            }
        }
    }
}

/// A partial set of shape attributes.
///
/// `width` is the rectangle width or the text wrap width depending on the
/// target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapePatch {
    pub position: Option<Point>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius: Option<f64>,
    pub fill: Option<SerializableColor>,
    pub font_size: Option<u32>,
    pub text: Option<String>,
}

impl ShapePatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn fill(color: SerializableColor) -> Self {
        Self {
            fill: Some(color),
            ..Self::default()
        }
    }

    pub fn font_size(size: u32) -> Self {
        Self {
            font_size: Some(size),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(
            SerializableColor::parse_hex("#000").unwrap(),
            SerializableColor::black()
        );
        assert_eq!(
            SerializableColor::parse_hex("#ff8000").unwrap(),
            SerializableColor::new(255, 128, 0, 255)
        );
        assert_eq!(
            SerializableColor::parse_hex("#ff800080").unwrap(),
            SerializableColor::new(255, 128, 0, 128)
        );
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(SerializableColor::parse_hex("red").is_err());
        assert!(SerializableColor::parse_hex("#12345").is_err());
        assert!(SerializableColor::parse_hex("#gg0000").is_err());
        assert!(SerializableColor::parse_hex("#ééé").is_err());
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(SerializableColor::new(255, 0, 16, 255).to_hex(), "#ff0010");
        assert_eq!(SerializableColor::new(255, 0, 16, 0).to_hex(), "#ff001000");
    }

    #[test]
    fn test_peniko_conversion() {
        let color = SerializableColor::new(12, 34, 56, 255);
        let peniko: Color = color.into();
        assert_eq!(SerializableColor::from(peniko), color);
    }

    #[test]
    fn test_shape_serializes_with_type_tag() {
        let rect = Rectangle::new(Point::new(1.0, 2.0), 10.0, 20.0, SerializableColor::white());
        let json = serde_json::to_value(Shape::Rectangle(rect)).unwrap();
        assert_eq!(json["type"], "rectangle");
        assert_eq!(json["fill"], "#ffffff");
    }

    #[test]
    fn test_patch_ignores_foreign_fields() {
        let mut shape = Shape::Circle(Circle::new(Point::ZERO, 50.0, SerializableColor::black()));
        shape.apply(&ShapePatch {
            width: Some(10.0),
            font_size: Some(12),
            radius: Some(30.0),
            ..ShapePatch::default()
        });
        let Shape::Circle(circle) = shape else {
            panic!("variant changed");
        };
        assert!((circle.radius - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate() {
        let mut shape = Shape::Text(Text::new(
            Point::new(5.0, 5.0),
            "a".to_string(),
            20,
            SerializableColor::black(),
        ));
        shape.translate(Vec2::new(-1.0, 3.0));
        assert_eq!(shape.position(), Point::new(4.0, 8.0));
    }
}
