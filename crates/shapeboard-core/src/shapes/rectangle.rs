//! Rectangle shape.

use super::{SerializableColor, ShapeId, ShapeTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle anchored at its top-left corner.
///
/// Width and height may be negative while a creation drag pulls the pointer
/// above or left of the anchor; bounds are normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub fill: SerializableColor,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64, fill: SerializableColor) -> Self {
        Self::with_id(Uuid::new_v4(), position, width, height, fill)
    }

    /// Create a rectangle with a caller-supplied ID.
    pub fn with_id(
        id: ShapeId,
        position: Point,
        width: f64,
        height: f64,
        fill: SerializableColor,
    ) -> Self {
        Self {
            id,
            position,
            width,
            height,
            fill,
        }
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_points(
            self.position,
            Point::new(self.position.x + self.width, self.position.y + self.height),
        )
    }
}

impl ShapeTrait for Rectangle {
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
        self.as_rect()
    }

    fn hit_test(&self, point: Point) -> bool {
        let rect = self.as_rect();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
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

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), 100.0, 50.0, SerializableColor::black());
        assert!((rect.position.x - 10.0).abs() < f64::EPSILON);
        assert!((rect.position.y - 20.0).abs() < f64::EPSILON);
        assert!((rect.width - 100.0).abs() < f64::EPSILON);
        assert!((rect.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_size_bounds_are_normalized() {
        let rect = Rectangle::new(Point::new(100.0, 100.0), -50.0, -20.0, SerializableColor::black());
        let bounds = rect.bounds();
        assert!((bounds.x0 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 80.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0, SerializableColor::black());
        assert!(rect.hit_test(Point::new(50.0, 50.0)));
        assert!(rect.hit_test(Point::new(100.0, 100.0)));
        assert!(!rect.hit_test(Point::new(150.0, 50.0)));
    }
}
