//! Circle shape.

use super::{SerializableColor, ShapeId, ShapeTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    pub radius: f64,
    pub fill: SerializableColor,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64, fill: SerializableColor) -> Self {
        Self::with_id(Uuid::new_v4(), center, radius, fill)
    }

    /// Create a circle with a caller-supplied ID.
    pub fn with_id(id: ShapeId, center: Point, radius: f64, fill: SerializableColor) -> Self {
        Self {
            id,
            center,
            radius,
            fill,
        }
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn position(&self) -> Point {
        self.center
    }

    fn set_position(&mut self, position: Point) {
        self.center = position;
    }

    fn bounds(&self) -> Rect {
        let r = self.radius.abs();
        Rect::new(
            self.center.x - r,
            self.center.y - r,
            self.center.x + r,
            self.center.y + r,
        )
    }

    fn hit_test(&self, point: Point) -> bool {
        point.distance(self.center) <= self.radius.abs()
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
    fn test_hit_test_center() {
        let circle = Circle::new(Point::new(50.0, 50.0), 30.0, SerializableColor::black());
        assert!(circle.hit_test(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_hit_test_edge() {
        let circle = Circle::new(Point::new(0.0, 0.0), 10.0, SerializableColor::black());
        assert!(circle.hit_test(Point::new(10.0, 0.0)));
        assert!(!circle.hit_test(Point::new(8.0, 8.0)));
        assert!(!circle.hit_test(Point::new(15.0, 0.0)));
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::new(Point::new(50.0, 50.0), 30.0, SerializableColor::black());
        let bounds = circle.bounds();
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 80.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 80.0).abs() < f64::EPSILON);
    }
}
