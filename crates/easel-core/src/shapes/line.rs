//! Line shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ShapeStyle::default(),
        }
    }

    /// Create a line from a flat `[x1, y1, x2, y2]` coordinate list.
    pub fn from_coords(coords: [f64; 4]) -> Self {
        Self::new(
            Point::new(coords[0], coords[1]),
            Point::new(coords[2], coords[3]),
        )
    }

    /// Move the line so that its bounding box starts at `top_left`.
    pub fn placed_at(mut self, top_left: Point) -> Self {
        let bounds = self.bounds();
        let delta = Vec2::new(top_left.x - bounds.x0, top_left.y - bounds.y0);
        self.start += delta;
        self.end += delta;
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_creation() {
        let line = Line::from_coords([50.0, 100.0, 200.0, 200.0]);
        assert_eq!(line.start, Point::new(50.0, 100.0));
        assert_eq!(line.end, Point::new(200.0, 200.0));
    }

    #[test]
    fn test_placed_at_keeps_direction() {
        let line = Line::from_coords([50.0, 100.0, 200.0, 200.0]).placed_at(Point::new(170.0, 150.0));
        assert_eq!(line.start, Point::new(170.0, 150.0));
        assert_eq!(line.end, Point::new(320.0, 250.0));
    }

    #[test]
    fn test_bounds_of_reversed_line() {
        let line = Line::new(Point::new(10.0, 40.0), Point::new(0.0, 20.0));
        let bounds = line.bounds();
        assert!((bounds.x0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 40.0).abs() < f64::EPSILON);
    }
}
