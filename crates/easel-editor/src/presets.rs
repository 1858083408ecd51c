//! Default geometry for the shapes the editor adds.

use easel_core::shapes::{Ellipse, Line, Rectangle, Text};
use easel_core::ShapeStyle;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Default fill color: fully transparent white.
pub const FILL: &str = "rgba(255, 255, 255, 0.0)";
/// Default stroke color.
pub const STROKE: &str = "#000000";

/// Circle placed with its bounding box at `left`/`top`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CirclePreset {
    pub left: f64,
    pub top: f64,
    pub radius: f64,
}

impl Default for CirclePreset {
    fn default() -> Self {
        Self {
            left: 100.0,
            top: 100.0,
            radius: 20.0,
        }
    }
}

impl CirclePreset {
    pub fn build(&self, fill: &str, stroke: &str) -> Ellipse {
        Ellipse::circle_at(Point::new(self.left, self.top), self.radius).with_style(
            ShapeStyle::new(Some(fill.to_string()), Some(stroke.to_string())),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RectanglePreset {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees.
    pub angle: f64,
}

impl Default for RectanglePreset {
    fn default() -> Self {
        Self {
            left: 100.0,
            top: 100.0,
            width: 40.0,
            height: 40.0,
            angle: 0.0,
        }
    }
}

impl RectanglePreset {
    pub fn build(&self, fill: &str, stroke: &str) -> Rectangle {
        Rectangle::new(Point::new(self.left, self.top), self.width, self.height)
            .with_angle(self.angle)
            .with_style(ShapeStyle::new(
                Some(fill.to_string()),
                Some(stroke.to_string()),
            ))
    }
}

/// Line through two points, `[x1, y1, x2, y2]`, optionally moved so its
/// bounding box starts at `left`/`top`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinePreset {
    pub points: [f64; 4],
    pub left: Option<f64>,
    pub top: Option<f64>,
}

impl Default for LinePreset {
    fn default() -> Self {
        Self {
            points: [50.0, 100.0, 200.0, 200.0],
            left: Some(170.0),
            top: Some(150.0),
        }
    }
}

impl LinePreset {
    /// Lines have no fill; only the stroke is taken from the caller.
    pub fn build(&self, stroke: &str) -> Line {
        let line = Line::from_coords(self.points)
            .with_style(ShapeStyle::new(None, Some(stroke.to_string())));
        let (x, y) = (self.points[0].min(self.points[2]), self.points[1].min(self.points[3]));
        match (self.left, self.top) {
            (None, None) => line,
            (left, top) => line.placed_at(Point::new(left.unwrap_or(x), top.unwrap_or(y))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextPreset {
    pub left: f64,
    pub top: f64,
    pub font_size: f64,
    pub font_family: String,
}

impl Default for TextPreset {
    fn default() -> Self {
        Self {
            left: 100.0,
            top: 100.0,
            font_size: Text::DEFAULT_FONT_SIZE,
            font_family: Text::DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

impl TextPreset {
    /// Text is painted with its fill, so the caller passes the color the
    /// glyphs should have.
    pub fn build(&self, fill: &str) -> Text {
        Text::new(Point::new(self.left, self.top), String::new())
            .with_font_size(self.font_size)
            .with_font_family(self.font_family.clone())
            .with_style(ShapeStyle::new(Some(fill.to_string()), None))
    }
}

/// One preset per shape kind the editor can add.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapePresets {
    pub circle: CirclePreset,
    pub rectangle: RectanglePreset,
    pub line: LinePreset,
    pub text: TextPreset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use easel_core::ShapeTrait;

    #[test]
    fn test_circle_preset_merges_colors() {
        let circle = CirclePreset::default().build("red", "blue");
        assert_eq!(circle.style.fill.as_deref(), Some("red"));
        assert_eq!(circle.style.stroke.as_deref(), Some("blue"));
        assert!((circle.radius_x - 20.0).abs() < f64::EPSILON);
        assert!((circle.bounds().x0 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rectangle_preset() {
        let rect = RectanglePreset::default().build(FILL, STROKE);
        assert_eq!(rect.position, Point::new(100.0, 100.0));
        assert!((rect.width - 40.0).abs() < f64::EPSILON);
        assert_eq!(rect.style.fill.as_deref(), Some(FILL));
    }

    #[test]
    fn test_line_preset_placement() {
        let line = LinePreset::default().build("green");
        assert_eq!(line.start, Point::new(170.0, 150.0));
        assert_eq!(line.end, Point::new(320.0, 250.0));
        assert!(line.style.fill.is_none());
        assert_eq!(line.style.stroke.as_deref(), Some("green"));

        let unplaced = LinePreset {
            left: None,
            top: None,
            ..LinePreset::default()
        }
        .build("green");
        assert_eq!(unplaced.start, Point::new(50.0, 100.0));

        let only_left = LinePreset {
            top: None,
            ..LinePreset::default()
        }
        .build("green");
        assert_eq!(only_left.start, Point::new(170.0, 100.0));
    }

    #[test]
    fn test_text_preset_uses_fill_only() {
        let text = TextPreset::default().build("#123456");
        assert_eq!(text.style.fill.as_deref(), Some("#123456"));
        assert!(text.style.stroke.is_none());
        assert_eq!(text.font_family, "Arial");
        assert!(text.content().is_empty());
    }

    #[test]
    fn test_partial_presets_deserialize_with_defaults() {
        let presets: ShapePresets =
            serde_json::from_str(r#"{"circle": {"radius": 5}, "text": {"fontSize": 30}}"#)
                .unwrap();
        assert!((presets.circle.radius - 5.0).abs() < f64::EPSILON);
        assert!((presets.circle.left - 100.0).abs() < f64::EPSILON);
        assert!((presets.text.font_size - 30.0).abs() < f64::EPSILON);
        assert_eq!(presets.rectangle, RectanglePreset::default());
    }
}
