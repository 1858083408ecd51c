//! Shape objects placed on a canvas.

mod ellipse;
mod image;
mod line;
mod rectangle;
mod text;

pub use ellipse::Ellipse;
pub use image::{Image, ImageFormat};
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Style properties shared by every shape.
///
/// Colors are kept as the strings the caller supplied. The canvas never
/// parses them; whatever renders the canvas decides what a color means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color (None = no fill).
    pub fill: Option<String>,
    /// Stroke color (None = no stroke).
    pub stroke: Option<String>,
    /// Stroke width.
    pub stroke_width: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl ShapeStyle {
    /// Create a style with the given fill and stroke.
    pub fn new(fill: Option<String>, stroke: Option<String>) -> Self {
        Self {
            fill,
            stroke,
            ..Self::default()
        }
    }

    /// Set the fill color.
    pub fn set_fill(&mut self, color: impl Into<String>) {
        self.fill = Some(color.into());
    }

    /// Set the stroke color.
    pub fn set_stroke(&mut self, color: impl Into<String>) {
        self.stroke = Some(color.into());
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Discriminant for the object kinds a canvas can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Ellipse,
    Rectangle,
    Line,
    Text,
    Image,
}

impl ShapeKind {
    /// Type name as used by canvas object models.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Rectangle => "rect",
            ShapeKind::Line => "line",
            ShapeKind::Text => "textbox",
            ShapeKind::Image => "image",
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Ellipse(Ellipse),
    Rectangle(Rectangle),
    Line(Line),
    Text(Text),
    Image(Image),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Ellipse(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
            Shape::Line(s) => s.id(),
            Shape::Text(s) => s.id(),
            Shape::Image(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Image(_) => ShapeKind::Image,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Ellipse(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
            Shape::Image(s) => s.bounds(),
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Ellipse(s) => s.style(),
            Shape::Rectangle(s) => s.style(),
            Shape::Line(s) => s.style(),
            Shape::Text(s) => s.style(),
            Shape::Image(s) => s.style(),
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Ellipse(s) => s.style_mut(),
            Shape::Rectangle(s) => s.style_mut(),
            Shape::Line(s) => s.style_mut(),
            Shape::Text(s) => s.style_mut(),
            Shape::Image(s) => s.style_mut(),
        }
    }

    /// Check if this shape is a text box.
    pub fn is_text(&self) -> bool {
        matches!(self, Shape::Text(_))
    }

    /// Get the text box if this shape is one.
    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Get the image if this shape is an image.
    pub fn as_image(&self) -> Option<&Image> {
        match self {
            Shape::Image(img) => Some(img),
            _ => None,
        }
    }
}

impl From<Ellipse> for Shape {
    fn from(shape: Ellipse) -> Self {
        Shape::Ellipse(shape)
    }
}

impl From<Rectangle> for Shape {
    fn from(shape: Rectangle) -> Self {
        Shape::Rectangle(shape)
    }
}

impl From<Line> for Shape {
    fn from(shape: Line) -> Self {
        Shape::Line(shape)
    }
}

impl From<Text> for Shape {
    fn from(shape: Text) -> Self {
        Shape::Text(shape)
    }
}

impl From<Image> for Shape {
    fn from(shape: Image) -> Self {
        Shape::Image(shape)
    }
}
