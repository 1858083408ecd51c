//! Easel Core Library
//!
//! The canvas engine an Easel editor drives: the [`CanvasEngine`] contract,
//! an in-memory [`Canvas`] implementing it, shape objects and image loading.

pub mod canvas;
pub mod events;
pub mod loader;
pub mod shapes;

pub use canvas::{Canvas, CanvasEngine, CanvasHandle, DEFAULT_ZOOM, canvas_handle};
pub use events::{SelectionEvent, SelectionEventKind, SelectionHandler};
pub use loader::{BoxFuture, ImageError, ImageLoader, ImageResult, SourceImageLoader};
pub use shapes::{Shape, ShapeId, ShapeKind, ShapeStyle, ShapeTrait};
