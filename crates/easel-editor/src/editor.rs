//! The editor facade: named canvas operations bound to the current style.

use crate::presets::ShapePresets;
use easel_core::{
    BoxFuture, CanvasEngine, CanvasHandle, ImageLoader, Shape, ShapeId, SourceImageLoader,
};
use std::fmt;
use std::rc::Rc;

/// Callback notified when the editor changes a color.
pub type ColorCallback = Rc<dyn Fn(&str)>;

/// Operations on a canvas, bound to the fill/stroke colors current when the
/// editor was built.
///
/// An editor never changes after construction. Color setters report the new
/// value through their callbacks; the owner builds a fresh editor to pick it
/// up.
pub struct Editor<C: CanvasEngine> {
    canvas: CanvasHandle<C>,
    fill_color: String,
    stroke_color: String,
    on_fill_color: ColorCallback,
    on_stroke_color: ColorCallback,
    scale_step: f64,
    presets: Rc<ShapePresets>,
    image_loader: Rc<dyn ImageLoader>,
}

impl<C: CanvasEngine + 'static> Editor<C> {
    /// Create an editor over `canvas` with default presets and the
    /// [`SourceImageLoader`].
    pub fn new(
        canvas: CanvasHandle<C>,
        fill_color: impl Into<String>,
        stroke_color: impl Into<String>,
        on_fill_color: impl Fn(&str) + 'static,
        on_stroke_color: impl Fn(&str) + 'static,
        scale_step: f64,
    ) -> Self {
        Self {
            canvas,
            fill_color: fill_color.into(),
            stroke_color: stroke_color.into(),
            on_fill_color: Rc::new(on_fill_color),
            on_stroke_color: Rc::new(on_stroke_color),
            scale_step,
            presets: Rc::new(ShapePresets::default()),
            image_loader: Rc::new(SourceImageLoader::new()),
        }
    }

    /// Use `presets` for the shapes this editor adds.
    pub fn with_presets(mut self, presets: Rc<ShapePresets>) -> Self {
        self.presets = presets;
        self
    }

    /// Use `loader` to resolve image sources.
    pub fn with_image_loader(mut self, loader: Rc<dyn ImageLoader>) -> Self {
        self.image_loader = loader;
        self
    }

    /// The canvas this editor drives.
    pub fn canvas(&self) -> &CanvasHandle<C> {
        &self.canvas
    }

    /// Fill color new shapes are created with.
    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }

    /// Stroke color new shapes are created with.
    pub fn stroke_color(&self) -> &str {
        &self.stroke_color
    }

    /// Factor applied by one zoom step.
    pub fn scale_step(&self) -> f64 {
        self.scale_step
    }

    fn add(&self, shape: Shape) -> ShapeId {
        let kind = shape.kind();
        let id = self.canvas.borrow_mut().add(shape);
        log::debug!("Added {} {}", kind.name(), id);
        id
    }

    /// Add a circle from the circle preset, in the current colors.
    pub fn add_circle(&self) -> ShapeId {
        let circle = self.presets.circle.build(&self.fill_color, &self.stroke_color);
        self.add(circle.into())
    }

    /// Add a rectangle from the rectangle preset, in the current colors.
    pub fn add_rectangle(&self) -> ShapeId {
        let rect = self
            .presets
            .rectangle
            .build(&self.fill_color, &self.stroke_color);
        self.add(rect.into())
    }

    /// Add a line from the line preset, stroked with the stroke color.
    pub fn add_line(&self) -> ShapeId {
        let line = self.presets.line.build(&self.stroke_color);
        self.add(line.into())
    }

    /// Load an image from `source` and add it to the canvas.
    ///
    /// Nothing happens until the returned future is driven. It resolves to
    /// the new object's id, or `None` if loading failed; failures are only
    /// logged.
    pub fn add_image(&self, source: &str) -> BoxFuture<'static, Option<ShapeId>> {
        let canvas = Rc::clone(&self.canvas);
        let loader = Rc::clone(&self.image_loader);
        let source = source.to_string();
        Box::pin(async move {
            match loader.load(&source).await {
                Ok(image) => {
                    let id = canvas.borrow_mut().add(image.into());
                    log::debug!("Added image {} from {}", id, source);
                    Some(id)
                }
                Err(e) => {
                    log::warn!("Failed to load image {}: {}", source, e);
                    None
                }
            }
        })
    }

    /// Add an editable text box. The text is painted with the stroke color.
    pub fn add_text(&self, content: impl Into<String>) -> ShapeId {
        let mut text = self.presets.text.build(&self.stroke_color);
        text.set_content(content.into());
        self.add(text.into())
    }

    /// Clear the selection and redraw.
    pub fn deselect_all(&self) {
        let mut canvas = self.canvas.borrow_mut();
        canvas.discard_active_object();
        canvas.render_all();
    }

    /// Remove every object from the canvas.
    pub fn delete_all(&self) {
        let mut canvas = self.canvas.borrow_mut();
        let ids = canvas.objects();
        for &id in &ids {
            canvas.remove(id);
        }
        canvas.discard_active_object();
        canvas.render_all();
        log::debug!("Deleted all {} objects", ids.len());
    }

    /// Remove the selected objects.
    pub fn delete_selected(&self) {
        let mut canvas = self.canvas.borrow_mut();
        let ids = canvas.active_objects();
        for &id in &ids {
            canvas.remove(id);
        }
        canvas.discard_active_object();
        canvas.render_all();
        log::debug!("Deleted {} selected objects", ids.len());
    }

    /// Report the new fill color and apply it to every selected object.
    pub fn set_fill_color(&self, color: &str) {
        (self.on_fill_color)(color);
        let mut canvas = self.canvas.borrow_mut();
        for id in canvas.active_objects() {
            if let Some(shape) = canvas.object_mut(id) {
                shape.style_mut().set_fill(color);
            }
        }
        canvas.render_all();
    }

    /// Report the new stroke color and apply it to every selected object.
    ///
    /// Text boxes take the color as their fill.
    pub fn set_stroke_color(&self, color: &str) {
        (self.on_stroke_color)(color);
        let mut canvas = self.canvas.borrow_mut();
        for id in canvas.active_objects() {
            if let Some(shape) = canvas.object_mut(id) {
                if shape.is_text() {
                    shape.style_mut().set_fill(color);
                } else {
                    shape.style_mut().set_stroke(color);
                }
            }
        }
        canvas.render_all();
    }

    /// Zoom in by dividing the canvas zoom by the scale step.
    pub fn zoom_in(&self) {
        let mut canvas = self.canvas.borrow_mut();
        let zoom = canvas.zoom() / self.scale_step;
        canvas.set_zoom(zoom);
        log::debug!("Zoom in to {}", zoom);
    }

    /// Zoom out by multiplying the canvas zoom by the scale step.
    pub fn zoom_out(&self) {
        let mut canvas = self.canvas.borrow_mut();
        let zoom = canvas.zoom() * self.scale_step;
        canvas.set_zoom(zoom);
        log::debug!("Zoom out to {}", zoom);
    }
}

impl<C: CanvasEngine> Clone for Editor<C> {
    fn clone(&self) -> Self {
        Self {
            canvas: Rc::clone(&self.canvas),
            fill_color: self.fill_color.clone(),
            stroke_color: self.stroke_color.clone(),
            on_fill_color: Rc::clone(&self.on_fill_color),
            on_stroke_color: Rc::clone(&self.on_stroke_color),
            scale_step: self.scale_step,
            presets: Rc::clone(&self.presets),
            image_loader: Rc::clone(&self.image_loader),
        }
    }
}

impl<C: CanvasEngine> fmt::Debug for Editor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("fill_color", &self.fill_color)
            .field("stroke_color", &self.stroke_color)
            .field("scale_step", &self.scale_step)
            .field("presets", &self.presets)
            .finish_non_exhaustive()
    }
}
