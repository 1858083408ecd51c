//! Editor state: canvas readiness, style colors and the selection snapshot.

use crate::config::{EditorConfig, resolve_scale_step};
use crate::editor::Editor;
use crate::presets::ShapePresets;
use easel_core::{
    CanvasEngine, CanvasHandle, ImageLoader, SelectionEventKind, ShapeId, SourceImageLoader,
};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Owns everything an [`Editor`] is built from.
///
/// The state starts without a canvas. Once the host hands one over through
/// [`on_ready`](Self::on_ready), [`editor`](Self::editor) returns a facade
/// built from the current canvas and colors, and the selection snapshot
/// follows the canvas's selection events.
pub struct EditorState<C: CanvasEngine> {
    canvas: Option<CanvasHandle<C>>,
    fill_color: Rc<RefCell<String>>,
    stroke_color: Rc<RefCell<String>>,
    scale_step: Cell<f64>,
    selected_objects: Rc<RefCell<Vec<ShapeId>>>,
    /// Bumped on every `on_ready`; handlers from older canvases go quiet.
    generation: Rc<Cell<u64>>,
    presets: Rc<ShapePresets>,
    image_loader: Rc<dyn ImageLoader>,
}

impl<C: CanvasEngine + 'static> EditorState<C> {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            canvas: None,
            fill_color: Rc::new(RefCell::new(config.fill_color())),
            stroke_color: Rc::new(RefCell::new(config.stroke_color())),
            scale_step: Cell::new(config.scale_step()),
            selected_objects: Rc::new(RefCell::new(Vec::new())),
            generation: Rc::new(Cell::new(0)),
            presets: Rc::new(config.presets),
            image_loader: Rc::new(SourceImageLoader::new()),
        }
    }

    /// Use a different loader for [`Editor::add_image`].
    pub fn with_image_loader(mut self, loader: Rc<dyn ImageLoader>) -> Self {
        self.image_loader = loader;
        self
    }

    /// Readiness callback: store the canvas and follow its selection.
    ///
    /// Calling it again switches to the new canvas and clears the snapshot.
    /// Handlers bound on the previous canvas stay registered there but no
    /// longer touch the snapshot.
    pub fn on_ready(&mut self, canvas: CanvasHandle<C>) {
        if self.canvas.is_some() {
            log::warn!("Canvas replaced after ready");
            self.selected_objects.borrow_mut().clear();
        }
        self.generation.set(self.generation.get() + 1);
        self.bind_events(&canvas);
        self.canvas = Some(canvas);
        log::info!("Canvas ready");
    }

    fn bind_events(&self, canvas: &CanvasHandle<C>) {
        let mut canvas = canvas.borrow_mut();
        let bound = self.generation.get();

        let selected = Rc::clone(&self.selected_objects);
        let generation = Rc::clone(&self.generation);
        canvas.on(
            SelectionEventKind::Cleared,
            Box::new(move |_| {
                if generation.get() == bound {
                    selected.borrow_mut().clear();
                }
            }),
        );

        for kind in [SelectionEventKind::Created, SelectionEventKind::Updated] {
            let selected = Rc::clone(&self.selected_objects);
            let generation = Rc::clone(&self.generation);
            canvas.on(
                kind,
                Box::new(move |event| {
                    if generation.get() == bound {
                        *selected.borrow_mut() = event.selected.clone();
                    } else {
                        log::trace!("Ignoring {} from a replaced canvas", event.kind.name());
                    }
                }),
            );
        }
    }

    pub fn is_ready(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn canvas(&self) -> Option<&CanvasHandle<C>> {
        self.canvas.as_ref()
    }

    /// A facade over the current canvas and colors, or `None` before
    /// [`on_ready`](Self::on_ready).
    pub fn editor(&self) -> Option<Editor<C>> {
        let canvas = self.canvas.as_ref()?;
        let fill = Rc::clone(&self.fill_color);
        let stroke = Rc::clone(&self.stroke_color);
        let editor = Editor::new(
            Rc::clone(canvas),
            self.fill_color(),
            self.stroke_color(),
            move |color| *fill.borrow_mut() = color.to_string(),
            move |color| *stroke.borrow_mut() = color.to_string(),
            self.scale_step.get(),
        )
        .with_presets(Rc::clone(&self.presets))
        .with_image_loader(Rc::clone(&self.image_loader));
        Some(editor)
    }

    /// Objects selected as of the last selection event.
    pub fn selected_objects(&self) -> Vec<ShapeId> {
        self.selected_objects.borrow().clone()
    }

    pub fn fill_color(&self) -> String {
        self.fill_color.borrow().clone()
    }

    pub fn set_fill_color(&self, color: impl Into<String>) {
        *self.fill_color.borrow_mut() = color.into();
    }

    pub fn stroke_color(&self) -> String {
        self.stroke_color.borrow().clone()
    }

    pub fn set_stroke_color(&self, color: impl Into<String>) {
        *self.stroke_color.borrow_mut() = color.into();
    }

    pub fn scale_step(&self) -> f64 {
        self.scale_step.get()
    }

    /// Set the zoom multiplier; unusable values fall back to the default.
    pub fn set_scale_step(&self, step: f64) {
        self.scale_step.set(resolve_scale_step(step));
    }
}

impl<C: CanvasEngine + 'static> Default for EditorState<C> {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl<C: CanvasEngine> fmt::Debug for EditorState<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorState")
            .field("ready", &self.canvas.is_some())
            .field("fill_color", &self.fill_color.borrow())
            .field("stroke_color", &self.stroke_color.borrow())
            .field("scale_step", &self.scale_step.get())
            .field("selected_objects", &self.selected_objects.borrow().len())
            .finish_non_exhaustive()
    }
}
