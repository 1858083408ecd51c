//! Canvas engine contract and the in-memory canvas.

use crate::events::{SelectionEvent, SelectionEventKind, SelectionHandler, SelectionListeners};
use crate::shapes::{Shape, ShapeId};
use kurbo::Rect;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared reference to a canvas owned by the host.
pub type CanvasHandle<C> = Rc<RefCell<C>>;

/// Wrap a canvas in a shared handle.
pub fn canvas_handle<C: CanvasEngine>(canvas: C) -> CanvasHandle<C> {
    Rc::new(RefCell::new(canvas))
}

/// The object-graph API an editor drives.
///
/// Implementations own the objects, the active selection and the view zoom,
/// and announce selection changes through the three selection events.
pub trait CanvasEngine {
    /// Add an object on top of the z-order.
    fn add(&mut self, shape: Shape) -> ShapeId;

    /// Remove an object. Returns it if it was present.
    fn remove(&mut self, id: ShapeId) -> Option<Shape>;

    /// All object ids, back to front.
    fn objects(&self) -> Vec<ShapeId>;

    /// Ids of the currently selected objects.
    fn active_objects(&self) -> Vec<ShapeId>;

    /// Look up an object.
    fn object(&self, id: ShapeId) -> Option<&Shape>;

    /// Look up an object for mutation.
    fn object_mut(&mut self, id: ShapeId) -> Option<&mut Shape>;

    /// Clear the active selection.
    fn discard_active_object(&mut self);

    /// Request a full redraw.
    fn render_all(&mut self);

    /// Current zoom factor.
    fn zoom(&self) -> f64;

    /// Set the zoom factor.
    fn set_zoom(&mut self, zoom: f64);

    /// Bind a handler to a selection event.
    fn on(&mut self, kind: SelectionEventKind, handler: SelectionHandler);
}

/// Zoom factor of a fresh canvas.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// In-memory canvas: objects in z-order, an active selection and a zoom
/// factor.
///
/// Zoom is stored exactly as set, without clamping.
#[derive(Debug)]
pub struct Canvas {
    /// All objects, keyed by ID.
    shapes: HashMap<ShapeId, Shape>,
    /// Z-order of objects (back to front).
    z_order: Vec<ShapeId>,
    /// Currently selected object IDs, in selection order.
    selection: Vec<ShapeId>,
    zoom: f64,
    /// Number of redraw requests received.
    render_count: u64,
    listeners: SelectionListeners,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            shapes: HashMap::new(),
            z_order: Vec::new(),
            selection: Vec::new(),
            zoom: DEFAULT_ZOOM,
            render_count: 0,
            listeners: SelectionListeners::new(),
        }
    }
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the canvas holds no objects.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of objects on the canvas.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Objects in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Bounding box of all objects.
    pub fn bounds(&self) -> Option<Rect> {
        self.shapes
            .values()
            .map(Shape::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }

    /// Number of redraw requests received so far.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Check if an object is selected.
    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    /// Replace the selection, as a pointer or marquee selection would.
    ///
    /// Ids not on the canvas and duplicates are dropped.
    pub fn set_active_objects(&mut self, ids: &[ShapeId]) {
        let mut next = Vec::with_capacity(ids.len());
        for &id in ids {
            if self.shapes.contains_key(&id) && !next.contains(&id) {
                next.push(id);
            }
        }
        self.apply_selection(next);
    }

    /// Select a single object (clears previous selection).
    pub fn select(&mut self, id: ShapeId) {
        self.set_active_objects(&[id]);
    }

    /// Add an object to the selection.
    pub fn add_to_selection(&mut self, id: ShapeId) {
        let mut ids = self.selection.clone();
        ids.push(id);
        self.set_active_objects(&ids);
    }

    /// Select every object.
    pub fn select_all(&mut self) {
        let ids = self.z_order.clone();
        self.set_active_objects(&ids);
    }

    /// Swap in a new selection and announce the transition.
    fn apply_selection(&mut self, next: Vec<ShapeId>) {
        if next == self.selection {
            return;
        }
        let kind = match (self.selection.is_empty(), next.is_empty()) {
            (_, true) => SelectionEventKind::Cleared,
            (true, false) => SelectionEventKind::Created,
            (false, false) => SelectionEventKind::Updated,
        };
        let deselected = self
            .selection
            .iter()
            .filter(|id| !next.contains(id))
            .copied()
            .collect();
        self.selection = next;
        let event = SelectionEvent {
            kind,
            selected: self.selection.clone(),
            deselected,
        };
        self.listeners.emit(&event);
    }
}

impl CanvasEngine for Canvas {
    fn add(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        if self.shapes.insert(id, shape).is_none() {
            self.z_order.push(id);
        }
        id
    }

    fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        if self.selection.contains(&id) {
            let next = self
                .selection
                .iter()
                .filter(|&&selected| selected != id)
                .copied()
                .collect();
            self.apply_selection(next);
        }
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    fn objects(&self) -> Vec<ShapeId> {
        self.z_order.clone()
    }

    fn active_objects(&self) -> Vec<ShapeId> {
        self.selection.clone()
    }

    fn object(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    fn object_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    fn discard_active_object(&mut self) {
        self.apply_selection(Vec::new());
    }

    fn render_all(&mut self) {
        self.render_count += 1;
        log::trace!("Redraw requested ({} objects)", self.shapes.len());
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    fn on(&mut self, kind: SelectionEventKind, handler: SelectionHandler) {
        self.listeners.on(kind, handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Ellipse, Rectangle, Text};
    use kurbo::Point;

    fn rect_at(x: f64, y: f64) -> Shape {
        Rectangle::new(Point::new(x, y), 100.0, 100.0).into()
    }

    fn recorder(canvas: &mut Canvas) -> Rc<RefCell<Vec<SelectionEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            SelectionEventKind::Created,
            SelectionEventKind::Updated,
            SelectionEventKind::Cleared,
        ] {
            let sink = Rc::clone(&events);
            canvas.on(kind, Box::new(move |e| sink.borrow_mut().push(e.clone())));
        }
        events
    }

    #[test]
    fn test_canvas_creation() {
        let canvas = Canvas::new();
        assert!(canvas.is_empty());
        assert!(canvas.bounds().is_none());
        assert!((canvas.zoom() - DEFAULT_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_add_and_remove() {
        let mut canvas = Canvas::new();
        let id = canvas.add(rect_at(0.0, 0.0));
        assert_eq!(canvas.len(), 1);
        assert!(canvas.object(id).is_some());

        let removed = canvas.remove(id);
        assert!(removed.is_some());
        assert!(canvas.is_empty());
        assert!(canvas.remove(id).is_none());
    }

    #[test]
    fn test_objects_in_z_order() {
        let mut canvas = Canvas::new();
        let id1 = canvas.add(rect_at(0.0, 0.0));
        let id2 = canvas.add(Ellipse::circle(Point::ZERO, 5.0).into());
        let id3 = canvas.add(Text::new(Point::ZERO, "t".to_string()).into());
        assert_eq!(canvas.objects(), vec![id1, id2, id3]);

        canvas.remove(id2);
        assert_eq!(canvas.objects(), vec![id1, id3]);
        assert_eq!(canvas.shapes_ordered().count(), 2);
    }

    #[test]
    fn test_readding_same_shape_keeps_single_entry() {
        let mut canvas = Canvas::new();
        let shape = rect_at(0.0, 0.0);
        canvas.add(shape.clone());
        canvas.add(shape);
        assert_eq!(canvas.len(), 1);
        assert_eq!(canvas.objects().len(), 1);
    }

    #[test]
    fn test_bounds_union() {
        let mut canvas = Canvas::new();
        canvas.add(rect_at(0.0, 0.0));
        canvas.add(rect_at(50.0, 50.0));
        let bounds = canvas.bounds().unwrap();
        assert!((bounds.x0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 150.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_selection_lifecycle_events() {
        let mut canvas = Canvas::new();
        let events = recorder(&mut canvas);
        let id1 = canvas.add(rect_at(0.0, 0.0));
        let id2 = canvas.add(rect_at(50.0, 50.0));

        canvas.select(id1);
        canvas.add_to_selection(id2);
        canvas.set_active_objects(&[id2]);
        canvas.discard_active_object();

        let events = events.borrow();
        let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SelectionEventKind::Created,
                SelectionEventKind::Updated,
                SelectionEventKind::Updated,
                SelectionEventKind::Cleared,
            ]
        );
        assert_eq!(events[0].selected, vec![id1]);
        assert_eq!(events[1].selected, vec![id1, id2]);
        assert_eq!(events[2].selected, vec![id2]);
        assert_eq!(events[2].deselected, vec![id1]);
        assert!(events[3].selected.is_empty());
        assert_eq!(events[3].deselected, vec![id2]);
    }

    #[test]
    fn test_unchanged_selection_fires_nothing() {
        let mut canvas = Canvas::new();
        let events = recorder(&mut canvas);
        let id = canvas.add(rect_at(0.0, 0.0));

        canvas.discard_active_object();
        canvas.select(id);
        canvas.select(id);
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_unknown_and_duplicate_ids_ignored() {
        let mut canvas = Canvas::new();
        let id = canvas.add(rect_at(0.0, 0.0));
        canvas.set_active_objects(&[id, id, uuid::Uuid::new_v4()]);
        assert_eq!(canvas.active_objects(), vec![id]);
        assert!(canvas.is_selected(id));
    }

    #[test]
    fn test_select_all() {
        let mut canvas = Canvas::new();
        let id1 = canvas.add(rect_at(0.0, 0.0));
        let id2 = canvas.add(rect_at(10.0, 10.0));
        canvas.select_all();
        assert_eq!(canvas.active_objects(), vec![id1, id2]);
    }

    #[test]
    fn test_remove_drops_from_selection() {
        let mut canvas = Canvas::new();
        let events = recorder(&mut canvas);
        let id1 = canvas.add(rect_at(0.0, 0.0));
        let id2 = canvas.add(rect_at(10.0, 10.0));
        canvas.select_all();

        canvas.remove(id1);
        assert_eq!(canvas.active_objects(), vec![id2]);
        canvas.remove(id2);
        assert!(canvas.active_objects().is_empty());

        let kinds: Vec<_> = events.borrow().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SelectionEventKind::Created,
                SelectionEventKind::Updated,
                SelectionEventKind::Cleared,
            ]
        );
    }

    #[test]
    fn test_removing_unselected_object_fires_nothing() {
        let mut canvas = Canvas::new();
        let events = recorder(&mut canvas);
        let id1 = canvas.add(rect_at(0.0, 0.0));
        let id2 = canvas.add(rect_at(10.0, 10.0));
        canvas.select(id1);
        canvas.remove(id2);
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(canvas.active_objects(), vec![id1]);
    }

    #[test]
    fn test_render_all_counts() {
        let mut canvas = Canvas::new();
        canvas.render_all();
        canvas.render_all();
        assert_eq!(canvas.render_count(), 2);
    }

    #[test]
    fn test_set_zoom_is_not_clamped() {
        let mut canvas = Canvas::new();
        canvas.set_zoom(64.0);
        assert!((canvas.zoom() - 64.0).abs() < f64::EPSILON);
        canvas.set_zoom(0.001);
        assert!((canvas.zoom() - 0.001).abs() < f64::EPSILON);
    }

    #[test]
    fn test_handle_shares_canvas() {
        let handle = canvas_handle(Canvas::new());
        let other = Rc::clone(&handle);
        handle.borrow_mut().add(rect_at(0.0, 0.0));
        assert_eq!(other.borrow().len(), 1);
    }
}
