//! Selection lifecycle events.

use crate::shapes::ShapeId;
use std::collections::HashMap;
use std::fmt;

/// The three selection lifecycle events a canvas delivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionEventKind {
    /// A selection appeared where there was none.
    Created,
    /// An existing selection changed.
    Updated,
    /// The selection became empty.
    Cleared,
}

impl SelectionEventKind {
    /// Event name as used by canvas object models.
    pub fn name(&self) -> &'static str {
        match self {
            SelectionEventKind::Created => "selection:created",
            SelectionEventKind::Updated => "selection:updated",
            SelectionEventKind::Cleared => "selection:cleared",
        }
    }
}

/// Payload delivered with a selection event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub kind: SelectionEventKind,
    /// The complete selection after the change (empty for `Cleared`).
    pub selected: Vec<ShapeId>,
    /// Objects that left the selection with this change.
    pub deselected: Vec<ShapeId>,
}

/// Callback bound to a selection event.
///
/// Handlers run while the canvas is mutably borrowed and must not reach back
/// into it.
pub type SelectionHandler = Box<dyn FnMut(&SelectionEvent)>;

/// Registry of selection handlers, invoked in registration order.
#[derive(Default)]
pub struct SelectionListeners {
    handlers: HashMap<SelectionEventKind, Vec<SelectionHandler>>,
}

impl SelectionListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a handler to an event kind.
    pub fn on(&mut self, kind: SelectionEventKind, handler: SelectionHandler) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    /// Number of handlers bound to an event kind.
    pub fn count(&self, kind: SelectionEventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Deliver an event to every handler bound to its kind.
    pub fn emit(&mut self, event: &SelectionEvent) {
        log::trace!(
            "{} ({} selected, {} deselected)",
            event.kind.name(),
            event.selected.len(),
            event.deselected.len()
        );
        if let Some(handlers) = self.handlers.get_mut(&event.kind) {
            for handler in handlers.iter_mut() {
                handler(event);
            }
        }
    }
}

impl fmt::Debug for SelectionListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionListeners")
            .field("created", &self.count(SelectionEventKind::Created))
            .field("updated", &self.count(SelectionEventKind::Updated))
            .field("cleared", &self.count(SelectionEventKind::Cleared))
            .finish()
    }
}
