//! Rectangle-gated mouse binds

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use super::events::{MouseBindKind, MouseButton};
use super::geometry::Rect;
use super::handler::MouseHandler;

#[derive(Debug)]
pub(crate) struct MouseBindEntry {
    kind: MouseBindKind,
    bounds: Cell<Rect>,
    button: Cell<Option<MouseButton>>,
    handler: RefCell<MouseHandler>,
    live: Cell<bool>,
}

impl MouseBindEntry {
    pub(crate) fn is_live(&self) -> bool {
        self.live.get()
    }

    pub(crate) fn kill(&self) {
        self.live.set(false);
    }

    fn handler(&self) -> MouseHandler {
        self.handler.borrow().clone()
    }

    /// Move binds ignore the button filter
    fn matches_button(&self, button: Option<MouseButton>) -> bool {
        self.kind == MouseBindKind::Move || self.button.get() == button
    }

    fn matches(&self, button: Option<MouseButton>, x: i16, y: i16) -> bool {
        self.matches_button(button) && self.bounds.get().contains(x, y)
    }
}

/// Handle to a registered mouse bind
///
/// Bounds, button filter and handler can be changed through the handle; the
/// kind is fixed.
#[derive(Debug, Clone)]
pub struct MouseBind {
    entry: Rc<MouseBindEntry>,
}

impl MouseBind {
    pub fn kind(&self) -> MouseBindKind {
        self.entry.kind
    }

    pub fn rect(&self) -> Rect {
        self.entry.bounds.get()
    }

    pub fn set_rect(&self, rect: Rect) {
        self.entry.bounds.set(rect);
    }

    /// Button filter; always `None` for move binds
    pub fn button(&self) -> Option<MouseButton> {
        self.entry.button.get()
    }

    /// Change the button filter. Move binds keep no filter.
    pub fn set_button(&self, button: MouseButton) {
        if self.entry.kind != MouseBindKind::Move {
            self.entry.button.set(Some(button));
        }
    }

    pub fn handler(&self) -> MouseHandler {
        self.entry.handler()
    }

    pub fn set_handler(&self, handler: MouseHandler) {
        *self.entry.handler.borrow_mut() = handler;
    }

    pub fn is_bound(&self) -> bool {
        self.entry.is_live()
    }
}

/// Mouse binds of one kind
///
/// Rectangles overlap freely, so binds are a flat list scanned on every event.
#[derive(Debug)]
pub struct MouseBindRegistry {
    kind: MouseBindKind,
    binds: Vec<Rc<MouseBindEntry>>,
}

impl MouseBindRegistry {
    pub fn new(kind: MouseBindKind) -> Self {
        Self {
            kind,
            binds: Vec::new(),
        }
    }

    /// Append a bind. The button is dropped for move binds.
    pub fn add(&mut self, rect: Rect, button: Option<MouseButton>, handler: MouseHandler) -> MouseBind {
        let button = match self.kind {
            MouseBindKind::Move => None,
            MouseBindKind::ButtonUp | MouseBindKind::ButtonDown => button,
        };
        let entry = Rc::new(MouseBindEntry {
            kind: self.kind,
            bounds: Cell::new(rect),
            button: Cell::new(button),
            handler: RefCell::new(handler),
            live: Cell::new(true),
        });
        self.binds.push(entry.clone());
        debug!(kind = ?self.kind, ?rect, ?button, count = self.binds.len(), "Mouse bind added");
        MouseBind { entry }
    }

    /// Remove every bind matching `(button, handler)`; move binds match on the
    /// handler alone
    pub fn remove(&mut self, button: Option<MouseButton>, handler: &MouseHandler) {
        let before = self.binds.len();
        self.binds.retain(|entry| {
            let matches = entry.matches_button(button) && entry.handler().same(handler);
            if matches {
                entry.kill();
            }
            !matches
        });
        let removed = before - self.binds.len();
        if removed > 0 {
            debug!(kind = ?self.kind, removed, count = self.binds.len(), "Mouse bind removed");
        }
    }

    /// Same as `remove(bind.button(), &bind.handler())`
    pub fn remove_bind(&mut self, bind: &MouseBind) {
        self.remove(bind.button(), &bind.handler());
    }

    pub fn kind(&self) -> MouseBindKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.binds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binds.is_empty()
    }

    pub(crate) fn binds(&self) -> Vec<Rc<MouseBindEntry>> {
        self.binds.clone()
    }

    pub fn clear(&mut self) {
        for entry in self.binds.drain(..) {
            entry.kill();
        }
    }
}

/// Call every live bind of a snapshot that matches the button and contains
/// the point
///
/// Like key binds, all matching binds run and the result is the AND of their
/// results.
pub(crate) fn fire(binds: &[Rc<MouseBindEntry>], button: Option<MouseButton>, x: i16, y: i16) -> bool {
    let mut propagate = true;
    for entry in binds {
        // Bounds are read at call time so a handler may move later binds
        if !entry.is_live() || !entry.matches(button, x, y) {
            continue;
        }
        if !entry.handler().call(button, x, y) {
            propagate = false;
        }
    }
    propagate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(counter: &Rc<Cell<usize>>) -> MouseHandler {
        let counter = counter.clone();
        MouseHandler::new(move |_, _, _| {
            counter.set(counter.get() + 1);
            true
        })
    }

    #[test]
    fn test_move_bind_rectangle_gating() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = MouseBindRegistry::new(MouseBindKind::Move);
        registry.add(Rect::new(0, 0, 100, 100), None, counting(&calls));

        fire(&registry.binds(), None, 50, 50);
        assert_eq!(calls.get(), 1);
        fire(&registry.binds(), None, 150, 50);
        assert_eq!(calls.get(), 1);
        fire(&registry.binds(), None, 100, 50);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_button_filter() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = MouseBindRegistry::new(MouseBindKind::ButtonDown);
        let bind = registry.add(
            Rect::new(0, 0, 10, 10),
            Some(MouseButton::Left),
            counting(&calls),
        );

        fire(&registry.binds(), Some(MouseButton::Right), 5, 5);
        assert_eq!(calls.get(), 0);
        fire(&registry.binds(), Some(MouseButton::Left), 5, 5);
        assert_eq!(calls.get(), 1);

        bind.set_button(MouseButton::Right);
        fire(&registry.binds(), Some(MouseButton::Right), 5, 5);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_move_binds_drop_button() {
        let mut registry = MouseBindRegistry::new(MouseBindKind::Move);
        let bind = registry.add(
            Rect::new(0, 0, 10, 10),
            Some(MouseButton::Left),
            MouseHandler::new(|_, _, _| true),
        );
        assert_eq!(bind.button(), None);
        bind.set_button(MouseButton::Right);
        assert_eq!(bind.button(), None);
    }

    #[test]
    fn test_fire_ands_results_without_short_circuit() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = MouseBindRegistry::new(MouseBindKind::ButtonUp);
        let rect = Rect::new(0, 0, 10, 10);
        registry.add(rect, Some(MouseButton::Left), MouseHandler::new(|_, _, _| false));
        registry.add(rect, Some(MouseButton::Left), counting(&calls));

        assert!(!fire(&registry.binds(), Some(MouseButton::Left), 1, 1));
        assert_eq!(calls.get(), 1);
        assert!(fire(&registry.binds(), Some(MouseButton::Left), 20, 1));
    }

    #[test]
    fn test_remove_matches_button_and_handler() {
        let handler = MouseHandler::new(|_, _, _| true);
        let mut registry = MouseBindRegistry::new(MouseBindKind::ButtonDown);
        let rect = Rect::new(0, 0, 10, 10);
        registry.add(rect, Some(MouseButton::Left), handler.clone());
        registry.add(rect, Some(MouseButton::Right), handler.clone());
        registry.add(Rect::new(50, 50, 5, 5), Some(MouseButton::Left), handler.clone());

        registry.remove(Some(MouseButton::Left), &handler);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_move_remove_ignores_button() {
        let handler = MouseHandler::new(|_, _, _| true);
        let mut registry = MouseBindRegistry::new(MouseBindKind::Move);
        registry.add(Rect::new(0, 0, 10, 10), None, handler.clone());
        registry.remove(Some(MouseButton::Middle), &handler);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_set_rect_moves_the_hit_area() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = MouseBindRegistry::new(MouseBindKind::Move);
        let bind = registry.add(Rect::new(0, 0, 10, 10), None, counting(&calls));
        bind.set_rect(Rect::new(100, 100, 10, 10));

        fire(&registry.binds(), None, 5, 5);
        assert_eq!(calls.get(), 0);
        fire(&registry.binds(), None, 105, 105);
        assert_eq!(calls.get(), 1);

        registry.remove_bind(&bind);
        assert!(!bind.is_bound());
        assert!(registry.is_empty());
    }
}
