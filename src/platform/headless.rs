//! Window-less platform for tests and off-screen use

use std::cell::RefCell;
use std::rc::Rc;

use super::PlatformWindow;

/// A cursor call received by a [`HeadlessWindow`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorCall {
    Visible(bool),
    Position(i16, i16),
}

/// Platform window that records cursor calls instead of performing them
///
/// Clones share the call log, so a clone kept outside the input context can
/// inspect what the context did.
#[derive(Debug, Clone, Default)]
pub struct HeadlessWindow {
    calls: Rc<RefCell<Vec<CursorCall>>>,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<CursorCall> {
        self.calls.borrow().clone()
    }

    /// Net visibility changes: shows minus hides
    pub fn net_shows(&self) -> i32 {
        self.calls
            .borrow()
            .iter()
            .map(|call| match call {
                CursorCall::Visible(true) => 1,
                CursorCall::Visible(false) => -1,
                CursorCall::Position(..) => 0,
            })
            .sum()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl PlatformWindow for HeadlessWindow {
    fn set_cursor_visible(&mut self, visible: bool) {
        self.calls.borrow_mut().push(CursorCall::Visible(visible));
    }

    fn set_cursor_position(&mut self, x: i16, y: i16) {
        self.calls.borrow_mut().push(CursorCall::Position(x, y));
    }
}
