//! Cursor, wheel and key state owned by the dispatcher

use std::collections::HashSet;

use super::events::{InputEvent, KeyAction, KeyboardEvent, MouseEvent, NormalizedInput};
use super::keys::KeyCode;

/// State carried from one dispatch to the next
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    /// Last known cursor position
    pub x: i16,
    pub y: i16,
    /// Accumulated wheel notches
    pub wheel: i32,
    pressed: HashSet<KeyCode>,
    pub cursor: CursorVisibility,
}

impl PointerState {
    pub fn new(cursor_visible: bool) -> Self {
        Self {
            cursor: CursorVisibility::new(cursor_visible),
            ..Self::default()
        }
    }

    /// Fold a normalized input into the state and build the event hooks see
    ///
    /// Mouse deltas are relative to the previous mouse position.
    pub fn record(&mut self, input: NormalizedInput) -> InputEvent {
        match input {
            NormalizedInput::Key { action, key } => {
                match action {
                    KeyAction::Down => {
                        self.pressed.insert(key);
                    }
                    KeyAction::Up => {
                        self.pressed.remove(&key);
                    }
                    KeyAction::Character => {}
                }
                InputEvent::Keyboard(KeyboardEvent { action, key })
            }
            NormalizedInput::Mouse {
                action,
                x,
                y,
                wheel,
            } => {
                let event = MouseEvent {
                    action,
                    x,
                    y,
                    dx: x.wrapping_sub(self.x),
                    dy: y.wrapping_sub(self.y),
                    wheel,
                };
                self.x = x;
                self.y = y;
                self.wheel = self.wheel.saturating_add(wheel.notches());
                InputEvent::Mouse(event)
            }
        }
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

/// Cursor visibility with a reference-counted show/hide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorVisibility {
    visible: bool,
    refs: u32,
}

impl Default for CursorVisibility {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CursorVisibility {
    pub fn new(visible: bool) -> Self {
        Self { visible, refs: 0 }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn refs(&self) -> u32 {
        self.refs
    }

    /// Plain show/hide, the reference count is left alone
    pub fn set(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Counted show/hide
    ///
    /// Returns the visibility the platform cursor must switch to, if any:
    /// showing on the 0→1 transition, hiding on 1→0. Hiding at zero does
    /// nothing.
    pub fn set_counted(&mut self, show: bool) -> Option<bool> {
        if show {
            self.refs += 1;
            if self.refs == 1 {
                self.visible = true;
                return Some(true);
            }
        } else if self.refs > 0 {
            self.refs -= 1;
            if self.refs == 0 {
                self.visible = false;
                return Some(false);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{MouseAction, Wheel};

    fn moved(x: i16, y: i16) -> NormalizedInput {
        NormalizedInput::mouse(MouseAction::Move, x, y)
    }

    #[test]
    fn test_deltas_follow_previous_position() {
        let mut state = PointerState::default();
        state.record(moved(10, 10));
        let event = state.record(moved(15, 12));
        let mouse = event.as_mouse().unwrap();
        assert_eq!((mouse.dx, mouse.dy), (5, 2));
        assert_eq!((state.x, state.y), (15, 12));
    }

    #[test]
    fn test_wheel_accumulates() {
        let mut state = PointerState::default();
        state.record(NormalizedInput::wheel(Wheel::Up, 0, 0));
        state.record(NormalizedInput::wheel(Wheel::Up, 0, 0));
        state.record(NormalizedInput::wheel(Wheel::Down, 0, 0));
        assert_eq!(state.wheel, 1);
    }

    #[test]
    fn test_pressed_keys() {
        let mut state = PointerState::default();
        state.record(NormalizedInput::key(KeyAction::Down, KeyCode::A));
        assert!(state.is_pressed(KeyCode::A));
        state.record(NormalizedInput::key(KeyAction::Character, KeyCode::A));
        assert!(state.is_pressed(KeyCode::A));
        state.record(NormalizedInput::key(KeyAction::Up, KeyCode::A));
        assert!(!state.is_pressed(KeyCode::A));
    }

    #[test]
    fn test_counted_visibility_transitions() {
        let mut cursor = CursorVisibility::new(true);
        assert_eq!(cursor.set_counted(false), None);
        assert_eq!(cursor.refs(), 0);

        assert_eq!(cursor.set_counted(true), Some(true));
        assert_eq!(cursor.set_counted(true), None);
        assert_eq!(cursor.set_counted(false), None);
        assert_eq!(cursor.set_counted(false), Some(false));
        assert!(!cursor.is_visible());
        assert_eq!(cursor.set_counted(false), None);
        assert_eq!(cursor.refs(), 0);
    }
}
