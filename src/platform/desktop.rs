//! Desktop window adapter built on winit

use std::sync::Arc;

use tracing::warn;
use winit::dpi::{PhysicalPosition, Position};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};
use winit::window::Window;

use super::{InputSource, PlatformWindow, clamp_coord};
use crate::input::{KeyAction, KeyCode, MouseAction, MouseButton, NormalizedInput, Wheel};

/// Translates winit window events
///
/// winit reports button and wheel events without coordinates, so the source
/// remembers the last cursor position and attaches it to them.
#[derive(Debug, Clone, Default)]
pub struct WinitSource {
    cursor: (i16, i16),
}

impl WinitSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position seen by this source
    pub fn cursor(&self) -> (i16, i16) {
        self.cursor
    }

    /// Key press or release, with the text the press produced
    pub fn normalize_key(
        &self,
        physical_key: PhysicalKey,
        state: ElementState,
        text: Option<&str>,
    ) -> Vec<NormalizedInput> {
        let mut inputs = Vec::with_capacity(2);
        let code = match physical_key {
            PhysicalKey::Code(code) => key_code_from_winit(code),
            PhysicalKey::Unidentified(_) => None,
        };

        match state {
            ElementState::Pressed => {
                if let Some(key) = code {
                    inputs.push(NormalizedInput::key(KeyAction::Down, key));
                }
                if let Some(c) = text.and_then(|text| text.chars().next()) {
                    inputs.push(NormalizedInput::key(KeyAction::Character, KeyCode(c as u32)));
                }
            }
            ElementState::Released => {
                if let Some(key) = code {
                    inputs.push(NormalizedInput::key(KeyAction::Up, key));
                }
            }
        }
        inputs
    }

    pub fn normalize_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> NormalizedInput {
        self.cursor = (clamp_coord(position.x), clamp_coord(position.y));
        NormalizedInput::mouse(MouseAction::Move, self.cursor.0, self.cursor.1)
    }

    pub fn normalize_button(
        &self,
        state: ElementState,
        button: winit::event::MouseButton,
    ) -> Option<NormalizedInput> {
        let button = mouse_button_from_winit(button)?;
        let action = match state {
            ElementState::Pressed => MouseAction::ButtonDown(button),
            ElementState::Released => MouseAction::ButtonUp(button),
        };
        Some(NormalizedInput::mouse(action, self.cursor.0, self.cursor.1))
    }

    pub fn normalize_wheel(&self, delta: MouseScrollDelta) -> Option<NormalizedInput> {
        let wheel = wheel_from_winit(delta);
        (wheel != Wheel::Stationary)
            .then(|| NormalizedInput::wheel(wheel, self.cursor.0, self.cursor.1))
    }
}

impl InputSource for WinitSource {
    type Raw = WindowEvent;

    fn normalize(&mut self, raw: &WindowEvent) -> Vec<NormalizedInput> {
        match raw {
            WindowEvent::KeyboardInput { event, .. } => {
                self.normalize_key(event.physical_key, event.state, event.text.as_deref())
            }
            WindowEvent::CursorMoved { position, .. } => {
                vec![self.normalize_cursor_moved(*position)]
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.normalize_button(*state, *button).into_iter().collect()
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.normalize_wheel(*delta).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }
}

impl PlatformWindow for Arc<Window> {
    fn set_cursor_visible(&mut self, visible: bool) {
        Window::set_cursor_visible(self, visible);
    }

    fn set_cursor_position(&mut self, x: i16, y: i16) {
        let position = Position::Physical(PhysicalPosition::new(i32::from(x), i32::from(y)));
        if let Err(e) = Window::set_cursor_position(self, position) {
            warn!(error = %e, x, y, "Failed to move cursor");
        }
    }
}

fn mouse_button_from_winit(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

fn wheel_from_winit(delta: MouseScrollDelta) -> Wheel {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(y),
        MouseScrollDelta::PixelDelta(pos) => pos.y,
    };
    if y > 0.0 {
        Wheel::Up
    } else if y < 0.0 {
        Wheel::Down
    } else {
        Wheel::Stationary
    }
}

/// Convert a winit physical key code
pub fn key_code_from_winit(key: WinitKeyCode) -> Option<KeyCode> {
    use WinitKeyCode as WK;
    let code = match key {
        WK::Backspace => KeyCode::BACKSPACE,
        WK::Tab => KeyCode::TAB,
        WK::Enter | WK::NumpadEnter => KeyCode::RETURN,
        WK::ShiftLeft | WK::ShiftRight => KeyCode::SHIFT,
        WK::ControlLeft | WK::ControlRight => KeyCode::CONTROL,
        WK::AltLeft | WK::AltRight => KeyCode::ALT,
        WK::Pause => KeyCode::PAUSE,
        WK::CapsLock => KeyCode::CAPS,
        WK::Escape => KeyCode::ESCAPE,
        WK::Space => KeyCode::SPACE,
        WK::PageUp => KeyCode::PAGE_UP,
        WK::PageDown => KeyCode::PAGE_DOWN,
        WK::End => KeyCode::END,
        WK::Home => KeyCode::HOME,
        WK::ArrowLeft => KeyCode::LEFT,
        WK::ArrowUp => KeyCode::UP,
        WK::ArrowRight => KeyCode::RIGHT,
        WK::ArrowDown => KeyCode::DOWN,
        WK::PrintScreen => KeyCode::PRINT_SCREEN,
        WK::Insert => KeyCode::INSERT,
        WK::Delete => KeyCode::DELETE,

        WK::Digit0 => KeyCode(u32::from(b'0')),
        WK::Digit1 => KeyCode(u32::from(b'1')),
        WK::Digit2 => KeyCode(u32::from(b'2')),
        WK::Digit3 => KeyCode(u32::from(b'3')),
        WK::Digit4 => KeyCode(u32::from(b'4')),
        WK::Digit5 => KeyCode(u32::from(b'5')),
        WK::Digit6 => KeyCode(u32::from(b'6')),
        WK::Digit7 => KeyCode(u32::from(b'7')),
        WK::Digit8 => KeyCode(u32::from(b'8')),
        WK::Digit9 => KeyCode(u32::from(b'9')),

        WK::KeyA => KeyCode(u32::from(b'A')),
        WK::KeyB => KeyCode(u32::from(b'B')),
        WK::KeyC => KeyCode(u32::from(b'C')),
        WK::KeyD => KeyCode(u32::from(b'D')),
        WK::KeyE => KeyCode(u32::from(b'E')),
        WK::KeyF => KeyCode(u32::from(b'F')),
        WK::KeyG => KeyCode(u32::from(b'G')),
        WK::KeyH => KeyCode(u32::from(b'H')),
        WK::KeyI => KeyCode(u32::from(b'I')),
        WK::KeyJ => KeyCode(u32::from(b'J')),
        WK::KeyK => KeyCode(u32::from(b'K')),
        WK::KeyL => KeyCode(u32::from(b'L')),
        WK::KeyM => KeyCode(u32::from(b'M')),
        WK::KeyN => KeyCode(u32::from(b'N')),
        WK::KeyO => KeyCode(u32::from(b'O')),
        WK::KeyP => KeyCode(u32::from(b'P')),
        WK::KeyQ => KeyCode(u32::from(b'Q')),
        WK::KeyR => KeyCode(u32::from(b'R')),
        WK::KeyS => KeyCode(u32::from(b'S')),
        WK::KeyT => KeyCode(u32::from(b'T')),
        WK::KeyU => KeyCode(u32::from(b'U')),
        WK::KeyV => KeyCode(u32::from(b'V')),
        WK::KeyW => KeyCode(u32::from(b'W')),
        WK::KeyX => KeyCode(u32::from(b'X')),
        WK::KeyY => KeyCode(u32::from(b'Y')),
        WK::KeyZ => KeyCode(u32::from(b'Z')),

        WK::Numpad0 => KeyCode::NUMPAD_0,
        WK::Numpad1 => KeyCode(KeyCode::NUMPAD_0.0 + 1),
        WK::Numpad2 => KeyCode(KeyCode::NUMPAD_0.0 + 2),
        WK::Numpad3 => KeyCode(KeyCode::NUMPAD_0.0 + 3),
        WK::Numpad4 => KeyCode(KeyCode::NUMPAD_0.0 + 4),
        WK::Numpad5 => KeyCode(KeyCode::NUMPAD_0.0 + 5),
        WK::Numpad6 => KeyCode(KeyCode::NUMPAD_0.0 + 6),
        WK::Numpad7 => KeyCode(KeyCode::NUMPAD_0.0 + 7),
        WK::Numpad8 => KeyCode(KeyCode::NUMPAD_0.0 + 8),
        WK::Numpad9 => KeyCode::NUMPAD_9,
        WK::NumpadMultiply => KeyCode::MULTIPLY,
        WK::NumpadAdd => KeyCode::ADD,
        WK::NumpadComma => KeyCode::SEPARATOR,
        WK::NumpadSubtract => KeyCode::SUBTRACT,
        WK::NumpadDecimal => KeyCode::DECIMAL,
        WK::NumpadDivide => KeyCode::DIVIDE,

        WK::F1 => KeyCode::F1,
        WK::F2 => KeyCode(KeyCode::F1.0 + 1),
        WK::F3 => KeyCode(KeyCode::F1.0 + 2),
        WK::F4 => KeyCode(KeyCode::F1.0 + 3),
        WK::F5 => KeyCode(KeyCode::F1.0 + 4),
        WK::F6 => KeyCode(KeyCode::F1.0 + 5),
        WK::F7 => KeyCode(KeyCode::F1.0 + 6),
        WK::F8 => KeyCode(KeyCode::F1.0 + 7),
        WK::F9 => KeyCode(KeyCode::F1.0 + 8),
        WK::F10 => KeyCode(KeyCode::F1.0 + 9),
        WK::F11 => KeyCode(KeyCode::F1.0 + 10),
        WK::F12 => KeyCode::F12,

        WK::NumLock => KeyCode::NUM_LOCK,
        WK::ScrollLock => KeyCode::SCROLL_LOCK,

        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(key_code_from_winit(WinitKeyCode::KeyA), Some(KeyCode::A));
        assert_eq!(key_code_from_winit(WinitKeyCode::KeyZ), Some(KeyCode::Z));
        assert_eq!(key_code_from_winit(WinitKeyCode::Digit9), Some(KeyCode::NUM_9));
        assert_eq!(key_code_from_winit(WinitKeyCode::F12), Some(KeyCode::F12));
        assert_eq!(key_code_from_winit(WinitKeyCode::ShiftRight), Some(KeyCode::SHIFT));
        assert_eq!(key_code_from_winit(WinitKeyCode::F24), None);
    }

    #[test]
    fn test_press_yields_key_down_then_character() {
        let source = WinitSource::new();
        let inputs = source.normalize_key(
            PhysicalKey::Code(WinitKeyCode::KeyA),
            ElementState::Pressed,
            Some("a"),
        );
        assert_eq!(
            inputs,
            vec![
                NormalizedInput::key(KeyAction::Down, KeyCode::A),
                NormalizedInput::key(KeyAction::Character, KeyCode(u32::from(b'a'))),
            ]
        );
    }

    #[test]
    fn test_release_yields_key_up_only() {
        let source = WinitSource::new();
        let inputs = source.normalize_key(
            PhysicalKey::Code(WinitKeyCode::KeyA),
            ElementState::Released,
            None,
        );
        assert_eq!(inputs, vec![NormalizedInput::key(KeyAction::Up, KeyCode::A)]);
    }

    #[test]
    fn test_buttons_use_last_cursor_position() {
        let mut source = WinitSource::new();
        source.normalize_cursor_moved(PhysicalPosition::new(12.7, 40.2));
        let input = source
            .normalize_button(ElementState::Pressed, winit::event::MouseButton::Right)
            .unwrap();
        assert_eq!(
            input,
            NormalizedInput::mouse(MouseAction::ButtonDown(MouseButton::Right), 12, 40)
        );
        assert!(
            source
                .normalize_button(ElementState::Pressed, winit::event::MouseButton::Back)
                .is_none()
        );
    }

    #[test]
    fn test_coordinates_clamp_to_i16() {
        let mut source = WinitSource::new();
        source.normalize_cursor_moved(PhysicalPosition::new(70000.0, -70000.0));
        assert_eq!(source.cursor(), (i16::MAX, i16::MIN));
    }

    #[test]
    fn test_wheel_direction() {
        let source = WinitSource::new();
        assert_eq!(
            source.normalize_wheel(MouseScrollDelta::LineDelta(0.0, 1.0)),
            Some(NormalizedInput::wheel(Wheel::Up, 0, 0))
        );
        assert_eq!(
            source.normalize_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -3.0))),
            Some(NormalizedInput::wheel(Wheel::Down, 0, 0))
        );
        assert_eq!(source.normalize_wheel(MouseScrollDelta::LineDelta(2.0, 0.0)), None);
    }
}
