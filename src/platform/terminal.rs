//! Terminal adapter built on crossterm

use std::io::{self, Stdout, Write};

use crossterm::cursor;
use crossterm::event::{
    Event, KeyCode as TermKeyCode, KeyEvent, KeyEventKind, ModifierKeyCode,
    MouseButton as TermMouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use tracing::warn;

use super::{InputSource, PlatformWindow};
use crate::config::KeyboardConfig;
use crate::input::{KeyAction, KeyCode, MouseAction, MouseButton, NormalizedInput, Wheel};

/// Translates crossterm terminal events
///
/// Mouse coordinates are terminal cells. Terminals without the keyboard
/// enhancement protocol never report key releases, so only key-down and
/// character inputs arrive from them.
#[derive(Debug, Clone)]
pub struct TerminalSource {
    uppercase_letters: bool,
}

impl Default for TerminalSource {
    fn default() -> Self {
        Self {
            uppercase_letters: true,
        }
    }
}

impl TerminalSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &KeyboardConfig) -> Self {
        Self {
            uppercase_letters: config.uppercase_letters,
        }
    }

    pub fn normalize_key(&self, event: &KeyEvent) -> Vec<NormalizedInput> {
        let mut inputs = Vec::with_capacity(2);
        let key = self.key_code(event.code);

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if let Some(key) = key {
                    inputs.push(NormalizedInput::key(KeyAction::Down, key));
                }
                if let TermKeyCode::Char(c) = event.code {
                    inputs.push(NormalizedInput::key(KeyAction::Character, KeyCode(c as u32)));
                }
            }
            KeyEventKind::Release => {
                if let Some(key) = key {
                    inputs.push(NormalizedInput::key(KeyAction::Up, key));
                }
            }
        }
        inputs
    }

    pub fn normalize_mouse(&self, event: &MouseEvent) -> Option<NormalizedInput> {
        let x = cell_coord(event.column);
        let y = cell_coord(event.row);
        let input = match event.kind {
            MouseEventKind::Down(button) => {
                NormalizedInput::mouse(MouseAction::ButtonDown(mouse_button(button)), x, y)
            }
            MouseEventKind::Up(button) => {
                NormalizedInput::mouse(MouseAction::ButtonUp(mouse_button(button)), x, y)
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                NormalizedInput::mouse(MouseAction::Move, x, y)
            }
            MouseEventKind::ScrollUp => NormalizedInput::wheel(Wheel::Up, x, y),
            MouseEventKind::ScrollDown => NormalizedInput::wheel(Wheel::Down, x, y),
            MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return None,
        };
        Some(input)
    }

    fn key_code(&self, code: TermKeyCode) -> Option<KeyCode> {
        let key = match code {
            TermKeyCode::Char(c) if c.is_ascii_lowercase() && !self.uppercase_letters => {
                KeyCode(c as u32)
            }
            TermKeyCode::Char(c) => KeyCode::from_ascii(c).unwrap_or(KeyCode(c as u32)),
            TermKeyCode::Backspace => KeyCode::BACKSPACE,
            TermKeyCode::Enter => KeyCode::RETURN,
            TermKeyCode::Left => KeyCode::LEFT,
            TermKeyCode::Right => KeyCode::RIGHT,
            TermKeyCode::Up => KeyCode::UP,
            TermKeyCode::Down => KeyCode::DOWN,
            TermKeyCode::Home => KeyCode::HOME,
            TermKeyCode::End => KeyCode::END,
            TermKeyCode::PageUp => KeyCode::PAGE_UP,
            TermKeyCode::PageDown => KeyCode::PAGE_DOWN,
            TermKeyCode::Tab | TermKeyCode::BackTab => KeyCode::TAB,
            TermKeyCode::Delete => KeyCode::DELETE,
            TermKeyCode::Insert => KeyCode::INSERT,
            TermKeyCode::F(n) => KeyCode::function(n)?,
            TermKeyCode::Esc => KeyCode::ESCAPE,
            TermKeyCode::CapsLock => KeyCode::CAPS,
            TermKeyCode::ScrollLock => KeyCode::SCROLL_LOCK,
            TermKeyCode::NumLock => KeyCode::NUM_LOCK,
            TermKeyCode::PrintScreen => KeyCode::PRINT_SCREEN,
            TermKeyCode::Pause => KeyCode::PAUSE,
            TermKeyCode::Modifier(modifier) => modifier_key(modifier)?,
            _ => return None,
        };
        Some(key)
    }
}

impl InputSource for TerminalSource {
    type Raw = Event;

    fn normalize(&mut self, raw: &Event) -> Vec<NormalizedInput> {
        match raw {
            Event::Key(event) => self.normalize_key(event),
            Event::Mouse(event) => self.normalize_mouse(event).into_iter().collect(),
            _ => Vec::new(),
        }
    }
}

fn mouse_button(button: TermMouseButton) -> MouseButton {
    match button {
        TermMouseButton::Left => MouseButton::Left,
        TermMouseButton::Middle => MouseButton::Middle,
        TermMouseButton::Right => MouseButton::Right,
    }
}

fn modifier_key(modifier: ModifierKeyCode) -> Option<KeyCode> {
    match modifier {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Some(KeyCode::SHIFT),
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => Some(KeyCode::CONTROL),
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Some(KeyCode::ALT),
        _ => None,
    }
}

fn cell_coord(cell: u16) -> i16 {
    i16::try_from(cell).unwrap_or(i16::MAX)
}

/// The controlling terminal as a cursor target
pub struct TerminalWindow<W: Write = Stdout> {
    out: W,
}

impl TerminalWindow {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalWindow<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> PlatformWindow for TerminalWindow<W> {
    fn set_cursor_visible(&mut self, visible: bool) {
        let result = if visible {
            execute!(self.out, cursor::Show)
        } else {
            execute!(self.out, cursor::Hide)
        };
        if let Err(e) = result {
            warn!(error = %e, visible, "Failed to change terminal cursor visibility");
        }
    }

    fn set_cursor_position(&mut self, x: i16, y: i16) {
        let column = u16::try_from(x).unwrap_or(0);
        let row = u16::try_from(y).unwrap_or(0);
        if let Err(e) = execute!(self.out, cursor::MoveTo(column, row)) {
            warn!(error = %e, x, y, "Failed to move terminal cursor");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: TermKeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_lowercase_letter_folds_for_key_down() {
        let source = TerminalSource::new();
        let inputs = source.normalize_key(&press(TermKeyCode::Char('a')));
        assert_eq!(
            inputs,
            vec![
                NormalizedInput::key(KeyAction::Down, KeyCode::A),
                NormalizedInput::key(KeyAction::Character, KeyCode(u32::from(b'a'))),
            ]
        );
    }

    #[test]
    fn test_folding_can_be_disabled() {
        let source = TerminalSource::from_config(&KeyboardConfig {
            uppercase_letters: false,
            ..KeyboardConfig::default()
        });
        let inputs = source.normalize_key(&press(TermKeyCode::Char('q')));
        assert_eq!(
            inputs[0],
            NormalizedInput::key(KeyAction::Down, KeyCode(u32::from(b'q')))
        );
    }

    #[test]
    fn test_special_keys_have_no_character() {
        let source = TerminalSource::new();
        assert_eq!(
            source.normalize_key(&press(TermKeyCode::Esc)),
            vec![NormalizedInput::key(KeyAction::Down, KeyCode::ESCAPE)]
        );
        assert_eq!(
            source.normalize_key(&press(TermKeyCode::F(3))),
            vec![NormalizedInput::key(KeyAction::Down, KeyCode(KeyCode::F1.0 + 2))]
        );
        assert!(source.normalize_key(&press(TermKeyCode::F(20))).is_empty());
    }

    #[test]
    fn test_release_yields_key_up() {
        let source = TerminalSource::new();
        let event = KeyEvent::new_with_kind(
            TermKeyCode::Left,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(
            source.normalize_key(&event),
            vec![NormalizedInput::key(KeyAction::Up, KeyCode::LEFT)]
        );
    }

    #[test]
    fn test_mouse_events() {
        let source = TerminalSource::new();
        assert_eq!(
            source.normalize_mouse(&mouse(MouseEventKind::Down(TermMouseButton::Left), 3, 4)),
            Some(NormalizedInput::mouse(
                MouseAction::ButtonDown(MouseButton::Left),
                3,
                4
            ))
        );
        assert_eq!(
            source.normalize_mouse(&mouse(MouseEventKind::Drag(TermMouseButton::Left), 5, 4)),
            Some(NormalizedInput::mouse(MouseAction::Move, 5, 4))
        );
        assert_eq!(
            source.normalize_mouse(&mouse(MouseEventKind::ScrollDown, 0, 0)),
            Some(NormalizedInput::wheel(Wheel::Down, 0, 0))
        );
        assert_eq!(source.normalize_mouse(&mouse(MouseEventKind::ScrollLeft, 0, 0)), None);
    }

    #[test]
    fn test_unrecognized_events_normalize_to_nothing() {
        let mut source = TerminalSource::new();
        assert!(source.normalize(&Event::FocusGained).is_empty());
        assert!(source.normalize(&Event::Resize(80, 24)).is_empty());
    }

    #[test]
    fn test_window_writes_escape_sequences() {
        let mut window = TerminalWindow::new(Vec::new());
        window.set_cursor_visible(false);
        window.set_cursor_position(-5, 2);
        let out = String::from_utf8(window.into_inner()).unwrap();
        assert!(out.contains("\x1b[?25l"));
        assert!(out.contains("\x1b[3;1H"));
    }
}
