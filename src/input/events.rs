//! Normalized input events

use enum_map::Enum;

use super::keys::KeyCode;

/// Every kind of event the dispatcher routes
///
/// Hook chains are kept per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum EventKind {
    /// Character input
    Character,
    /// A keyboard key is released
    KeyUp,
    /// A keyboard key is pressed
    KeyDown,
    MouseMove,
    MouseWheel,
    LeftButtonUp,
    LeftButtonDown,
    MiddleButtonUp,
    MiddleButtonDown,
    RightButtonUp,
    RightButtonDown,
}

impl EventKind {
    /// All kinds in declaration order
    pub const ALL: [EventKind; 11] = [
        EventKind::Character,
        EventKind::KeyUp,
        EventKind::KeyDown,
        EventKind::MouseMove,
        EventKind::MouseWheel,
        EventKind::LeftButtonUp,
        EventKind::LeftButtonDown,
        EventKind::MiddleButtonUp,
        EventKind::MiddleButtonDown,
        EventKind::RightButtonUp,
        EventKind::RightButtonDown,
    ];

    /// Returns true for character, key-up and key-down
    pub fn is_keyboard(self) -> bool {
        matches!(
            self,
            EventKind::Character | EventKind::KeyUp | EventKind::KeyDown
        )
    }

    pub fn is_mouse(self) -> bool {
        !self.is_keyboard()
    }
}

/// Keyboard event kinds, also the kinds of keyboard binds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum KeyAction {
    Character,
    Up,
    Down,
}

impl KeyAction {
    pub fn kind(self) -> EventKind {
        match self {
            KeyAction::Character => EventKind::Character,
            KeyAction::Up => EventKind::KeyUp,
            KeyAction::Down => EventKind::KeyDown,
        }
    }
}

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Wheel movement carried by a mouse event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Wheel {
    #[default]
    Stationary,
    Up,
    Down,
}

impl Wheel {
    /// Notches the wheel moved (+1 up, -1 down)
    pub fn notches(self) -> i32 {
        match self {
            Wheel::Stationary => 0,
            Wheel::Up => 1,
            Wheel::Down => -1,
        }
    }
}

/// Mouse event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Move,
    Wheel,
    ButtonUp(MouseButton),
    ButtonDown(MouseButton),
}

impl MouseAction {
    pub fn kind(self) -> EventKind {
        match self {
            MouseAction::Move => EventKind::MouseMove,
            MouseAction::Wheel => EventKind::MouseWheel,
            MouseAction::ButtonUp(MouseButton::Left) => EventKind::LeftButtonUp,
            MouseAction::ButtonUp(MouseButton::Middle) => EventKind::MiddleButtonUp,
            MouseAction::ButtonUp(MouseButton::Right) => EventKind::RightButtonUp,
            MouseAction::ButtonDown(MouseButton::Left) => EventKind::LeftButtonDown,
            MouseAction::ButtonDown(MouseButton::Middle) => EventKind::MiddleButtonDown,
            MouseAction::ButtonDown(MouseButton::Right) => EventKind::RightButtonDown,
        }
    }

    /// The pressed or released button, if any
    pub fn button(self) -> Option<MouseButton> {
        match self {
            MouseAction::ButtonUp(button) | MouseAction::ButtonDown(button) => Some(button),
            MouseAction::Move | MouseAction::Wheel => None,
        }
    }

    /// Which mouse bind registry handles this action (wheel has none)
    pub fn bind_kind(self) -> Option<MouseBindKind> {
        match self {
            MouseAction::Move => Some(MouseBindKind::Move),
            MouseAction::ButtonUp(_) => Some(MouseBindKind::ButtonUp),
            MouseAction::ButtonDown(_) => Some(MouseBindKind::ButtonDown),
            MouseAction::Wheel => None,
        }
    }
}

/// Mouse bind kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum MouseBindKind {
    Move,
    ButtonUp,
    ButtonDown,
}

/// Keyboard payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub action: KeyAction,
    pub key: KeyCode,
}

/// Mouse payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub action: MouseAction,
    pub x: i16,
    pub y: i16,
    /// Movement since the previous mouse event
    pub dx: i16,
    pub dy: i16,
    pub wheel: Wheel,
}

impl MouseEvent {
    pub fn button(&self) -> Option<MouseButton> {
        self.action.button()
    }
}

/// Event delivered to hooks
///
/// The payload is fixed by the variant, so a keyboard kind can never carry
/// mouse data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Keyboard(KeyboardEvent),
    Mouse(MouseEvent),
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Keyboard(event) => event.action.kind(),
            InputEvent::Mouse(event) => event.action.kind(),
        }
    }

    pub fn as_keyboard(&self) -> Option<&KeyboardEvent> {
        match self {
            InputEvent::Keyboard(event) => Some(event),
            InputEvent::Mouse(_) => None,
        }
    }

    pub fn as_mouse(&self) -> Option<&MouseEvent> {
        match self {
            InputEvent::Mouse(event) => Some(event),
            InputEvent::Keyboard(_) => None,
        }
    }
}

/// What a platform adapter hands to the dispatcher
///
/// Mouse deltas are not part of it: the dispatcher derives them from the
/// previous cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizedInput {
    Key {
        action: KeyAction,
        key: KeyCode,
    },
    Mouse {
        action: MouseAction,
        x: i16,
        y: i16,
        wheel: Wheel,
    },
}

impl NormalizedInput {
    pub fn key(action: KeyAction, key: KeyCode) -> Self {
        Self::Key { action, key }
    }

    pub fn mouse(action: MouseAction, x: i16, y: i16) -> Self {
        Self::Mouse {
            action,
            x,
            y,
            wheel: Wheel::Stationary,
        }
    }

    pub fn wheel(wheel: Wheel, x: i16, y: i16) -> Self {
        Self::Mouse {
            action: MouseAction::Wheel,
            x,
            y,
            wheel,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            NormalizedInput::Key { action, .. } => action.kind(),
            NormalizedInput::Mouse { action, .. } => action.kind(),
        }
    }
}
