//! Platform input sources and windows
//!
//! A platform adapter has two sides:
//! - an [`InputSource`] turning raw platform events into [`NormalizedInput`]s
//!   and feeding them to [`InputContext::handle`]
//! - a [`PlatformWindow`] the context calls back into for cursor control
//!
//! ```text
//! raw event → InputSource::normalize → InputContext::handle → hooks → binds
//!                                                              ↓
//!                                   propagate (true) / swallow (false)
//! ```

pub mod desktop;
pub mod headless;
pub mod terminal;

pub use desktop::WinitSource;
pub use headless::{CursorCall, HeadlessWindow};
pub use terminal::{TerminalSource, TerminalWindow};

use crate::input::{InputContext, KeyAction, NormalizedInput};

/// Cursor operations the input context needs from the host window
pub trait PlatformWindow {
    fn set_cursor_visible(&mut self, visible: bool);

    /// Warp the cursor to window coordinates
    fn set_cursor_position(&mut self, x: i16, y: i16);
}

/// A source of raw platform events
pub trait InputSource {
    /// Raw event type of the platform
    type Raw;

    /// Translate one raw event into normalized inputs, in dispatch order
    ///
    /// Unrecognized events translate to nothing. A printable key press yields
    /// a key-down followed by a character input.
    fn normalize(&mut self, raw: &Self::Raw) -> Vec<NormalizedInput>;

    /// Normalize and dispatch one raw event
    ///
    /// Returns true when the raw event should be passed on. When a key-down is
    /// consumed, the character input produced by the same key press is dropped
    /// without being dispatched.
    fn process(&mut self, input: &InputContext, raw: &Self::Raw) -> bool {
        let mut propagate = true;
        for normalized in self.normalize(raw) {
            if input.handle(normalized) {
                continue;
            }
            propagate = false;
            if matches!(
                normalized,
                NormalizedInput::Key {
                    action: KeyAction::Down,
                    ..
                }
            ) {
                break;
            }
        }
        propagate
    }
}

/// Clamp a platform coordinate into the signed 16-bit range
pub(crate) fn clamp_coord(value: f64) -> i16 {
    value.clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
}
