//! Input dispatch
//!
//! Normalized keyboard and mouse events are routed through two kinds of
//! subscribers:
//! - hooks observe every event of one kind and may veto it
//! - binds fire for one key code, or for a mouse event inside a rectangle
//!
//! # Architecture
//!
//! ```text
//! platform adapter → NormalizedInput → InputContext::handle
//!                                          ↓
//!                              cursor / wheel / key state
//!                                          ↓
//!                            hook chain (stops on first veto)
//!                                          ↓
//!                      key or mouse binds (all run, results ANDed)
//!                                          ↓
//!                       true = propagate, false = swallow
//! ```
//!
//! # Usage
//!
//! ```
//! use input_relay::input::{InputContext, KeyCode, KeyHandler, NormalizedInput, KeyAction};
//! use input_relay::platform::HeadlessWindow;
//!
//! let input = InputContext::new();
//! input.initialize(HeadlessWindow::new()).unwrap();
//!
//! input
//!     .add_key_down_bind(KeyCode::ESCAPE, KeyHandler::new(|_| false))
//!     .unwrap();
//!
//! // Consumed by the bind
//! assert!(!input.handle(NormalizedInput::key(KeyAction::Down, KeyCode::ESCAPE)));
//! input.shutdown();
//! ```

mod context;
mod error;
mod events;
mod geometry;
mod handler;
mod hooks;
mod key_binds;
mod keys;
mod mouse_binds;
mod state;

// Re-export public API
pub use context::InputContext;
pub use error::InputError;
pub use events::{
    EventKind, InputEvent, KeyAction, KeyboardEvent, MouseAction, MouseBindKind, MouseButton,
    MouseEvent, NormalizedInput, Wheel,
};
pub use geometry::Rect;
pub use handler::{Hook, KeyHandler, MouseHandler};
pub use hooks::HookRegistry;
pub use key_binds::{KeyBind, KeyBindRegistry};
pub use keys::KeyCode;
pub use mouse_binds::{MouseBind, MouseBindRegistry};
pub use state::{CursorVisibility, PointerState};
