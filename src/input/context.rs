//! Input context: lifecycle, dispatch and the application-facing API

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use enum_map::EnumMap;
use tracing::{info, trace, warn};

use super::error::InputError;
use super::events::{
    EventKind, InputEvent, KeyAction, MouseBindKind, MouseButton, NormalizedInput,
};
use super::geometry::Rect;
use super::handler::{Hook, KeyHandler, MouseHandler};
use super::hooks::{self, HookRegistry};
use super::key_binds::{self, KeyBind, KeyBindRegistry};
use super::keys::KeyCode;
use super::mouse_binds::{self, MouseBind, MouseBindRegistry};
use super::state::PointerState;
use crate::config::InputConfig;
use crate::platform::PlatformWindow;

/// Every registry, alive between initialize and shutdown
#[derive(Debug)]
struct Registries {
    hooks: HookRegistry,
    keys: EnumMap<KeyAction, KeyBindRegistry>,
    mice: EnumMap<MouseBindKind, MouseBindRegistry>,
}

impl Registries {
    fn new() -> Self {
        Self {
            hooks: HookRegistry::new(),
            keys: EnumMap::from_fn(KeyBindRegistry::new),
            mice: EnumMap::from_fn(MouseBindRegistry::new),
        }
    }

    fn clear(&mut self) {
        self.hooks.clear();
        for (_, registry) in self.keys.iter_mut() {
            registry.clear();
        }
        for (_, registry) in self.mice.iter_mut() {
            registry.clear();
        }
    }
}

struct ContextInner {
    config: InputConfig,
    registries: Option<Registries>,
    window: Option<Box<dyn PlatformWindow>>,
    state: PointerState,
    block_keys: bool,
}

/// Shared handle to the input system
///
/// Cloning is cheap and every clone sees the same registries, so handlers can
/// capture a clone to add or remove hooks and binds while an event is being
/// dispatched. Such handlers form a reference cycle with the context that
/// [`InputContext::shutdown`] breaks.
///
/// The context is single-threaded; platform adapters call
/// [`InputContext::handle`] from the event pump's thread.
#[derive(Clone)]
pub struct InputContext {
    inner: Rc<RefCell<ContextInner>>,
}

impl InputContext {
    /// Creates an uninitialized context with default configuration
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    pub fn with_config(config: InputConfig) -> Self {
        let state = PointerState::new(config.cursor.visible);
        let block_keys = config.keyboard.block_keys;
        Self {
            inner: Rc::new(RefCell::new(ContextInner {
                config,
                registries: None,
                window: None,
                state,
                block_keys,
            })),
        }
    }

    pub fn config(&self) -> InputConfig {
        self.inner.borrow().config.clone()
    }

    /// Create the registries and attach the platform window
    ///
    /// Cursor, wheel and key state are reset. Fails without touching anything
    /// if the context is already initialized.
    pub fn initialize(&self, window: impl PlatformWindow + 'static) -> Result<(), InputError> {
        let mut inner = self.inner.borrow_mut();
        if inner.registries.is_some() {
            warn!("Input context initialized twice");
            return Err(InputError::AlreadyInitialized);
        }

        inner.registries = Some(Registries::new());
        inner.state = PointerState::new(inner.config.cursor.visible);
        inner.block_keys = inner.config.keyboard.block_keys;

        let mut window: Box<dyn PlatformWindow> = Box::new(window);
        if !inner.state.cursor.is_visible() {
            window.set_cursor_visible(false);
        }
        inner.window = Some(window);

        info!(
            profile = %inner.config.profile,
            block_keys = inner.block_keys,
            "Input context initialized"
        );
        Ok(())
    }

    /// Release every hook and bind and detach the window
    ///
    /// Outstanding bind handles stay valid but inert. Calling this on an
    /// uninitialized context does nothing.
    pub fn shutdown(&self) {
        let (registries, window) = {
            let mut inner = self.inner.borrow_mut();
            (inner.registries.take(), inner.window.take())
        };
        let Some(mut registries) = registries else {
            return;
        };

        // Handlers may own clones of this context; drop them outside the borrow
        registries.clear();
        drop(registries);
        drop(window);
        info!("Input context shut down");
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.borrow().registries.is_some()
    }

    fn with_registries<R>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut Registries) -> R,
    ) -> Result<R, InputError> {
        let mut inner = self.inner.borrow_mut();
        match inner.registries.as_mut() {
            Some(registries) => Ok(f(registries)),
            None => {
                warn!(op, "Input context not initialized");
                Err(InputError::NotInitialized)
            }
        }
    }

    // -- Hooks --

    /// Append a hook to the chain for `kind`
    pub fn add_hook(&self, kind: EventKind, hook: Hook) -> Result<(), InputError> {
        self.with_registries("add_hook", |r| r.hooks.add(kind, hook))
    }

    /// Remove the first registration of `hook` for `kind`
    pub fn remove_hook(&self, kind: EventKind, hook: &Hook) -> Result<(), InputError> {
        self.with_registries("remove_hook", |r| r.hooks.remove(kind, hook))
    }

    pub fn hook_count(&self, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .registries
            .as_ref()
            .map_or(0, |r| r.hooks.len(kind))
    }

    // -- Key binds --

    pub fn add_key_bind(
        &self,
        action: KeyAction,
        key: KeyCode,
        handler: KeyHandler,
    ) -> Result<KeyBind, InputError> {
        self.with_registries("add_key_bind", |r| r.keys[action].add(key, handler))
    }

    pub fn add_char_bind(&self, key: KeyCode, handler: KeyHandler) -> Result<KeyBind, InputError> {
        self.add_key_bind(KeyAction::Character, key, handler)
    }

    pub fn add_key_up_bind(&self, key: KeyCode, handler: KeyHandler) -> Result<KeyBind, InputError> {
        self.add_key_bind(KeyAction::Up, key, handler)
    }

    pub fn add_key_down_bind(
        &self,
        key: KeyCode,
        handler: KeyHandler,
    ) -> Result<KeyBind, InputError> {
        self.add_key_bind(KeyAction::Down, key, handler)
    }

    /// Remove every `action` bind on `key` whose handler is `handler`
    pub fn remove_key_bind(
        &self,
        action: KeyAction,
        key: KeyCode,
        handler: &KeyHandler,
    ) -> Result<(), InputError> {
        self.with_registries("remove_key_bind", |r| r.keys[action].remove(key, handler))
    }

    /// Remove by handle; equivalent to removing the handle's key and handler
    pub fn remove_key_bind_by_handle(&self, bind: &KeyBind) -> Result<(), InputError> {
        self.with_registries("remove_key_bind_by_handle", |r| {
            r.keys[bind.action()].remove_bind(bind)
        })
    }

    /// Number of `action` binds on `key`
    pub fn key_bind_count(&self, action: KeyAction, key: KeyCode) -> usize {
        self.inner
            .borrow()
            .registries
            .as_ref()
            .map_or(0, |r| r.keys[action].group_len(key))
    }

    /// Whether the `action` registry holds a bind-group for `key`
    pub fn has_key_group(&self, action: KeyAction, key: KeyCode) -> bool {
        self.inner
            .borrow()
            .registries
            .as_ref()
            .is_some_and(|r| r.keys[action].contains_key(key))
    }

    // -- Mouse binds --

    /// Add a mouse bind; `button` is ignored for move binds
    pub fn add_mouse_bind(
        &self,
        kind: MouseBindKind,
        rect: Rect,
        button: Option<MouseButton>,
        handler: MouseHandler,
    ) -> Result<MouseBind, InputError> {
        self.with_registries("add_mouse_bind", |r| r.mice[kind].add(rect, button, handler))
    }

    pub fn add_mouse_move_bind(
        &self,
        rect: Rect,
        handler: MouseHandler,
    ) -> Result<MouseBind, InputError> {
        self.add_mouse_bind(MouseBindKind::Move, rect, None, handler)
    }

    pub fn add_mouse_up_bind(
        &self,
        button: MouseButton,
        rect: Rect,
        handler: MouseHandler,
    ) -> Result<MouseBind, InputError> {
        self.add_mouse_bind(MouseBindKind::ButtonUp, rect, Some(button), handler)
    }

    pub fn add_mouse_down_bind(
        &self,
        button: MouseButton,
        rect: Rect,
        handler: MouseHandler,
    ) -> Result<MouseBind, InputError> {
        self.add_mouse_bind(MouseBindKind::ButtonDown, rect, Some(button), handler)
    }

    /// Remove every `kind` bind matching `(button, handler)`; for move binds
    /// the button is ignored
    pub fn remove_mouse_bind(
        &self,
        kind: MouseBindKind,
        button: Option<MouseButton>,
        handler: &MouseHandler,
    ) -> Result<(), InputError> {
        self.with_registries("remove_mouse_bind", |r| r.mice[kind].remove(button, handler))
    }

    pub fn remove_mouse_bind_by_handle(&self, bind: &MouseBind) -> Result<(), InputError> {
        self.with_registries("remove_mouse_bind_by_handle", |r| {
            r.mice[bind.kind()].remove_bind(bind)
        })
    }

    pub fn mouse_bind_count(&self, kind: MouseBindKind) -> usize {
        self.inner
            .borrow()
            .registries
            .as_ref()
            .map_or(0, |r| r.mice[kind].len())
    }

    // -- Dispatch --

    /// Route one normalized event through the hooks and binds
    ///
    /// Returns true if the platform should pass the raw message on, false if
    /// it was consumed. The steps are:
    /// 1. update cursor, wheel and key state (exactly once per event)
    /// 2. run the hook chain for the event kind; a veto ends dispatch
    /// 3. swallow keyboard events while keys are blocked
    /// 4. fire the matching key or mouse binds; their result is returned
    pub fn handle(&self, input: NormalizedInput) -> bool {
        let (event, chain) = {
            let mut inner = self.inner.borrow_mut();
            let inner = &mut *inner;
            let Some(registries) = inner.registries.as_ref() else {
                trace!(kind = ?input.kind(), "Input context not initialized, passing through");
                return true;
            };
            let event = inner.state.record(input);
            (event, registries.hooks.chain(event.kind()))
        };

        let kind = event.kind();
        trace!(?kind, hooks = chain.len(), "Dispatching event");

        if !chain.is_empty() && !hooks::run_chain(&chain, &event) {
            return false;
        }

        if kind.is_keyboard() && self.is_blocking_keys() {
            trace!(?kind, "Keyboard input blocked");
            return false;
        }

        match event {
            InputEvent::Keyboard(keyboard) => {
                let group = self.snapshot(|r| r.keys[keyboard.action].group(keyboard.key));
                key_binds::fire(&group, keyboard.key)
            }
            InputEvent::Mouse(mouse) => {
                let Some(bind_kind) = mouse.action.bind_kind() else {
                    return true;
                };
                let binds = self.snapshot(|r| r.mice[bind_kind].binds());
                mouse_binds::fire(&binds, mouse.button(), mouse.x, mouse.y)
            }
        }
    }

    /// Copy a bind list out of the registries, empty when shut down mid-dispatch
    fn snapshot<T>(&self, f: impl FnOnce(&Registries) -> Vec<T>) -> Vec<T> {
        self.inner
            .borrow()
            .registries
            .as_ref()
            .map(f)
            .unwrap_or_default()
    }

    // -- Queries and utilities --

    /// Whether `key` is currently held down
    pub fn key_state(&self, key: KeyCode) -> bool {
        self.inner.borrow().state.is_pressed(key)
    }

    /// Swallow all keyboard events that survive the hooks
    pub fn block_keys(&self, block: bool) {
        self.inner.borrow_mut().block_keys = block;
        trace!(block, "Keyboard blocking changed");
    }

    pub fn is_blocking_keys(&self) -> bool {
        self.inner.borrow().block_keys
    }

    /// Show or hide the cursor directly
    pub fn show_cursor(&self, show: bool) {
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        inner.state.cursor.set(show);
        if let Some(window) = inner.window.as_mut() {
            window.set_cursor_visible(show);
        }
    }

    /// Reference-counted show/hide
    ///
    /// The platform cursor is shown when the count goes from zero to one and
    /// hidden when it drops back to zero; hiding at zero is ignored.
    pub fn show_cursor_ref(&self, show: bool) {
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        if let Some(visible) = inner.state.cursor.set_counted(show)
            && let Some(window) = inner.window.as_mut()
        {
            window.set_cursor_visible(visible);
        }
    }

    pub fn is_cursor_showing(&self) -> bool {
        self.inner.borrow().state.cursor.is_visible()
    }

    /// Last known cursor position
    pub fn cursor_position(&self) -> (i16, i16) {
        let inner = self.inner.borrow();
        (inner.state.x, inner.state.y)
    }

    /// Move the cursor; the next mouse delta is measured from here
    pub fn set_cursor_position(&self, x: i16, y: i16) {
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        inner.state.x = x;
        inner.state.y = y;
        if let Some(window) = inner.window.as_mut() {
            window.set_cursor_position(x, y);
        }
    }

    /// Accumulated wheel notches since initialization
    pub fn wheel_position(&self) -> i32 {
        self.inner.borrow().state.wheel
    }
}

impl Default for InputContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InputContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("InputContext")
                .field("initialized", &inner.registries.is_some())
                .field("block_keys", &inner.block_keys)
                .field("state", &inner.state)
                .finish(),
            Err(_) => f.write_str("InputContext { <dispatching> }"),
        }
    }
}
