//! Key-code-indexed keyboard binds

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use super::events::KeyAction;
use super::handler::KeyHandler;
use super::keys::KeyCode;

#[derive(Debug)]
pub(crate) struct KeyBindEntry {
    key: KeyCode,
    action: KeyAction,
    handler: RefCell<KeyHandler>,
    live: Cell<bool>,
}

impl KeyBindEntry {
    pub(crate) fn is_live(&self) -> bool {
        self.live.get()
    }

    pub(crate) fn kill(&self) {
        self.live.set(false);
    }

    fn handler(&self) -> KeyHandler {
        self.handler.borrow().clone()
    }
}

/// Handle to a registered key bind
///
/// The handle shares the bind with its registry: a new handler set through it
/// takes effect on the next dispatch. The key and kind are fixed.
#[derive(Debug, Clone)]
pub struct KeyBind {
    entry: Rc<KeyBindEntry>,
}

impl KeyBind {
    pub fn key(&self) -> KeyCode {
        self.entry.key
    }

    pub fn action(&self) -> KeyAction {
        self.entry.action
    }

    pub fn handler(&self) -> KeyHandler {
        self.entry.handler()
    }

    /// Replace the handler (and with it any captured state)
    pub fn set_handler(&self, handler: KeyHandler) {
        *self.entry.handler.borrow_mut() = handler;
    }

    /// False once the bind was removed or the context shut down
    pub fn is_bound(&self) -> bool {
        self.entry.is_live()
    }
}

/// Keyboard binds of one kind, grouped by key code
///
/// A key maps to at most one bind-group; a group that becomes empty is
/// removed from the index.
#[derive(Debug)]
pub struct KeyBindRegistry {
    action: KeyAction,
    groups: HashMap<KeyCode, Vec<Rc<KeyBindEntry>>>,
}

impl KeyBindRegistry {
    pub fn new(action: KeyAction) -> Self {
        Self {
            action,
            groups: HashMap::new(),
        }
    }

    /// Append a bind to the group for `key`, creating the group if needed
    pub fn add(&mut self, key: KeyCode, handler: KeyHandler) -> KeyBind {
        let entry = Rc::new(KeyBindEntry {
            key,
            action: self.action,
            handler: RefCell::new(handler),
            live: Cell::new(true),
        });
        let group = self.groups.entry(key).or_default();
        group.push(entry.clone());
        debug!(action = ?self.action, %key, group_len = group.len(), "Key bind added");
        KeyBind { entry }
    }

    /// Remove every bind in the group for `key` whose handler is `handler`
    pub fn remove(&mut self, key: KeyCode, handler: &KeyHandler) {
        let Some(group) = self.groups.get_mut(&key) else {
            return;
        };

        let before = group.len();
        group.retain(|entry| {
            let matches = entry.handler().same(handler);
            if matches {
                entry.kill();
            }
            !matches
        });
        let removed = before - group.len();

        if group.is_empty() {
            self.groups.remove(&key);
        }
        if removed > 0 {
            debug!(action = ?self.action, %key, removed, "Key bind removed");
        }
    }

    /// Same as `remove(bind.key(), &bind.handler())`
    pub fn remove_bind(&mut self, bind: &KeyBind) {
        self.remove(bind.key(), &bind.handler());
    }

    pub fn action(&self) -> KeyAction {
        self.action
    }

    pub fn contains_key(&self, key: KeyCode) -> bool {
        self.groups.contains_key(&key)
    }

    /// Number of binds registered for `key`
    pub fn group_len(&self, key: KeyCode) -> usize {
        self.groups.get(&key).map_or(0, Vec::len)
    }

    /// Number of keys with at least one bind
    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    /// Snapshot of the group for `key`
    pub(crate) fn group(&self, key: KeyCode) -> Vec<Rc<KeyBindEntry>> {
        self.groups.get(&key).cloned().unwrap_or_default()
    }

    pub fn clear(&mut self) {
        for (_, group) in self.groups.drain() {
            for entry in group {
                entry.kill();
            }
        }
    }
}

/// Call every live bind of a group snapshot with `key`
///
/// All binds run even after one returns false; the result is the AND of all
/// results. An empty group passes.
pub(crate) fn fire(group: &[Rc<KeyBindEntry>], key: KeyCode) -> bool {
    let mut propagate = true;
    for entry in group {
        if !entry.is_live() {
            continue;
        }
        if !entry.handler().call(key) {
            propagate = false;
        }
    }
    propagate
}
