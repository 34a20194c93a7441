//! Callable handler types for hooks and binds
//!
//! Handlers are reference-counted closures. Whatever state a handler needs is
//! captured by the closure itself. Two handlers are the same handler when they
//! share an allocation, i.e. one was cloned from the other; that identity is
//! what removal by handler matches on.

use std::fmt;
use std::rc::Rc;

use super::events::{InputEvent, MouseButton};
use super::keys::KeyCode;

macro_rules! handler_identity {
    ($name:ident) => {
        impl $name {
            /// Returns true if both refer to the same closure
            pub fn same(&self, other: &Self) -> bool {
                std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.same(other)
            }
        }

        impl Eq for $name {}

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&Rc::as_ptr(&self.0).cast::<()>())
                    .finish()
            }
        }
    };
}

/// Global observer for every event of one kind
///
/// Returning false vetoes the event: later hooks and all binds are skipped and
/// the platform adapter swallows the message.
#[derive(Clone)]
pub struct Hook(Rc<dyn Fn(&InputEvent) -> bool>);

impl Hook {
    pub fn new(f: impl Fn(&InputEvent) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub(crate) fn call(&self, event: &InputEvent) -> bool {
        (self.0)(event)
    }
}

handler_identity!(Hook);

/// Handler for a key bind, called with the bound key code
#[derive(Clone)]
pub struct KeyHandler(Rc<dyn Fn(KeyCode) -> bool>);

impl KeyHandler {
    pub fn new(f: impl Fn(KeyCode) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub(crate) fn call(&self, key: KeyCode) -> bool {
        (self.0)(key)
    }
}

handler_identity!(KeyHandler);

/// Handler for a mouse bind, called with the button (none for movement) and
/// the cursor position
#[derive(Clone)]
pub struct MouseHandler(Rc<dyn Fn(Option<MouseButton>, i16, i16) -> bool>);

impl MouseHandler {
    pub fn new(f: impl Fn(Option<MouseButton>, i16, i16) -> bool + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub(crate) fn call(&self, button: Option<MouseButton>, x: i16, y: i16) -> bool {
        (self.0)(button, x, y)
    }
}

handler_identity!(MouseHandler);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_follows_clones() {
        let a = KeyHandler::new(|_| true);
        let b = a.clone();
        let c = KeyHandler::new(|_| true);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_sized_closures_are_distinct() {
        let a = Hook::new(|_| true);
        let b = Hook::new(|_| true);
        assert!(!a.same(&b));
    }
}
