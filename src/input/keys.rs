//! Normalized key codes
//!
//! Key codes follow the virtual-key numbering used by desktop window systems.
//! ASCII digits `0`-`9` and uppercase letters `A`-`Z` map to their ASCII
//! values, so binds for letters should use the uppercase code.

use std::fmt;

/// A normalized key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: Self = Self(0x08);
    pub const TAB: Self = Self(0x09);
    pub const CLEAR: Self = Self(0x0C);
    pub const RETURN: Self = Self(0x0D);

    pub const SHIFT: Self = Self(0x10);
    pub const CONTROL: Self = Self(0x11);
    pub const ALT: Self = Self(0x12);
    pub const PAUSE: Self = Self(0x13);
    pub const CAPS: Self = Self(0x14);

    pub const ESCAPE: Self = Self(0x1B);

    pub const SPACE: Self = Self(0x20);
    pub const PAGE_UP: Self = Self(0x21);
    pub const PAGE_DOWN: Self = Self(0x22);
    pub const END: Self = Self(0x23);
    pub const HOME: Self = Self(0x24);
    pub const LEFT: Self = Self(0x25);
    pub const UP: Self = Self(0x26);
    pub const RIGHT: Self = Self(0x27);
    pub const DOWN: Self = Self(0x28);
    pub const PRINT_SCREEN: Self = Self(0x2C);
    pub const INSERT: Self = Self(0x2D);
    pub const DELETE: Self = Self(0x2E);

    pub const NUM_0: Self = Self(0x30);
    pub const NUM_9: Self = Self(0x39);
    pub const A: Self = Self(0x41);
    pub const B: Self = Self(0x42);
    pub const Q: Self = Self(0x51);
    pub const Z: Self = Self(0x5A);

    pub const NUMPAD_0: Self = Self(0x60);
    pub const NUMPAD_9: Self = Self(0x69);
    pub const MULTIPLY: Self = Self(0x6A);
    pub const ADD: Self = Self(0x6B);
    pub const SEPARATOR: Self = Self(0x6C);
    pub const SUBTRACT: Self = Self(0x6D);
    pub const DECIMAL: Self = Self(0x6E);
    pub const DIVIDE: Self = Self(0x6F);

    pub const F1: Self = Self(0x70);
    pub const F12: Self = Self(0x7B);

    pub const NUM_LOCK: Self = Self(0x90);
    pub const SCROLL_LOCK: Self = Self(0x91);

    /// Side-specific modifiers, reported by adapters that can tell them apart
    pub const LEFT_SHIFT: Self = Self(0xA0);
    pub const RIGHT_SHIFT: Self = Self(0xA1);
    pub const LEFT_CONTROL: Self = Self(0xA2);
    pub const RIGHT_CONTROL: Self = Self(0xA3);
    pub const LEFT_ALT: Self = Self(0xA4);
    pub const RIGHT_ALT: Self = Self(0xA5);

    /// Key code for an ASCII letter or digit, letters folded to uppercase
    pub fn from_ascii(c: char) -> Option<Self> {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' => Some(Self(c.to_ascii_uppercase() as u32)),
            _ => None,
        }
    }

    /// Function key `F{n}` for n in 1..=12
    pub fn function(n: u8) -> Option<Self> {
        (1..=12)
            .contains(&n)
            .then(|| Self(Self::F1.0 + u32::from(n) - 1))
    }

    /// Numpad digit key
    pub fn numpad(digit: u8) -> Option<Self> {
        (digit <= 9).then(|| Self(Self::NUMPAD_0.0 + u32::from(digit)))
    }
}

impl From<u32> for KeyCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match char::from_u32(self.0) {
            Some(c) if c.is_ascii_graphic() => write!(f, "{c}"),
            _ => write!(f, "0x{:02X}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_letters_fold_to_uppercase() {
        assert_eq!(KeyCode::from_ascii('a'), Some(KeyCode::A));
        assert_eq!(KeyCode::from_ascii('A'), Some(KeyCode(65)));
        assert_eq!(KeyCode::from_ascii('9'), Some(KeyCode::NUM_9));
        assert_eq!(KeyCode::from_ascii('#'), None);
    }

    #[test]
    fn test_function_and_numpad_ranges() {
        assert_eq!(KeyCode::function(1), Some(KeyCode::F1));
        assert_eq!(KeyCode::function(12), Some(KeyCode::F12));
        assert_eq!(KeyCode::function(0), None);
        assert_eq!(KeyCode::function(13), None);
        assert_eq!(KeyCode::numpad(9), Some(KeyCode::NUMPAD_9));
        assert_eq!(KeyCode::numpad(10), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyCode::A.to_string(), "A");
        assert_eq!(KeyCode::ESCAPE.to_string(), "0x1B");
    }
}
