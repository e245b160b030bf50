//! Input events delivered to widgets
//!
//! Hosts translate their native keyboard events into [`Key`] before handing
//! them to a widget. Only the keys widgets actually react to get their own
//! variant; everything else collapses into [`Key::Other`].

use std::fmt;

/// A logical key press
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    Tab,
    ArrowUp,
    ArrowDown,
    /// A printable character
    Char(char),
    /// Any other key (modifiers, function keys, Backspace, ...)
    Other,
}

impl Key {
    /// Parse a DOM-style key name (`"Enter"`, `"ArrowDown"`, `"a"`)
    ///
    /// Single-character names become [`Key::Char`]; unknown names map to
    /// [`Key::Other`].
    pub fn from_name(name: &str) -> Key {
        match name {
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Enter => f.write_str("Enter"),
            Key::Escape => f.write_str("Escape"),
            Key::Tab => f.write_str("Tab"),
            Key::ArrowUp => f.write_str("ArrowUp"),
            Key::ArrowDown => f.write_str("ArrowDown"),
            Key::Char(c) => write!(f, "{}", c),
            Key::Other => f.write_str("Other"),
        }
    }
}
