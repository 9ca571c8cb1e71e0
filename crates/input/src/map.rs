//! Key mapping from terminal events to controller keys.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Keys tracked by the [`KeyboardController`](crate::KeyboardController).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputKey {
    Up,
    Right,
    Down,
    Left,
    Space,
    Shift,
    Alt,
    Meta,
}

impl InputKey {
    pub const ALL: [InputKey; 8] = [
        InputKey::Up,
        InputKey::Right,
        InputKey::Down,
        InputKey::Left,
        InputKey::Space,
        InputKey::Shift,
        InputKey::Alt,
        InputKey::Meta,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputKey::Up => "up",
            InputKey::Right => "right",
            InputKey::Down => "down",
            InputKey::Left => "left",
            InputKey::Space => "space",
            InputKey::Shift => "shift",
            InputKey::Alt => "alt",
            InputKey::Meta => "meta",
        }
    }
}

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a terminal key code to a controller key.
///
/// Arrows and WASD drive the four directions. Bare modifier keys are only
/// reported by terminals with keyboard enhancement enabled.
pub fn map_key_code(code: KeyCode) -> Option<InputKey> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(InputKey::Up),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(InputKey::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(InputKey::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(InputKey::Left),
        KeyCode::Char(' ') => Some(InputKey::Space),
        KeyCode::Modifier(modifier) => match modifier {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Some(InputKey::Shift),
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => Some(InputKey::Alt),
            ModifierKeyCode::LeftMeta
            | ModifierKeyCode::RightMeta
            | ModifierKeyCode::LeftSuper
            | ModifierKeyCode::RightSuper => Some(InputKey::Meta),
            _ => None,
        },
        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd() {
        assert_eq!(map_key_code(KeyCode::Up), Some(InputKey::Up));
        assert_eq!(map_key_code(KeyCode::Char('W')), Some(InputKey::Up));
        assert_eq!(map_key_code(KeyCode::Char('a')), Some(InputKey::Left));
        assert_eq!(map_key_code(KeyCode::Right), Some(InputKey::Right));
        assert_eq!(map_key_code(KeyCode::Char('s')), Some(InputKey::Down));
    }

    #[test]
    fn test_space_and_modifiers() {
        assert_eq!(map_key_code(KeyCode::Char(' ')), Some(InputKey::Space));
        assert_eq!(
            map_key_code(KeyCode::Modifier(ModifierKeyCode::RightShift)),
            Some(InputKey::Shift)
        );
        assert_eq!(
            map_key_code(KeyCode::Modifier(ModifierKeyCode::LeftSuper)),
            Some(InputKey::Meta)
        );
        assert_eq!(map_key_code(KeyCode::Modifier(ModifierKeyCode::LeftControl)), None);
        assert_eq!(map_key_code(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_key_order_matches_index() {
        for (i, key) in InputKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }
}
