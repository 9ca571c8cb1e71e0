//! Held-key tracking and direction lookup.
//!
//! Time is passed in explicitly as milliseconds so the controller stays
//! deterministic under test.

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{map_key_code, InputKey};
use crate::types::{Direction, Point};

/// Two presses of the same key closer than this count as a double tap.
pub const DOUBLE_TAP_MS: f64 = 300.0;

// Terminals without release events repeat presses while a key is held, so a
// key that has not been re-pressed for this long is treated as released.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KeyStatus {
    pub pressed: bool,
    pub double_tap: bool,
    /// Start of the current hold, or the last release for a double-tap check.
    pub timestamp: Option<f64>,
    last_seen: f64,
}

#[derive(Debug, Clone)]
pub struct KeyboardController {
    keys: [KeyStatus; 8],
    key_release_timeout_ms: Option<f64>,
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardController {
    pub fn new() -> Self {
        Self {
            keys: [KeyStatus::default(); 8],
            key_release_timeout_ms: Some(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    /// `None` disables auto-release, for terminals that report releases.
    pub fn with_key_release_timeout_ms(mut self, timeout_ms: Option<f64>) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> Option<f64> {
        self.key_release_timeout_ms
    }

    pub fn status(&self, key: InputKey) -> &KeyStatus {
        &self.keys[key.index()]
    }

    pub fn is_pressed(&self, key: InputKey) -> bool {
        self.status(key).pressed
    }

    pub fn is_double_tap(&self, key: InputKey) -> bool {
        self.status(key).double_tap
    }

    /// How long `key` has been held, if it is held.
    pub fn held_ms(&self, key: InputKey, now_ms: f64) -> Option<f64> {
        let status = self.status(key);
        match (status.pressed, status.timestamp) {
            (true, Some(start)) => Some((now_ms - start).max(0.0)),
            _ => None,
        }
    }

    pub fn pressed_keys(&self) -> ArrayVec<InputKey, 8> {
        InputKey::ALL
            .iter()
            .copied()
            .filter(|key| self.is_pressed(*key))
            .collect()
    }

    pub fn press(&mut self, key: InputKey, now_ms: f64) {
        let status = &mut self.keys[key.index()];
        status.last_seen = now_ms;
        if status.pressed {
            // auto-repeat of a held key
            return;
        }
        if let Some(previous) = status.timestamp {
            if now_ms - previous < DOUBLE_TAP_MS {
                status.double_tap = true;
            }
        }
        status.timestamp = Some(now_ms);
        status.pressed = true;
    }

    pub fn release(&mut self, key: InputKey, now_ms: f64) {
        let status = &mut self.keys[key.index()];
        if !status.pressed {
            return;
        }
        status.pressed = false;
        if status.double_tap {
            status.double_tap = false;
        } else {
            status.timestamp = Some(now_ms);
        }
    }

    /// Feed a terminal key event. Returns whether it was a tracked key.
    pub fn handle_event(&mut self, event: &KeyEvent, now_ms: f64) -> bool {
        let Some(key) = map_key_code(event.code) else {
            return false;
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(key, now_ms),
            KeyEventKind::Release => self.release(key, now_ms),
        }
        true
    }

    /// Auto-release keys that stopped repeating.
    pub fn update(&mut self, now_ms: f64) {
        let Some(timeout) = self.key_release_timeout_ms else {
            return;
        };
        for key in InputKey::ALL {
            let status = self.keys[key.index()];
            if status.pressed && now_ms - status.last_seen > timeout {
                log::trace!("auto-release {}", key);
                self.release(key, status.last_seen);
            }
        }
    }

    pub fn reset(&mut self) {
        self.keys = [KeyStatus::default(); 8];
    }

    /// Direction for the held keys.
    ///
    /// The held set must be exactly the keys of one compass direction; any
    /// extra key (including space or a modifier) yields `Direction::None`.
    pub fn direction(&self) -> Direction {
        let direction = Direction::from_keys(
            self.is_pressed(InputKey::Up),
            self.is_pressed(InputKey::Right),
            self.is_pressed(InputKey::Down),
            self.is_pressed(InputKey::Left),
        );
        let vector = direction.vector();
        let needed = (vector.x != 0.0) as usize + (vector.y != 0.0) as usize;
        if needed > 0 && needed == self.pressed_keys().len() {
            direction
        } else {
            Direction::None
        }
    }

    pub fn vector(&self) -> Option<Point> {
        match self.direction() {
            Direction::None => None,
            direction => Some(direction.vector()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn controller() -> KeyboardController {
        KeyboardController::new().with_key_release_timeout_ms(None)
    }

    #[test]
    fn test_single_and_diagonal_directions() {
        let mut kb = controller();
        kb.press(InputKey::Up, 0.0);
        assert_eq!(kb.direction(), Direction::Up);
        kb.press(InputKey::Left, 0.0);
        assert_eq!(kb.direction(), Direction::UpLeft);
        assert_eq!(kb.vector(), Some(Point::new(-1.0, -1.0)));
    }

    #[test]
    fn test_extra_keys_cancel_direction() {
        let mut kb = controller();
        kb.press(InputKey::Up, 0.0);
        kb.press(InputKey::Down, 0.0);
        assert_eq!(kb.direction(), Direction::None);

        kb.release(InputKey::Down, 1.0);
        kb.press(InputKey::Space, 1.0);
        assert_eq!(kb.direction(), Direction::None);
        assert_eq!(kb.vector(), None);

        kb.press(InputKey::Right, 1.0);
        kb.release(InputKey::Space, 2.0);
        assert_eq!(kb.direction(), Direction::UpRight);
    }

    #[test]
    fn test_double_tap_within_window() {
        let mut kb = controller();
        kb.press(InputKey::Right, 0.0);
        kb.release(InputKey::Right, 50.0);
        kb.press(InputKey::Right, 200.0);
        assert!(kb.is_double_tap(InputKey::Right));

        // releasing clears the double tap and keeps the hold start
        kb.release(InputKey::Right, 260.0);
        assert!(!kb.is_double_tap(InputKey::Right));

        kb.press(InputKey::Right, 1000.0);
        assert!(!kb.is_double_tap(InputKey::Right));
    }

    #[test]
    fn test_held_ms() {
        let mut kb = controller();
        assert_eq!(kb.held_ms(InputKey::Space, 10.0), None);
        kb.press(InputKey::Space, 10.0);
        kb.press(InputKey::Space, 40.0);
        assert_eq!(kb.held_ms(InputKey::Space, 110.0), Some(100.0));
    }

    #[test]
    fn test_auto_release_without_release_events() {
        let mut kb = KeyboardController::new().with_key_release_timeout_ms(Some(50.0));
        kb.press(InputKey::Left, 0.0);
        kb.update(40.0);
        assert!(kb.is_pressed(InputKey::Left));

        // a repeat keeps it alive
        kb.press(InputKey::Left, 45.0);
        kb.update(90.0);
        assert!(kb.is_pressed(InputKey::Left));

        kb.update(96.0);
        assert!(!kb.is_pressed(InputKey::Left));
    }

    #[test]
    fn test_handle_event_kinds() {
        let mut kb = controller();
        let press = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE);
        assert!(kb.handle_event(&press, 0.0));
        assert!(kb.is_pressed(InputKey::Right));

        let release = KeyEvent {
            code: KeyCode::Char('d'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(kb.handle_event(&release, 10.0));
        assert!(!kb.is_pressed(InputKey::Right));

        assert!(!kb.handle_event(&KeyEvent::from(KeyCode::Char('x')), 20.0));
    }

    #[test]
    fn test_reset() {
        let mut kb = controller();
        kb.press(InputKey::Down, 0.0);
        kb.reset();
        assert!(kb.pressed_keys().is_empty());
    }
}
