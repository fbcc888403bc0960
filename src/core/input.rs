//! Input snapshot read by game and object hooks
//!
//! The stage refreshes this once per loop iteration, after all pending events
//! have been dispatched. Queries therefore reflect the state as of the most
//! recent iteration, not the real-time device state.

use std::collections::HashSet;

use super::event::{MouseButtons, MouseMoveEvent};
use super::keys::{Key, KeyMods};
use crate::math::{Offset, Point};

/// Pressed-key table reported by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pressed_keys: HashSet<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release
    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.pressed_keys.insert(key);
        } else {
            self.pressed_keys.remove(&key);
        }
    }

    /// Check if a specific key is currently pressed
    pub fn is_down(&self, key: Key) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Modifier flags derived from the held modifier keys
    pub fn modifiers(&self) -> KeyMods {
        KeyMods::from_keys(self.pressed_keys.iter())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.pressed_keys.iter()
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.pressed_keys.clear();
    }
}

impl FromIterator<Key> for KeyboardState {
    fn from_iter<T: IntoIterator<Item = Key>>(iter: T) -> Self {
        Self {
            pressed_keys: iter.into_iter().collect(),
        }
    }
}

/// Pointer position, motion since the previous snapshot, and button state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerState {
    pub pos: Point,
    pub rel: Offset,
    pub buttons: MouseButtons,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            pos: Point::origin(),
            rel: Offset::zeros(),
            buttons: MouseButtons::default(),
        }
    }
}

impl PointerState {
    /// Build the synthetic motion event handed to `on_mouse_stay`
    pub fn to_move_event(&self) -> MouseMoveEvent {
        MouseMoveEvent::new(self.pos, self.rel, self.buttons)
    }
}

/// Everything the stage knows about input as of the last refresh
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keyboard: KeyboardState,
    modifiers: KeyMods,
    pointer: PointerState,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with freshly queried host state
    pub fn refresh(&mut self, keyboard: KeyboardState, pointer: PointerState) {
        self.modifiers = keyboard.modifiers();
        self.keyboard = keyboard;
        self.pointer = pointer;
    }

    pub fn key_is_down(&self, key: Key) -> bool {
        self.keyboard.is_down(key)
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    pub fn modifiers(&self) -> KeyMods {
        self.modifiers
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    #[test]
    fn test_keyboard_state() {
        let mut keys = KeyboardState::new();
        keys.set(Key::W, true);
        keys.set(Key::LShift, true);
        assert!(keys.is_down(Key::W));
        assert_eq!(keys.modifiers(), KeyMods::LSHIFT);

        keys.set(Key::W, false);
        assert!(!keys.is_down(Key::W));

        keys.clear();
        assert!(keys.modifiers().is_empty());
    }

    #[test]
    fn test_snapshot_is_not_live() {
        let mut input = InputState::new();
        let mut keys = KeyboardState::new();
        keys.set(Key::Space, true);

        input.refresh(keys.clone(), PointerState::default());
        keys.set(Key::Space, false);

        // the stage's copy only changes on the next refresh
        assert!(input.key_is_down(Key::Space));
        input.refresh(keys, PointerState::default());
        assert!(!input.key_is_down(Key::Space));
    }

    #[test]
    fn test_pointer_to_move_event() {
        let pointer = PointerState {
            pos: point(5, 6),
            rel: Offset::new(1, 2),
            buttons: MouseButtons {
                left: true,
                ..Default::default()
            },
        };
        let event = pointer.to_move_event();
        assert_eq!(event.pos, point(5, 6));
        assert_eq!(event.rel, Offset::new(1, 2));
        assert!(event.buttons.left);
    }
}
