// Per-tick key state snapshot

use super::action::Key;
use std::collections::HashSet;

/// Which controller keys are held, and which went down since the last frame.
///
/// The driver mutates this between frames; the controller only ever sees a
/// shared reference for the duration of one tick.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is currently held
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Check if a key went down this frame
    pub fn just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Check if a key went up this frame
    pub fn just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    /// Register a key press. Pressing an already-held key is not a new edge.
    pub fn press(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    /// Register a key release
    pub fn release(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    /// Clear frame edges. Call once per frame after the tick has consumed the snapshot.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Drop everything, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Build a snapshot with the given keys held and freshly pressed
    pub fn with_pressed(keys: &[Key]) -> Self {
        let mut state = Self::new();
        for key in keys {
            state.press(*key);
        }
        state
    }
}
