// Input manager - turns window events into key state snapshots

use super::action::{InputSource, Key};
use super::config::KeyBindings;
use super::key_state::KeyState;
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Owns the binding table and the key state for the local player
pub struct InputManager {
    bindings: KeyBindings,
    keys: KeyState,
    /// Physical sources currently down for each logical key
    held_sources: HashMap<Key, HashSet<InputSource>>,
}

impl InputManager {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            keys: KeyState::new(),
            held_sources: HashMap::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.handle_source(
                InputSource::key(key_code),
                event.state == ElementState::Pressed,
                event.repeat,
            );
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        self.handle_source(
            InputSource::mouse(button),
            state == ElementState::Pressed,
            false,
        );
    }

    /// Route a raw source through the bindings. OS key-repeat is ignored.
    pub fn handle_source(&mut self, source: InputSource, pressed: bool, repeat: bool) {
        let Some(key) = self.bindings.get_key(source) else {
            return;
        };

        if pressed {
            if !repeat {
                self.held_sources.entry(key).or_default().insert(source);
                self.keys.press(key);
            }
        } else {
            // The key stays held while any other bound source is still down
            let sources = self.held_sources.entry(key).or_default();
            sources.remove(&source);
            if sources.is_empty() {
                self.keys.release(key);
            }
        }
    }

    /// Snapshot handed to the controller for this tick
    pub fn snapshot(&self) -> &KeyState {
        &self.keys
    }

    /// Call once per frame after the controller tick
    pub fn end_frame(&mut self) {
        self.keys.end_frame();
    }

    /// Release everything (window focus lost)
    pub fn reset(&mut self) {
        self.held_sources.clear();
        self.keys.reset();
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.is_held(key)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}
