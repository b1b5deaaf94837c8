// Raw key state -> movement/action intent

use super::action::Key;
use super::key_state::KeyState;

/// What the player wants this tick. Recomputed every tick, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
    /// One-shot: true only on the tick the attack key went down
    pub attack: bool,
    /// One-shot: true only on the tick the block key went down
    pub block: bool,
}

impl Intent {
    /// True if any movement axis is held. Opposing keys may still cancel out.
    pub fn has_direction_input(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }
}

/// Converts a key state snapshot into an [`Intent`].
///
/// Movement axes and run are read as held keys; attack and block are read as
/// press edges so holding the button does not retrigger the action.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSampler;

impl InputSampler {
    pub fn new() -> Self {
        Self
    }

    pub fn sample(&self, keys: &KeyState) -> Intent {
        let read = |key: Key| {
            if key.is_edge_triggered() {
                keys.just_pressed(key)
            } else {
                keys.is_held(key)
            }
        };

        Intent {
            forward: read(Key::Forward),
            backward: read(Key::Backward),
            left: read(Key::Left),
            right: read(Key::Right),
            run: read(Key::Run),
            attack: read(Key::Attack),
            block: read(Key::Block),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state_gives_empty_intent() {
        let intent = InputSampler::new().sample(&KeyState::new());
        assert_eq!(intent, Intent::default());
        assert!(!intent.has_direction_input());
    }

    #[test]
    fn test_held_movement_keys() {
        let keys = KeyState::with_pressed(&[Key::Forward, Key::Left, Key::Run]);
        let intent = InputSampler::new().sample(&keys);
        assert!(intent.forward);
        assert!(intent.left);
        assert!(intent.run);
        assert!(!intent.backward);
        assert!(!intent.right);
    }

    #[test]
    fn test_attack_fires_once_per_press() {
        let sampler = InputSampler::new();
        let mut keys = KeyState::with_pressed(&[Key::Attack]);
        assert!(sampler.sample(&keys).attack);

        // Still held next frame: no new trigger
        keys.end_frame();
        assert!(!sampler.sample(&keys).attack);

        // Release and press again: fires again
        keys.release(Key::Attack);
        keys.end_frame();
        keys.press(Key::Attack);
        assert!(sampler.sample(&keys).attack);
    }

    #[test]
    fn test_movement_stays_active_while_held() {
        let sampler = InputSampler::new();
        let mut keys = KeyState::with_pressed(&[Key::Backward]);
        keys.end_frame();
        keys.end_frame();
        assert!(sampler.sample(&keys).backward);
    }
}
