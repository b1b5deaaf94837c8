// Controller key definitions and default bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// The fixed set of logical keys the character controller understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Movement axes (held)
    Forward,
    Backward,
    Left,
    Right,
    Run,

    // Actions (edge-triggered)
    Attack,
    Block,
}

impl Key {
    pub const ALL: [Key; 7] = [
        Key::Forward,
        Key::Backward,
        Key::Left,
        Key::Right,
        Key::Run,
        Key::Attack,
        Key::Block,
    ];

    /// Actions fire once per press instead of every frame while held
    pub fn is_edge_triggered(&self) -> bool {
        matches!(self, Self::Attack | Self::Block)
    }
}

/// Represents an input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Default keyboard/mouse bindings
pub fn default_bindings() -> Vec<(InputSource, Key)> {
    vec![
        // WASD + arrows
        (InputSource::key(KeyCode::KeyW), Key::Forward),
        (InputSource::key(KeyCode::KeyS), Key::Backward),
        (InputSource::key(KeyCode::KeyA), Key::Left),
        (InputSource::key(KeyCode::KeyD), Key::Right),
        (InputSource::key(KeyCode::ArrowUp), Key::Forward),
        (InputSource::key(KeyCode::ArrowDown), Key::Backward),
        (InputSource::key(KeyCode::ArrowLeft), Key::Left),
        (InputSource::key(KeyCode::ArrowRight), Key::Right),
        (InputSource::key(KeyCode::ShiftLeft), Key::Run),
        (InputSource::key(KeyCode::ShiftRight), Key::Run),
        // Actions
        (InputSource::mouse(MouseButton::Left), Key::Attack),
        (InputSource::mouse(MouseButton::Right), Key::Block),
        (InputSource::key(KeyCode::KeyJ), Key::Attack),
        (InputSource::key(KeyCode::KeyK), Key::Block),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_triggered_keys() {
        assert!(Key::Attack.is_edge_triggered());
        assert!(Key::Block.is_edge_triggered());
        assert!(!Key::Forward.is_edge_triggered());
        assert!(!Key::Run.is_edge_triggered());
    }

    #[test]
    fn test_input_source_creation() {
        assert_eq!(
            InputSource::key(KeyCode::KeyA),
            InputSource::Keyboard(KeyCode::KeyA)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
    }

    #[test]
    fn test_default_bindings_cover_every_key() {
        let bindings = default_bindings();
        for key in Key::ALL {
            assert!(
                bindings.iter().any(|(_, bound)| *bound == key),
                "{key:?} has no default binding"
            );
        }
    }

    #[test]
    fn test_no_duplicate_sources() {
        let mut seen = std::collections::HashSet::new();
        for (source, _) in default_bindings() {
            assert!(seen.insert(source), "Duplicate input source {source:?}");
        }
    }
}
