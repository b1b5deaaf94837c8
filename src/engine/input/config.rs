// Key binding configuration and remapping

use super::action::{default_bindings, InputSource, Key};
use std::collections::HashMap;

/// Maps input sources (keys/buttons) to controller keys
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<InputSource, Key>,

    /// Reverse mapping for quick lookups (key -> all sources)
    key_to_sources: HashMap<Key, Vec<InputSource>>,
}

impl KeyBindings {
    /// Create an empty binding table
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
            key_to_sources: HashMap::new(),
        }
    }

    /// Create a binding table from a list of bindings
    pub fn from_bindings(bindings: Vec<(InputSource, Key)>) -> Self {
        let mut config = Self::empty();
        for (source, key) in bindings {
            config.bind(source, key);
        }
        config
    }

    /// Bind an input source to a key, replacing any previous binding of that source
    pub fn bind(&mut self, source: InputSource, key: Key) {
        self.unbind_source(source);
        self.bindings.insert(source, key);
        self.key_to_sources.entry(key).or_default().push(source);
    }

    /// Unbind an input source
    pub fn unbind_source(&mut self, source: InputSource) {
        if let Some(key) = self.bindings.remove(&source) {
            if let Some(sources) = self.key_to_sources.get_mut(&key) {
                sources.retain(|s| *s != source);
                if sources.is_empty() {
                    self.key_to_sources.remove(&key);
                }
            }
        }
    }

    /// Unbind all sources for a key
    pub fn unbind_key(&mut self, key: Key) {
        if let Some(sources) = self.key_to_sources.remove(&key) {
            for source in sources {
                self.bindings.remove(&source);
            }
        }
    }

    /// Get the key bound to an input source
    pub fn get_key(&self, source: InputSource) -> Option<Key> {
        self.bindings.get(&source).copied()
    }

    /// Get all input sources bound to a key
    pub fn get_sources(&self, key: Key) -> Vec<InputSource> {
        self.key_to_sources.get(&key).cloned().unwrap_or_default()
    }

    pub fn has_binding(&self, key: Key) -> bool {
        self.key_to_sources.contains_key(&key)
    }

    /// Reset to the default layout
    pub fn reset_to_defaults(&mut self) {
        self.bindings.clear();
        self.key_to_sources.clear();
        for (source, key) in default_bindings() {
            self.bind(source, key);
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}
