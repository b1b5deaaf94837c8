// Canonical animation names and the clip library

use super::handle::{AssetHandle, AssetId, ClipHandle};
use super::AssetError;
use std::collections::HashMap;
use std::fmt;

/// Canonical animation names a character can bind clips to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipName {
    Idle,
    Walk,
    Run,
    Attack,
    Block,
    Death,
    Slash,
    Jump,
    PowerUp,
}

impl ClipName {
    /// Clips that must be present before a character can be built
    pub const REQUIRED: [ClipName; 6] = [
        ClipName::Idle,
        ClipName::Walk,
        ClipName::Run,
        ClipName::Attack,
        ClipName::Block,
        ClipName::Death,
    ];

    pub const ALL: [ClipName; 9] = [
        ClipName::Idle,
        ClipName::Walk,
        ClipName::Run,
        ClipName::Attack,
        ClipName::Block,
        ClipName::Death,
        ClipName::Slash,
        ClipName::Jump,
        ClipName::PowerUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Walk => "WALK",
            Self::Run => "RUN",
            Self::Attack => "ATTACK",
            Self::Block => "BLOCK",
            Self::Death => "DEATH",
            Self::Slash => "SLASH",
            Self::Jump => "JUMP",
            Self::PowerUp => "POWER_UP",
        }
    }

    /// Parse a loader-supplied name, ignoring case and `_`/`-`/space separators
    pub fn parse(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();

        Self::ALL
            .into_iter()
            .find(|clip| clip.as_str().replace('_', "") == normalized)
    }

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    /// Locomotion loops; everything else plays once and holds its last pose
    pub fn default_loop_mode(&self) -> LoopMode {
        match self {
            Self::Idle | Self::Walk | Self::Run => LoopMode::Repeat,
            _ => LoopMode::Once,
        }
    }
}

impl fmt::Display for ClipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a clip behaves when it reaches its end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Wrap back to the start
    Repeat,
    /// Play once and clamp on the final pose
    Once,
}

/// A playable clip bound to a canonical name
#[derive(Debug, Clone)]
pub struct ClipEntry {
    pub name: ClipName,
    pub handle: ClipHandle,
    /// Length of one playthrough in seconds
    pub duration: f32,
    pub loop_mode: LoopMode,
}

impl ClipEntry {
    /// Create an entry with the name's default loop mode and a handle derived from the name
    pub fn new(name: ClipName, duration: f32) -> Self {
        Self {
            name,
            handle: AssetHandle::new(AssetId::from_name(name.as_str())),
            duration,
            loop_mode: name.default_loop_mode(),
        }
    }

    pub fn with_handle(mut self, handle: ClipHandle) -> Self {
        self.handle = handle;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), AssetError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(AssetError::LoadError(format!(
                "clip {} has invalid duration {}",
                self.name, self.duration
            )));
        }
        Ok(())
    }
}

/// Read-only mapping from canonical name to clip.
///
/// Populated once by the loader; at most one clip per name.
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    entries: HashMap<ClipName, ClipEntry>,
}

impl ClipLibrary {
    /// Build a library, rejecting duplicate names and non-positive durations
    pub fn from_entries(entries: impl IntoIterator<Item = ClipEntry>) -> Result<Self, AssetError> {
        let mut map = HashMap::new();
        for entry in entries {
            entry.validate()?;
            if map.contains_key(&entry.name) {
                return Err(AssetError::AlreadyLoaded(entry.name.to_string()));
            }
            map.insert(entry.name, entry);
        }
        Ok(Self { entries: map })
    }

    pub fn get(&self, name: ClipName) -> Option<&ClipEntry> {
        self.entries.get(&name)
    }

    pub fn contains(&self, name: ClipName) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names from `wanted` that have no clip bound, in the order given
    pub fn missing(&self, wanted: &[ClipName]) -> Vec<ClipName> {
        wanted
            .iter()
            .copied()
            .filter(|name| !self.contains(*name))
            .collect()
    }
}
