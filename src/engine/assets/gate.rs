// Readiness gate between the async asset loader and the controller

use super::library::{ClipEntry, ClipLibrary, ClipName};
use super::skeleton::{Equipment, Skeleton};
use super::AssetError;
use log::{debug, info};
use std::collections::HashMap;

/// Everything a character needs, available all at once
#[derive(Debug, Clone)]
pub struct LoadedCharacter {
    pub clips: ClipLibrary,
    pub skeleton: Skeleton,
    pub equipment: Option<Equipment>,
}

/// Collects assets as the external loader delivers them.
///
/// There is no partial readiness: nothing can be built until every required
/// clip and the skeleton have arrived.
#[derive(Debug, Default)]
pub struct PendingAssets {
    clips: HashMap<ClipName, ClipEntry>,
    skeleton: Option<Skeleton>,
    equipment: Option<Equipment>,
}

impl PendingAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a loaded clip. A second clip for the same name is rejected.
    pub fn add_clip(&mut self, entry: ClipEntry) -> Result<(), AssetError> {
        entry.validate()?;
        if self.clips.contains_key(&entry.name) {
            return Err(AssetError::AlreadyLoaded(entry.name.to_string()));
        }
        debug!("Clip {} loaded ({:.2}s)", entry.name, entry.duration);
        self.clips.insert(entry.name, entry);
        Ok(())
    }

    pub fn set_skeleton(&mut self, skeleton: Skeleton) {
        self.skeleton = Some(skeleton);
    }

    pub fn set_equipment(&mut self, equipment: Equipment) {
        self.equipment = Some(equipment);
    }

    /// Required clips that have not arrived yet
    pub fn missing_clips(&self) -> Vec<ClipName> {
        ClipName::REQUIRED
            .into_iter()
            .filter(|name| !self.clips.contains_key(name))
            .collect()
    }

    pub fn is_ready(&self) -> bool {
        self.skeleton.is_some() && self.missing_clips().is_empty()
    }

    /// Open the gate. Check [`is_ready`](Self::is_ready) first; this consumes the pending set.
    pub fn finish(self) -> Result<LoadedCharacter, AssetError> {
        let missing = self.missing_clips();
        if !missing.is_empty() {
            return Err(AssetError::Incomplete { missing });
        }
        let skeleton = self
            .skeleton
            .ok_or_else(|| AssetError::NotFound("skeleton".to_string()))?;

        info!(
            "Character assets ready: {} clips, {} skeleton nodes, equipment: {}",
            self.clips.len(),
            skeleton.len(),
            self.equipment.as_ref().map_or("none", |e| e.name.as_str())
        );

        Ok(LoadedCharacter {
            clips: ClipLibrary::from_entries(self.clips.into_values())?,
            skeleton,
            equipment: self.equipment,
        })
    }
}
