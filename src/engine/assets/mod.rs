// Asset-side data the controller consumes
//
// Loading itself is owned by an external, asynchronous collaborator. This
// module only models what it hands over: typed handles, the clip library,
// the skeletal hierarchy and the readiness gate that holds construction
// back until every required clip has arrived.

mod gate;
mod handle;
mod library;
mod skeleton;

pub use gate::{LoadedCharacter, PendingAssets};
pub use handle::{AssetHandle, AssetId, ClipAsset, ClipHandle, EquipmentAsset, EquipmentHandle};
pub use library::{ClipEntry, ClipLibrary, ClipName, LoopMode};
pub use skeleton::{Equipment, NodeId, NodeTransform, Skeleton, SkeletonNode};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset already loaded: {0}")]
    AlreadyLoaded(String),

    #[error("Character assets incomplete, missing clips: {missing:?}")]
    Incomplete { missing: Vec<ClipName> },

    #[error("Failed to load asset: {0}")]
    LoadError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("sword.glb".to_string());
        assert_eq!(err.to_string(), "Asset not found: sword.glb");

        let err = AssetError::Incomplete {
            missing: vec![ClipName::Death],
        };
        assert_eq!(
            err.to_string(),
            "Character assets incomplete, missing clips: [Death]"
        );
    }
}
