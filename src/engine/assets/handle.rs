// Type-safe asset handle system

use std::marker::PhantomData;

/// Unique identifier for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create an asset ID from a name or path
    pub fn from_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self(hasher.finish())
    }

    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Type-safe handle to an asset owned by the external loader
///
/// The `T` parameter ensures handles can only be used with the correct asset type.
#[derive(Debug)]
pub struct AssetHandle<T> {
    id: AssetId,
    _phantom: PhantomData<fn() -> T>,
}

// Manual impls: derives would require `T: Clone` etc. on the marker types.
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> PartialEq for AssetHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for AssetHandle<T> {}

impl<T> AssetHandle<T> {
    pub fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    pub fn id(&self) -> AssetId {
        self.id
    }
}

// Marker types for different asset types
#[derive(Debug)]
pub struct ClipAsset;
#[derive(Debug)]
pub struct EquipmentAsset;

pub type ClipHandle = AssetHandle<ClipAsset>;
pub type EquipmentHandle = AssetHandle<EquipmentAsset>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_from_name() {
        let id1 = AssetId::from_name("clips/idle.fbx");
        let id2 = AssetId::from_name("clips/idle.fbx");
        let id3 = AssetId::from_name("clips/walk.fbx");

        assert_eq!(id1, id2, "Same names should produce same IDs");
        assert_ne!(id1, id3, "Different names should produce different IDs");
    }

    #[test]
    fn test_asset_id_roundtrip() {
        let id = AssetId::from_u64(12345);
        assert_eq!(id.as_u64(), 12345);
    }

    #[test]
    fn test_handles_share_ids_across_types() {
        let id = AssetId::from_u64(1);
        let clip: ClipHandle = AssetHandle::new(id);
        let sword: EquipmentHandle = AssetHandle::new(id);
        assert_eq!(clip.id(), sword.id());
    }
}
