// Type-safe asset handle system

use std::marker::PhantomData;

/// Unique identifier for an asset, derived from its logical name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create an asset ID from a logical asset name (e.g. `knight_idle_0`)
    pub fn from_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Type-safe handle to a registered asset
///
/// The `T` parameter keeps frame handles and sound handles apart.
#[derive(Debug)]
pub struct AssetHandle<T> {
    pub(crate) id: AssetId,
    _phantom: PhantomData<fn() -> T>,
}

// Manual impls: derives would require `T: Clone`/`T: PartialEq` on the marker types
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

impl<T> std::hash::Hash for AssetHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> AssetHandle<T> {
    pub(crate) fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Handle for the asset registered under `name`
    pub(crate) fn from_name(name: &str) -> Self {
        Self::new(AssetId::from_name(name))
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }
}

// Marker types for different asset kinds
#[derive(Debug)]
pub struct FrameAsset;
#[derive(Debug)]
pub struct SoundAsset;

/// A single sprite frame image
pub type FrameHandle = AssetHandle<FrameAsset>;
/// A sound effect or music track
pub type SoundHandle = AssetHandle<SoundAsset>;
