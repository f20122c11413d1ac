// Asset management system
//
// Discovers frame images and sounds on disk and serves them by logical name.
// Game code only sees the `FrameLookup` capability and typed handles; the
// renderer and the audio backend read the bytes behind those handles.

mod handle;
mod loader;
mod registry;

pub use handle::{AssetHandle, AssetId, FrameHandle, SoundHandle};
pub use loader::{AssetLoader, AssetType};
pub use registry::AssetRegistry;

/// Lookup of sprite frames by composed name (e.g. `knight_attack1_right_4`)
///
/// Returns `None` when no such frame exists, which is how frame sequences
/// find their end.
pub trait FrameLookup {
    fn frame(&self, name: &str) -> Option<FrameHandle>;
}

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
