// Name-keyed registry of every frame image and sound found on disk

use super::{AssetError, AssetHandle, AssetId, AssetLoader, AssetType, FrameHandle, FrameLookup};
use log::info;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Central asset registry for the game
///
/// Assets are addressed by their file stem, so `images/knight_run_left_3.png`
/// is found under `knight_run_left_3`. Registration is cheap; bytes are only
/// read when the renderer or the audio backend asks for them.
#[derive(Debug)]
pub struct AssetRegistry {
    /// Asset loader
    loader: AssetLoader,

    /// Frame name to handle mapping
    frames: HashMap<String, FrameHandle>,

    /// Frame handle to file mapping
    frame_paths: HashMap<AssetId, PathBuf>,

    /// Sound name to file mapping
    sounds: HashMap<String, PathBuf>,
}

impl AssetRegistry {
    /// Create an empty registry rooted at `asset_path`
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        Self {
            loader: AssetLoader::new(asset_path),
            frames: HashMap::new(),
            frame_paths: HashMap::new(),
            sounds: HashMap::new(),
        }
    }

    /// Create a registry and index everything under `images/` and `sounds/`
    pub fn scan<P: AsRef<Path>>(asset_path: P) -> Result<Self, AssetError> {
        let mut registry = Self::new(asset_path);

        for (name, path) in registry.loader.list_assets(AssetType::Image)? {
            registry.register_frame(&name, path);
        }
        for (name, path) in registry.loader.list_assets(AssetType::Sound)? {
            registry.register_sound(&name, path);
        }

        let stats = registry.stats();
        info!(
            "Indexed {} frames and {} sounds under {}",
            stats.frame_count,
            stats.sound_count,
            registry.loader.base_path().display()
        );

        Ok(registry)
    }

    /// Register a frame image under a logical name
    pub fn register_frame(&mut self, name: &str, path: impl Into<PathBuf>) -> FrameHandle {
        let handle = AssetHandle::from_name(name);
        self.frames.insert(name.to_string(), handle);
        self.frame_paths.insert(handle.id(), path.into());
        handle
    }

    /// Register a sound file under a logical name
    pub fn register_sound(&mut self, name: &str, path: impl Into<PathBuf>) {
        self.sounds.insert(name.to_string(), path.into());
    }

    /// File backing a frame handle
    pub fn frame_path(&self, handle: FrameHandle) -> Option<&Path> {
        self.frame_paths.get(&handle.id()).map(PathBuf::as_path)
    }

    /// Read the encoded image bytes for a frame
    pub fn load_frame_bytes(&self, handle: FrameHandle) -> Result<Vec<u8>, AssetError> {
        let path = self
            .frame_path(handle)
            .ok_or_else(|| AssetError::NotFound(format!("frame {:?}", handle.id())))?;
        self.loader.load_bytes(path)
    }

    /// Read the encoded bytes for a sound
    pub fn load_sound_bytes(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self
            .sounds
            .get(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
        self.loader.load_bytes(path)
    }

    /// Names of all registered sounds
    pub fn sound_names(&self) -> impl Iterator<Item = &str> {
        self.sounds.keys().map(String::as_str)
    }

    /// Get statistics about registered assets
    pub fn stats(&self) -> AssetStats {
        AssetStats {
            frame_count: self.frames.len(),
            sound_count: self.sounds.len(),
        }
    }
}

impl FrameLookup for AssetRegistry {
    fn frame(&self, name: &str) -> Option<FrameHandle> {
        self.frames.get(name).copied()
    }
}

/// Statistics about registered assets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetStats {
    pub frame_count: usize,
    pub sound_count: usize,
}
