// Asset loading functionality

use super::AssetError;
use std::path::{Path, PathBuf};

/// Supported asset types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    Image,
    Sound,
}

impl AssetType {
    /// Get the default directory for this asset type
    pub fn default_directory(&self) -> &'static str {
        match self {
            AssetType::Image => "images",
            AssetType::Sound => "sounds",
        }
    }

    /// Get supported file extensions for this asset type
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            AssetType::Image => &["png", "jpg", "jpeg"],
            AssetType::Sound => &["wav", "ogg", "mp3"],
        }
    }
}

/// Asset loader responsible for finding and reading asset files
#[derive(Debug)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Directory holding assets of a given type
    pub fn directory(&self, asset_type: AssetType) -> PathBuf {
        self.base_path.join(asset_type.default_directory())
    }

    /// Read asset bytes from disk
    pub fn load_bytes(&self, path: &Path) -> Result<Vec<u8>, AssetError> {
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        std::fs::read(path).map_err(|e| {
            AssetError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    /// List all assets of a given type as (name, path) pairs
    ///
    /// The name is the file stem, which is the key the game looks assets up by.
    pub fn list_assets(&self, asset_type: AssetType) -> Result<Vec<(String, PathBuf)>, AssetError> {
        let dir = self.directory(asset_type);

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut assets = Vec::new();
        let extensions = asset_type.extensions();

        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let matches_type = path
                .extension()
                .map(|ext| extensions.contains(&ext.to_string_lossy().to_lowercase().as_str()))
                .unwrap_or(false);

            if matches_type {
                if let Some(stem) = path.file_stem() {
                    assets.push((stem.to_string_lossy().to_string(), path.clone()));
                }
            }
        }

        assets.sort();
        Ok(assets)
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_directories() {
        assert_eq!(AssetType::Image.default_directory(), "images");
        assert_eq!(AssetType::Sound.default_directory(), "sounds");
    }

    #[test]
    fn test_asset_type_extensions() {
        assert!(AssetType::Image.extensions().contains(&"png"));
        assert!(AssetType::Sound.extensions().contains(&"wav"));
        assert!(AssetType::Sound.extensions().contains(&"ogg"));
    }

    #[test]
    fn test_loader_directory() {
        let loader = AssetLoader::new("/game/assets");
        let dir = loader.directory(AssetType::Image);

        assert_eq!(dir, PathBuf::from("/game/assets/images"));
        assert_eq!(loader.base_path(), Path::new("/game/assets"));
    }

    #[test]
    fn test_list_assets_filters_by_extension() {
        let root = tempfile::tempdir().unwrap();
        let images = root.path().join("images");
        std::fs::create_dir_all(&images).unwrap();
        std::fs::write(images.join("knight_idle_0.png"), b"png").unwrap();
        std::fs::write(images.join("background.jpg"), b"jpg").unwrap();
        std::fs::write(images.join("notes.txt"), b"txt").unwrap();

        let loader = AssetLoader::new(root.path());
        let names: Vec<String> = loader
            .list_assets(AssetType::Image)
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(names, vec!["background", "knight_idle_0"]);
    }

    #[test]
    fn test_list_assets_missing_directory_is_empty() {
        let root = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(root.path());
        assert!(loader.list_assets(AssetType::Sound).unwrap().is_empty());
    }

    #[test]
    fn test_load_bytes_not_found() {
        let loader = AssetLoader::new(".");
        let err = loader
            .load_bytes(Path::new("definitely/missing/frame.png"))
            .unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }
}
