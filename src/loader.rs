//! Loading master bitmaps from disk
//!
//! Every `*.png` in the masters directory is registered under its file stem,
//! so `assets/_g.png` becomes `_g`. Images are converted to RGBA8 on load.

use std::path::{Path, PathBuf};

use glob::glob;
use image::RgbaImage;
use log::{debug, info};
use thiserror::Error;

use crate::registry::{AssetRegistry, RegistryError};

/// Error loading bitmaps from disk
#[derive(Debug, Error)]
pub enum LoadError {
    /// Masters directory is missing or not a directory
    #[error("masters directory '{}' not found", .0.display())]
    MissingDir(PathBuf),
    /// Glob pattern could not be built from the directory path
    #[error("invalid masters path: {0}")]
    Pattern(#[from] glob::PatternError),
    /// Image decoding or file access failed
    #[error("failed to load '{}': {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Two files map to the same id
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Load a single image file as RGBA8.
pub fn load_bitmap(path: &Path) -> Result<RgbaImage, LoadError> {
    let image = image::open(path).map_err(|source| LoadError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Find the PNG files in `dir`, sorted by path.
pub fn find_masters(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::MissingDir(dir.to_path_buf()));
    }
    let pattern = format!("{}/*.png", glob::Pattern::escape(&dir.display().to_string()));
    let mut files: Vec<PathBuf> = glob(&pattern)?.filter_map(Result::ok).collect();
    files.sort();
    Ok(files)
}

/// Register every PNG in `dir` under its file stem. Returns the ids loaded.
pub fn load_masters(dir: &Path, registry: &mut AssetRegistry) -> Result<Vec<String>, LoadError> {
    let mut ids = Vec::new();

    for path in find_masters(dir)? {
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let bitmap = load_bitmap(&path)?;
        debug!("loaded '{}' from {} ({}x{})", id, path.display(), bitmap.width(), bitmap.height());
        registry.add(id, bitmap)?;
        ids.push(id.to_string());
    }

    info!("loaded {} bitmaps from {}", ids.len(), dir.display());
    Ok(ids)
}
