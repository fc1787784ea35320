//! PNG output for generated bitmaps

use image::imageops::FilterType;
use image::RgbaImage;
use log::debug;
use std::io;
use std::path::{Path, PathBuf};

use crate::registry::{is_master, AssetRegistry};

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This preserves crisp pixel edges; a factor of 0 or 1 returns the input.
pub fn scale_image(image: &RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return image.clone();
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(image, w * factor, h * factor, FilterType::Nearest)
}

/// Output path for a bitmap id: `{dir}/{id}.png`.
pub fn output_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{}.png", id))
}

/// Write registered bitmaps to `dir` as PNG files.
///
/// Masters are skipped unless `include_masters` is set, and so are empty
/// bitmaps, which PNG cannot encode. Returns the written paths in
/// registration order.
pub fn write_registry(
    registry: &AssetRegistry,
    dir: &Path,
    scale: u32,
    include_masters: bool,
) -> Result<Vec<PathBuf>, OutputError> {
    let mut written = Vec::new();

    for (id, bitmap) in registry.iter() {
        if is_master(id) && !include_masters {
            continue;
        }
        if bitmap.width() == 0 || bitmap.height() == 0 {
            debug!("skipping empty bitmap '{}'", id);
            continue;
        }

        let path = output_path(dir, id);
        save_png(&scale_image(bitmap, scale), &path)?;
        debug!("wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_scale_image_nearest() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        let scaled = scale_image(&image, 3);
        assert_eq!(scaled.dimensions(), (6, 3));
        assert_eq!(scaled.get_pixel(2, 2)[3], 0);
        assert_eq!(*scaled.get_pixel(3, 0), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_scale_image_factor_one() {
        let image = RgbaImage::new(3, 2);
        assert_eq!(scale_image(&image, 1).dimensions(), (3, 2));
        assert_eq!(scale_image(&image, 0).dimensions(), (3, 2));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(output_path(Path::new("build"), "r1"), PathBuf::from("build/r1.png"));
    }

    #[test]
    fn test_write_registry_skips_masters_and_empty() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested/out");

        let mut registry = AssetRegistry::new();
        registry.add("_g", RgbaImage::new(8, 8)).unwrap();
        registry.add("g", RgbaImage::new(8, 8)).unwrap();
        registry.add("empty", RgbaImage::new(0, 0)).unwrap();

        let written = write_registry(&registry, &out, 2, false).unwrap();
        assert_eq!(written, vec![out.join("g.png")]);

        let saved = image::open(out.join("g.png")).unwrap();
        assert_eq!((saved.width(), saved.height()), (16, 16));
    }

    #[test]
    fn test_write_registry_with_masters() {
        let dir = TempDir::new().unwrap();
        let mut registry = AssetRegistry::new();
        registry.add("_g", RgbaImage::new(8, 8)).unwrap();
        let written = write_registry(&registry, dir.path(), 1, true).unwrap();
        assert_eq!(written.len(), 1);
        assert!(dir.path().join("_g.png").exists());
    }
}
