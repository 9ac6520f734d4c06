//! Tile loading from image files and PNG export of rendered buffers

use crate::io::configuration::TILE_EXTENSIONS;
use crate::io::error::{Result, SynthesisError};
use crate::spatial::tiles::{CHANNELS, Tile};
use image::RgbImage;
use ndarray::Array3;
use std::path::Path;

/// Whether the path carries one of the accepted tile image extensions
pub fn is_tile_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TILE_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

/// Convert a decoded RGB image into a tile
///
/// # Errors
///
/// Returns an error if the image has no pixels
pub fn tile_from_image(image: &RgbImage) -> Result<Tile> {
    let (width, height) = image.dimensions();
    let pixels = Array3::from_shape_vec(
        (height as usize, width as usize, CHANNELS),
        image.as_raw().clone(),
    )
    .map_err(|e| SynthesisError::InvalidSourceData {
        reason: format!("image buffer does not match its {height}x{width} size: {e}"),
    })?;
    Tile::from_array(pixels)
}

/// Load a single image file as an RGB tile
///
/// Alpha and palette data are discarded during conversion.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded, or holds no pixels
pub fn load_tile(path: &Path) -> Result<Tile> {
    let image = image::open(path).map_err(|e| SynthesisError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    tile_from_image(&image.to_rgb8())
}

/// Load every tile image in a directory, sorted by path
///
/// Files without an accepted extension are ignored.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be read
/// - Any tile image fails to load
/// - The directory contains no tile images
pub fn load_tiles(directory: &Path) -> Result<Vec<Tile>> {
    let read_error = |e| SynthesisError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read directory",
        source: e,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_tile_image(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(SynthesisError::EmptyTileSet);
    }

    paths.iter().map(|path| load_tile(path)).collect()
}

/// Convert a `height x width x 3` buffer into an RGB image
///
/// # Errors
///
/// Returns an error if the buffer is not three-channel or too large for an image
pub fn to_rgb_image(pixels: &Array3<u8>) -> Result<RgbImage> {
    let (height, width, depth) = pixels.dim();
    if depth != CHANNELS {
        return Err(SynthesisError::InvalidSourceData {
            reason: format!("pixel buffer has {depth} channels, expected {CHANNELS}"),
        });
    }

    let too_large = || SynthesisError::InvalidSourceData {
        reason: format!("pixel buffer of {height}x{width} exceeds image limits"),
    };
    let width = u32::try_from(width).map_err(|_overflow| too_large())?;
    let height = u32::try_from(height).map_err(|_overflow| too_large())?;

    let raw: Vec<u8> = pixels.iter().copied().collect();
    RgbImage::from_raw(width, height, raw).ok_or_else(too_large)
}

/// Write a pixel buffer as a PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The buffer cannot be converted into an image
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn save_rgb(pixels: &Array3<u8>, path: &Path) -> Result<()> {
    let image = to_rgb_image(pixels)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| SynthesisError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}
