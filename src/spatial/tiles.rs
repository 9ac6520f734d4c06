//! Tile and pattern pixel blocks
//!
//! Tiles are the example images patterns are cut from. Patterns are square
//! windows of those tiles, optionally rotated or mirrored to increase variety
//! from limited source data.

use crate::io::error::{Result, SynthesisError};
use ndarray::{Array3, ArrayView3, Axis, s};

/// Number of color channels carried by tiles and patterns
pub const CHANNELS: usize = 3;

/// An example image as a `height x width x 3` RGB array
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pixels: Array3<u8>,
}

impl Tile {
    /// Wrap an RGB pixel array
    ///
    /// # Errors
    ///
    /// Returns an error if the array has no pixels or does not have exactly
    /// three color channels
    pub fn from_array(pixels: Array3<u8>) -> Result<Self> {
        let (height, width, depth) = pixels.dim();
        if depth != CHANNELS {
            return Err(SynthesisError::InvalidSourceData {
                reason: format!("tile has {depth} channels, expected {CHANNELS}"),
            });
        }
        if height == 0 || width == 0 {
            return Err(SynthesisError::InvalidSourceData {
                reason: format!("tile is {height}x{width}, expected at least one pixel"),
            });
        }
        Ok(Self { pixels })
    }

    /// Build a tile of a single color
    pub fn solid(height: usize, width: usize, color: [u8; 3]) -> Self {
        Self {
            pixels: Array3::from_shape_fn((height, width, CHANNELS), |(_, _, c)| {
                color.get(c).copied().unwrap_or(0)
            }),
        }
    }

    /// Tile height in pixels
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// Tile width in pixels
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Borrow the underlying pixel array
    pub const fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    /// Cut the `dim x dim` window with top-left corner at `(row, col)`
    ///
    /// Returns `None` when the window does not fit inside the tile
    pub fn window(&self, row: usize, col: usize, dim: usize) -> Option<Pattern> {
        if row + dim > self.height() || col + dim > self.width() {
            return None;
        }
        Some(Pattern {
            pixels: self
                .pixels
                .slice(s![row..row + dim, col..col + dim, ..])
                .to_owned(),
        })
    }

    /// Every window that fits, scanning columns in the outer loop
    pub fn windows(&self, dim: usize) -> impl Iterator<Item = Pattern> + '_ {
        let rows = (self.height() + 1).saturating_sub(dim);
        let cols = (self.width() + 1).saturating_sub(dim);
        (0..cols).flat_map(move |col| (0..rows).filter_map(move |row| self.window(row, col, dim)))
    }
}

/// Square RGB block of side `dim`, the unit of synthesis
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pixels: Array3<u8>,
}

impl Pattern {
    /// Wrap a square RGB pixel array
    ///
    /// # Errors
    ///
    /// Returns an error if the array is not square or not three-channel
    pub fn from_array(pixels: Array3<u8>) -> Result<Self> {
        let (height, width, depth) = pixels.dim();
        if height != width || height == 0 || depth != CHANNELS {
            return Err(SynthesisError::InvalidSourceData {
                reason: format!(
                    "pattern is {height}x{width}x{depth}, expected a square {CHANNELS}-channel block"
                ),
            });
        }
        Ok(Self { pixels })
    }

    /// Side length of the pattern
    pub fn dim(&self) -> usize {
        self.pixels.dim().0
    }

    /// Borrow the underlying pixel array
    pub const fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    /// View of the pixels under a sub-rectangle
    pub fn region(
        &self,
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
    ) -> ArrayView3<'_, u8> {
        self.pixels.slice(s![rows, cols, ..])
    }

    /// RGB value at `(row, col)`
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; 3]> {
        let r = self.pixels.get([row, col, 0])?;
        let g = self.pixels.get([row, col, 1])?;
        let b = self.pixels.get([row, col, 2])?;
        Some([*r, *g, *b])
    }

    /// Rotate 90° counter-clockwise
    #[must_use]
    pub fn rotate_90(&self) -> Self {
        // Transpose then flip rows: out[i][j] = in[j][n - 1 - i]
        let mut view = self.pixels.view().permuted_axes([1, 0, 2]);
        view.invert_axis(Axis(0));
        Self {
            pixels: view.as_standard_layout().into_owned(),
        }
    }

    /// Mirror left to right
    #[must_use]
    pub fn reflect(&self) -> Self {
        let mut view = self.pixels.view();
        view.invert_axis(Axis(1));
        Self {
            pixels: view.as_standard_layout().into_owned(),
        }
    }

    /// The pattern followed by the requested symmetry variants
    ///
    /// Rotations come in 90°, 180°, 270° counter-clockwise order; with
    /// reflections enabled each variant is followed by its mirror image.
    pub fn variants(&self, include_rotations: bool, include_reflections: bool) -> Vec<Self> {
        let mut transforms = vec![self.clone()];

        if include_rotations {
            let rot90 = self.rotate_90();
            let rot180 = rot90.rotate_90();
            let rot270 = rot180.rotate_90();
            transforms.push(rot90);
            transforms.push(rot180);
            transforms.push(rot270);
        }

        if include_reflections {
            transforms = transforms
                .into_iter()
                .flat_map(|transform| {
                    let mirrored = transform.reflect();
                    [transform, mirrored]
                })
                .collect();
        }

        transforms
    }
}
