//! Paints a wave grid into an RGB pixel buffer

use crate::analysis::patterns::PatternLibrary;
use crate::io::configuration::CONTRADICTION_COLOR;
use crate::spatial::grid::WaveGrid;
use crate::spatial::tiles::CHANNELS;
use ndarray::Array3;

/// Output image size, in pixels, covered by a wave grid
pub const fn output_shape(grid: &WaveGrid, dim: usize) -> (usize, usize) {
    (
        (grid.rows() + dim).saturating_sub(1),
        (grid.cols() + dim).saturating_sub(1),
    )
}

/// Render the grid into a `height x width x 3` buffer
///
/// Cells are stamped row by row, so where footprints overlap the later cell
/// wins. A cell with one pattern stamps it verbatim, a cell with several
/// stamps their per-channel mean, and an empty cell stamps the contradiction
/// color. The grid is not modified.
pub fn render(grid: &WaveGrid, library: &PatternLibrary) -> Array3<u8> {
    let dim = library.dim();
    let (height, width) = output_shape(grid, dim);
    let mut pixels = Array3::zeros((height, width, CHANNELS));

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let block = cell_block(grid, library, row, col);
            for dr in 0..dim {
                for dc in 0..dim {
                    for channel in 0..CHANNELS {
                        let value = block
                            .get(channel + CHANNELS * (dc + dim * dr))
                            .copied()
                            .unwrap_or(0);
                        if let Some(target) = pixels.get_mut([row + dr, col + dc, channel]) {
                            *target = value;
                        }
                    }
                }
            }
        }
    }

    pixels
}

/// Row-major `dim x dim x 3` pixel block a single cell contributes
fn cell_block(grid: &WaveGrid, library: &PatternLibrary, row: usize, col: usize) -> Vec<u8> {
    let dim = library.dim();
    let block_len = dim * dim * CHANNELS;
    let possible = grid.possible_patterns(row, col);

    if possible.is_empty() {
        return CONTRADICTION_COLOR
            .iter()
            .copied()
            .cycle()
            .take(block_len)
            .collect();
    }

    let mut sums = vec![0u64; block_len];
    for pattern in possible.iter().filter_map(|&index| library.pattern(index)) {
        for (sum, &value) in sums.iter_mut().zip(pattern.pixels().iter()) {
            *sum += u64::from(value);
        }
    }

    let divisor = possible.len() as f64;
    sums.into_iter()
        .map(|sum| (sum as f64 / divisor).round() as u8)
        .collect()
}
