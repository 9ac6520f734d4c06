//! Wave grid holding the per-cell superposition state
//!
//! Keeps separate 2D layers for possibilities, observation, uncertainty and
//! worklist membership, in the same layered style as the rest of the spatial
//! code. Possibilities only ever shrink between two `all_possible` calls.

use ndarray::Array2;

use crate::algorithm::bitset::PatternBitset;
use crate::spatial::neighborhood::Offset;

/// Superposition state for every wave cell
///
/// A cell is observed once it holds exactly one pattern, whether by a
/// probabilistic choice or by eliminating every alternative. A cell holding no
/// pattern is a contradiction and is never observed.
#[derive(Debug, Clone)]
pub struct WaveGrid {
    /// Still-possible patterns per cell
    possibilities: Array2<PatternBitset>,

    /// Cells fixed to a single pattern
    observed: Array2<bool>,

    /// Remaining possibility count per cell
    uncertainty: Array2<usize>,

    /// Cells currently sitting on the propagation worklist
    queued: Array2<bool>,

    /// Number of distinct patterns
    pattern_count: usize,

    /// Grid dimensions (rows, cols)
    dimensions: (usize, usize),
}

impl WaveGrid {
    /// Create a grid with every cell in full superposition
    pub fn new(rows: usize, cols: usize, pattern_count: usize) -> Self {
        let dimensions = (rows, cols);
        Self {
            possibilities: Array2::from_elem(dimensions, PatternBitset::all(pattern_count)),
            observed: Array2::from_elem(dimensions, false),
            uncertainty: Array2::from_elem(dimensions, pattern_count),
            queued: Array2::from_elem(dimensions, false),
            pattern_count,
            dimensions,
        }
    }

    /// Reset every cell to full superposition
    pub fn all_possible(&mut self) {
        self.possibilities
            .fill(PatternBitset::all(self.pattern_count));
        self.observed.fill(false);
        self.uncertainty.fill(self.pattern_count);
        self.queued.fill(false);
    }

    /// Get the number of rows in the grid
    pub const fn rows(&self) -> usize {
        self.dimensions.0
    }

    /// Get the number of columns in the grid
    pub const fn cols(&self) -> usize {
        self.dimensions.1
    }

    /// Number of distinct patterns a cell can hold
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.dimensions.0 * self.dimensions.1
    }

    /// Check that a coordinate lies inside the grid
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.dimensions.0 && col < self.dimensions.1
    }

    /// Coordinates of the cell displaced by `offset`, clipped to the grid
    pub fn neighbor(&self, row: usize, col: usize, offset: Offset) -> Option<[usize; 2]> {
        let neighbor_row = row.checked_add_signed(offset.row)?;
        let neighbor_col = col.checked_add_signed(offset.col)?;
        self.contains(neighbor_row, neighbor_col)
            .then_some([neighbor_row, neighbor_col])
    }

    /// Still-possible patterns at a cell
    pub fn possibilities(&self, row: usize, col: usize) -> Option<&PatternBitset> {
        self.possibilities.get([row, col])
    }

    /// Still-possible pattern indices at a cell in ascending order
    pub fn possible_patterns(&self, row: usize, col: usize) -> Vec<usize> {
        self.possibilities(row, col)
            .map(PatternBitset::to_vec)
            .unwrap_or_default()
    }

    /// Remaining possibility count, zero outside the grid
    pub fn remaining(&self, row: usize, col: usize) -> usize {
        self.uncertainty.get([row, col]).copied().unwrap_or(0)
    }

    /// Whether the cell has been fixed to a single pattern
    pub fn is_observed(&self, row: usize, col: usize) -> bool {
        self.observed.get([row, col]).copied().unwrap_or(false)
    }

    /// Whether the cell has no possible pattern left
    pub fn is_contradiction(&self, row: usize, col: usize) -> bool {
        self.possibilities(row, col)
            .is_some_and(PatternBitset::is_empty)
    }

    /// The single surviving pattern, if the cell holds exactly one
    pub fn determined_pattern(&self, row: usize, col: usize) -> Option<usize> {
        self.possibilities(row, col)
            .filter(|bits| bits.count() == 1)
            .and_then(PatternBitset::first)
    }

    /// Fix a cell to one pattern and mark it observed
    pub fn fix(&mut self, row: usize, col: usize, pattern: usize) {
        if pattern >= self.pattern_count {
            return;
        }
        if let Some(bits) = self.possibilities.get_mut([row, col]) {
            *bits = PatternBitset::single(self.pattern_count, pattern);
        }
        if let Some(count) = self.uncertainty.get_mut([row, col]) {
            *count = 1;
        }
        if let Some(observed) = self.observed.get_mut([row, col]) {
            *observed = true;
        }
    }

    /// Remove one pattern from a cell
    ///
    /// A cell left with a single pattern is fixed to it. A cell left with none
    /// becomes an unobserved contradiction. Returns whether the pattern was
    /// still possible.
    pub fn eliminate(&mut self, row: usize, col: usize, pattern: usize) -> bool {
        let Some(bits) = self.possibilities.get_mut([row, col]) else {
            return false;
        };
        if !bits.remove(pattern) {
            return false;
        }
        let remaining = bits.count();
        let survivor = bits.first();

        if let Some(count) = self.uncertainty.get_mut([row, col]) {
            *count = remaining;
        }

        match (remaining, survivor) {
            (1, Some(last)) => self.fix(row, col, last),
            (0, _) => {
                if let Some(observed) = self.observed.get_mut([row, col]) {
                    *observed = false;
                }
            }
            _ => {}
        }
        true
    }

    /// Eliminate every possible pattern outside `allowed`
    ///
    /// Returns how many patterns were removed
    pub fn restrict(&mut self, row: usize, col: usize, allowed: &PatternBitset) -> usize {
        let doomed: Vec<usize> = self
            .possibilities(row, col)
            .map(|bits| bits.iter().filter(|&p| !allowed.contains(p)).collect())
            .unwrap_or_default();

        doomed
            .into_iter()
            .filter(|&pattern| self.eliminate(row, col, pattern))
            .count()
    }

    /// Whether the cell is waiting on the propagation worklist
    pub fn is_queued(&self, row: usize, col: usize) -> bool {
        self.queued.get([row, col]).copied().unwrap_or(false)
    }

    /// Flag a cell as queued
    ///
    /// Returns true if the flag was newly set
    pub fn mark_queued(&mut self, row: usize, col: usize) -> bool {
        match self.queued.get_mut([row, col]) {
            Some(flag) if !*flag => {
                *flag = true;
                true
            }
            _ => false,
        }
    }

    /// Clear a cell's queued flag
    pub fn clear_queued(&mut self, row: usize, col: usize) {
        if let Some(flag) = self.queued.get_mut([row, col]) {
            *flag = false;
        }
    }

    /// Number of observed cells
    pub fn observed_count(&self) -> usize {
        self.observed.iter().filter(|&&observed| observed).count()
    }

    /// Number of cells with no possible pattern
    pub fn contradiction_count(&self) -> usize {
        self.possibilities
            .iter()
            .filter(|bits| bits.is_empty())
            .count()
    }

    /// Total possibilities left across the grid
    pub fn total_remaining(&self) -> usize {
        self.uncertainty.sum()
    }

    /// Whether every cell has been observed
    pub fn is_fully_determined(&self) -> bool {
        self.observed.iter().all(|&observed| observed)
    }
}
