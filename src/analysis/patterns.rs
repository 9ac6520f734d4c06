//! Pattern extraction and frequency statistics from example tiles

use crate::io::configuration::MIN_PATTERN_DIM;
use crate::io::error::{Result, SynthesisError, invalid_parameter};
use crate::spatial::tiles::{Pattern, Tile};

/// Deduplicated patterns with their observed frequencies
///
/// Pattern indices follow extraction order, which makes every later tie-break
/// reproducible for a given tile sequence.
#[derive(Clone, Debug)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
    counts: Vec<usize>,
    dim: usize,
}

impl PatternLibrary {
    /// Create an empty library for patterns of side `dim`
    pub const fn new(dim: usize) -> Self {
        Self {
            patterns: Vec::new(),
            counts: Vec::new(),
            dim,
        }
    }

    /// Extract every `dim x dim` window from the tiles
    ///
    /// Each tile is scanned column by column. With rotations enabled the 90°,
    /// 180° and 270° counter-clockwise turns of every window are counted too;
    /// with reflections enabled each of those is followed by its mirror.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `dim` is below the minimum pattern dimension
    /// - No tiles were supplied
    /// - A tile is smaller than `dim` in either axis
    pub fn extract(
        tiles: &[Tile],
        dim: usize,
        include_rotations: bool,
        include_reflections: bool,
    ) -> Result<Self> {
        if dim < MIN_PATTERN_DIM {
            return Err(invalid_parameter(
                "pattern_dim",
                &dim,
                &format!("must be at least {MIN_PATTERN_DIM}"),
            ));
        }
        if tiles.is_empty() {
            return Err(SynthesisError::EmptyTileSet);
        }
        for (index, tile) in tiles.iter().enumerate() {
            if tile.height() < dim || tile.width() < dim {
                return Err(SynthesisError::TileTooSmall {
                    index,
                    height: tile.height(),
                    width: tile.width(),
                    dim,
                });
            }
        }

        let mut library = Self::new(dim);
        for tile in tiles {
            for window in tile.windows(dim) {
                for variant in window.variants(include_rotations, include_reflections) {
                    library.add_pattern(variant);
                }
            }
        }

        Ok(library)
    }

    /// Record one occurrence of a pattern
    ///
    /// Linear scan for an exact pixel match; a match bumps its count, otherwise
    /// the pattern is appended with a count of one. Returns the pattern index.
    pub fn add_pattern(&mut self, pattern: Pattern) -> usize {
        if let Some(index) = self.patterns.iter().position(|known| *known == pattern) {
            if let Some(count) = self.counts.get_mut(index) {
                *count += 1;
            }
            return index;
        }
        self.patterns.push(pattern);
        self.counts.push(1);
        self.patterns.len() - 1
    }

    /// Side length of every pattern
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if no pattern has been recorded
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All distinct patterns in extraction order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Pattern at an index
    pub fn pattern(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    /// Occurrence counts aligned with `patterns`
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Occurrence count of one pattern, zero for unknown indices
    pub fn count(&self, index: usize) -> usize {
        self.counts.get(index).copied().unwrap_or(0)
    }

    /// Sum of all occurrence counts
    pub fn total_count(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Observed frequency of one pattern
    pub fn probability(&self, index: usize) -> f64 {
        let total = self.total_count();
        if total == 0 {
            return 0.0;
        }
        self.count(index) as f64 / total as f64
    }

    /// Observed frequency of every pattern
    pub fn probabilities(&self) -> Vec<f64> {
        (0..self.len()).map(|index| self.probability(index)).collect()
    }
}
