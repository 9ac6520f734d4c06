use crate::{
    algorithm::bitset::PatternBitset,
    analysis::patterns::PatternLibrary,
    spatial::{neighborhood::Offset, tiles::Pattern},
};
use std::ops::Range;

/// Precomputed compatibility between every ordered pattern pair and offset
///
/// `fits(a, b, o)` answers whether pattern `b` may sit at offset `o` relative
/// to pattern `a`. Stored as one bitset of compatible `b` per `(a, o)` so
/// propagation can union whole rows at once.
#[derive(Clone, Debug)]
pub struct AdjacencyTable {
    compatible: Vec<PatternBitset>,
    offsets: Vec<Offset>,
    pattern_count: usize,
}

impl AdjacencyTable {
    /// Compare every pattern pair over every offset
    pub fn build(library: &PatternLibrary, offsets: &[Offset]) -> Self {
        let patterns = library.patterns();
        let pattern_count = patterns.len();
        let mut compatible = Vec::with_capacity(pattern_count * offsets.len());

        for first in patterns {
            for &offset in offsets {
                let mut row = PatternBitset::new(pattern_count);
                for (index, second) in patterns.iter().enumerate() {
                    if overlap_fits(first, second, offset) {
                        row.insert(index);
                    }
                }
                compatible.push(row);
            }
        }

        Self {
            compatible,
            offsets: offsets.to_vec(),
            pattern_count,
        }
    }

    /// Number of patterns on each axis of the table
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Offsets indexed by the third table axis
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Index of the negated offset, if the set contains it
    pub fn opposite(&self, offset_index: usize) -> Option<usize> {
        let offset = self.offsets.get(offset_index)?;
        self.offsets.iter().position(|&other| other == -*offset)
    }

    /// Patterns allowed at `offset_index` relative to `pattern`
    pub fn compatible(&self, pattern: usize, offset_index: usize) -> Option<&PatternBitset> {
        if pattern >= self.pattern_count || offset_index >= self.offsets.len() {
            return None;
        }
        self.compatible
            .get(pattern * self.offsets.len() + offset_index)
    }

    /// Whether `second` may occur at `offset_index` relative to `first`
    pub fn fits(&self, first: usize, second: usize, offset_index: usize) -> bool {
        self.compatible(first, offset_index)
            .is_some_and(|row| row.contains(second))
    }

    /// Every pattern compatible with at least one member of `sources`
    pub fn support(&self, sources: &PatternBitset, offset_index: usize) -> PatternBitset {
        let mut allowed = PatternBitset::new(self.pattern_count);
        for source in sources.iter() {
            if let Some(row) = self.compatible(source, offset_index) {
                allowed.union_with(row);
            }
        }
        allowed
    }
}

/// Whether two patterns agree where their footprints overlap
///
/// `second` is placed at `offset` from `first`'s origin. An empty overlap
/// imposes no constraint.
pub fn overlap_fits(first: &Pattern, second: &Pattern, offset: Offset) -> bool {
    let dim = first.dim();
    if second.dim() != dim {
        return false;
    }
    let (Some((first_rows, second_rows)), Some((first_cols, second_cols))) = (
        overlap_span(offset.row, dim),
        overlap_span(offset.col, dim),
    ) else {
        return true;
    };

    first.region(first_rows, first_cols) == second.region(second_rows, second_cols)
}

/// Overlapping index ranges along one axis, in each pattern's own frame
fn overlap_span(shift: isize, dim: usize) -> Option<(Range<usize>, Range<usize>)> {
    let dim = dim as isize;
    let start = shift.max(0);
    let end = (shift + dim).min(dim);
    if start >= end {
        return None;
    }
    Some((
        start as usize..end as usize,
        (start - shift) as usize..(end - shift) as usize,
    ))
}
