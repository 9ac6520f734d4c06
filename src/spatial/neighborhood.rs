//! Neighbor offsets linking wave cells whose pattern footprints overlap

use crate::io::error::{Result, invalid_parameter};
use std::fmt;
use std::ops::Neg;

/// Row and column displacement between two wave cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Offset {
    /// Row delta
    pub row: isize,
    /// Column delta
    pub col: isize,
}

impl Offset {
    /// The zero displacement, never a valid neighbor
    pub const ZERO: Self = Self::new(0, 0);
    /// One row up
    pub const UP: Self = Self::new(-1, 0);
    /// One column right
    pub const RIGHT: Self = Self::new(0, 1);
    /// One row down
    pub const DOWN: Self = Self::new(1, 0);
    /// One column left
    pub const LEFT: Self = Self::new(0, -1);

    /// Create an offset from row and column deltas
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    /// Check that both deltas lie within `dim - 1` of the origin
    pub const fn overlaps_within(&self, dim: usize) -> bool {
        let reach = dim as isize - 1;
        self.row.abs() <= reach && self.col.abs() <= reach
    }
}

impl Neg for Offset {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.row, -self.col)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Which neighbor relationships constrain adjacent cells
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Neighborhood {
    /// Up, right, down, left
    #[default]
    Compact,
    /// Every offset whose footprints overlap, `(2 * dim - 1)^2 - 1` entries
    Dense,
    /// Caller supplied offsets
    Custom(Vec<Offset>),
}

impl Neighborhood {
    /// Resolve and validate the offset list for a pattern dimension
    ///
    /// # Errors
    ///
    /// Returns an error if a custom set is empty, contains the zero offset,
    /// repeats an offset, or reaches beyond `dim - 1` in either axis
    pub fn offsets(&self, dim: usize) -> Result<Vec<Offset>> {
        match self {
            Self::Compact => Ok(compact_offsets()),
            Self::Dense => Ok(dense_offsets(dim)),
            Self::Custom(offsets) => {
                if offsets.is_empty() {
                    return Err(invalid_parameter(
                        "offsets",
                        &"[]",
                        &"at least one neighbor offset is required",
                    ));
                }
                for (index, offset) in offsets.iter().enumerate() {
                    if *offset == Offset::ZERO {
                        return Err(invalid_parameter(
                            "offsets",
                            offset,
                            &"the zero offset does not describe a neighbor",
                        ));
                    }
                    if !offset.overlaps_within(dim) {
                        return Err(invalid_parameter(
                            "offsets",
                            offset,
                            &format!("must lie within {} of the origin", dim.saturating_sub(1)),
                        ));
                    }
                    if offsets.get(..index).is_some_and(|seen| seen.contains(offset)) {
                        return Err(invalid_parameter(
                            "offsets",
                            offset,
                            &"offsets must be unique",
                        ));
                    }
                }
                Ok(offsets.clone())
            }
        }
    }
}

/// The four edge neighbors in up, right, down, left order
pub fn compact_offsets() -> Vec<Offset> {
    vec![Offset::UP, Offset::RIGHT, Offset::DOWN, Offset::LEFT]
}

/// Every non-zero offset within `dim - 1`, enumerated row-major
pub fn dense_offsets(dim: usize) -> Vec<Offset> {
    let reach = dim as isize - 1;
    let mut offsets = Vec::new();
    for row in -reach..=reach {
        for col in -reach..=reach {
            let offset = Offset::new(row, col);
            if offset != Offset::ZERO {
                offsets.push(offset);
            }
        }
    }
    offsets
}
