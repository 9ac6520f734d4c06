use crate::{
    algorithm::adjacency::AdjacencyTable,
    algorithm::cache::{SupportCache, SupportKey},
    spatial::grid::WaveGrid,
};

/// Cell left with no possible pattern during propagation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contradiction {
    /// Wave row
    pub row: usize,
    /// Wave column
    pub col: usize,
    /// Outer iteration during which it was found
    pub iteration: usize,
}

/// Last-in-first-out worklist of cells whose neighbors need re-checking
///
/// Membership is deduplicated through the grid's queued flags, so a cell
/// sits on the stack at most once at a time.
#[derive(Debug, Default)]
pub struct PropagationStack {
    stack: Vec<[usize; 2]>,
}

impl PropagationStack {
    /// Create an empty worklist
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a cell unless it is already queued
    ///
    /// Returns whether the cell was pushed
    pub fn enqueue(&mut self, grid: &mut WaveGrid, row: usize, col: usize) -> bool {
        if grid.mark_queued(row, col) {
            self.stack.push([row, col]);
            true
        } else {
            false
        }
    }

    /// Pop the most recently queued cell and clear its queued flag
    pub fn take_next(&mut self, grid: &mut WaveGrid) -> Option<[usize; 2]> {
        let [row, col] = self.stack.pop()?;
        grid.clear_queued(row, col);
        Some([row, col])
    }

    /// Drop every pending cell, clearing their queued flags
    pub fn clear(&mut self, grid: &mut WaveGrid) {
        for [row, col] in self.stack.drain(..) {
            grid.clear_queued(row, col);
        }
    }

    /// Check if the worklist is empty
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Get the number of pending cells
    pub fn len(&self) -> usize {
        self.stack.len()
    }
}

/// Work performed by one propagation drain
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PropagationSummary {
    /// Cells popped from the worklist
    pub steps: usize,
    /// Patterns removed from neighbor cells
    pub eliminations: usize,
    /// Empty cells encountered, in pop order
    pub contradictions: Vec<Contradiction>,
}

/// Drain the worklist, narrowing neighbors until local consistency holds
///
/// For each popped cell and each offset, a neighbor pattern survives only if
/// some pattern still possible in the popped cell allows it at that offset.
/// Observed and out-of-grid neighbors are skipped. Cells found empty are
/// reported and skipped; nothing is rolled back.
pub fn propagate(
    grid: &mut WaveGrid,
    table: &AdjacencyTable,
    stack: &mut PropagationStack,
    cache: &mut SupportCache,
    iteration: usize,
) -> PropagationSummary {
    let mut summary = PropagationSummary::default();

    while let Some([row, col]) = stack.take_next(grid) {
        summary.steps += 1;

        let Some(sources) = grid.possibilities(row, col).cloned() else {
            continue;
        };
        if sources.is_empty() {
            summary.contradictions.push(Contradiction {
                row,
                col,
                iteration,
            });
            continue;
        }

        for (offset_index, &offset) in table.offsets().iter().enumerate() {
            let Some([neighbor_row, neighbor_col]) = grid.neighbor(row, col, offset) else {
                continue;
            };
            if grid.is_observed(neighbor_row, neighbor_col) {
                continue;
            }

            let allowed = cache
                .get_or_compute_support(SupportKey::new(&sources, offset_index), || {
                    table.support(&sources, offset_index)
                });
            let removed = grid.restrict(neighbor_row, neighbor_col, allowed);

            if removed > 0 {
                summary.eliminations += removed;
                stack.enqueue(grid, neighbor_row, neighbor_col);
            }
        }
    }

    summary
}
