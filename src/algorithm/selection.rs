use crate::{
    math::probability::{shannon_entropy, weighted_index},
    spatial::grid::WaveGrid,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// How the uncertainty of an undetermined cell is scored
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// Number of patterns still possible
    #[default]
    RemainingPatterns,
    /// Shannon entropy of the frequency-weighted remaining patterns
    Entropy,
}

/// Uncertainty score of one cell under a heuristic
///
/// `counts` are the pattern occurrence counts used as entropy weights.
pub fn uncertainty_score(
    grid: &WaveGrid,
    row: usize,
    col: usize,
    heuristic: Heuristic,
    counts: &[usize],
) -> f64 {
    match heuristic {
        Heuristic::RemainingPatterns => grid.remaining(row, col) as f64,
        Heuristic::Entropy => grid.possibilities(row, col).map_or(0.0, |bits| {
            shannon_entropy(
                bits.iter()
                    .map(|pattern| counts.get(pattern).copied().unwrap_or(0)),
            )
        }),
    }
}

/// Find the undetermined cell with the strictly lowest uncertainty
///
/// Scans column by column, rows within a column; the first cell found wins
/// ties. Observed cells and contradictions are never candidates. Returns
/// `None` once no candidate remains.
pub fn select_lowest_uncertainty(
    grid: &WaveGrid,
    heuristic: Heuristic,
    counts: &[usize],
) -> Option<[usize; 2]> {
    let mut best: Option<([usize; 2], f64)> = None;

    for col in 0..grid.cols() {
        for row in 0..grid.rows() {
            if grid.is_observed(row, col) || grid.remaining(row, col) == 0 {
                continue;
            }
            let score = uncertainty_score(grid, row, col, heuristic, counts);
            if best.is_none_or(|(_, lowest)| score < lowest) {
                best = Some(([row, col], score));
            }
        }
    }

    best.map(|(position, _)| position)
}

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector<R = StdRng> {
    rng: R,
}

impl RandomSelector<StdRng> {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomSelector<R> {
    /// Wrap an existing random source
    pub const fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Pick one candidate with probability proportional to its weight
    ///
    /// Returns the chosen candidate, not its position in the slice. `None`
    /// when there are no candidates or every weight is zero.
    pub fn weighted_choice(&mut self, candidates: &[usize], weights: &[usize]) -> Option<usize> {
        let index = weighted_index(&mut self.rng, weights)?;
        candidates.get(index).copied()
    }

    /// Uniform index below `bound`
    pub fn index_below(&mut self, bound: usize) -> Option<usize> {
        (bound > 0).then(|| self.rng.random_range(0..bound))
    }
}
