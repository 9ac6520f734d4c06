use crate::{
    algorithm::adjacency::AdjacencyTable,
    algorithm::cache::SupportCache,
    algorithm::propagation::{Contradiction, PropagationStack, propagate},
    algorithm::selection::{Heuristic, RandomSelector, select_lowest_uncertainty},
    analysis::patterns::PatternLibrary,
    io::configuration::{
        DEFAULT_OUTPUT_SIZE, DEFAULT_PATTERN_DIM, DEFAULT_SEED, MAX_OUTPUT_DIMENSION,
        MIN_PATTERN_DIM,
    },
    io::error::{Result, SynthesisError, invalid_parameter},
    io::render::render,
    spatial::grid::WaveGrid,
    spatial::neighborhood::{Neighborhood, Offset},
    spatial::tiles::Tile,
};
use ndarray::Array3;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Parameters controlling pattern extraction and generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Output image size as (height, width) in pixels
    pub output_shape: (usize, usize),
    /// Side length of extracted patterns
    pub pattern_dim: usize,
    /// Whether to include rotated versions of patterns
    pub include_rotations: bool,
    /// Whether to include mirrored versions of patterns
    pub include_reflections: bool,
    /// Neighbor offsets that constrain adjacent cells
    pub neighborhood: Neighborhood,
    /// Cell uncertainty measure used for selection
    pub heuristic: Heuristic,
    /// Maximum number of probabilistic collapses per pass
    pub iteration_limit: Option<usize>,
    /// Collapse a uniformly random cell first instead of the first candidate
    pub random_start: bool,
    /// Seed for the pattern draws
    pub seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            output_shape: (DEFAULT_OUTPUT_SIZE, DEFAULT_OUTPUT_SIZE),
            pattern_dim: DEFAULT_PATTERN_DIM,
            include_rotations: false,
            include_reflections: false,
            neighborhood: Neighborhood::Compact,
            heuristic: Heuristic::RemainingPatterns,
            iteration_limit: None,
            random_start: false,
            seed: DEFAULT_SEED,
        }
    }
}

impl GenerationConfig {
    /// Validate the configuration and resolve its neighbor offsets
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pattern dimension is below the minimum
    /// - The output shape is smaller than one pattern or above the size limit
    /// - A custom neighborhood is invalid for the pattern dimension
    pub fn validate(&self) -> Result<Vec<Offset>> {
        if self.pattern_dim < MIN_PATTERN_DIM {
            return Err(invalid_parameter(
                "pattern_dim",
                &self.pattern_dim,
                &format!("must be at least {MIN_PATTERN_DIM}"),
            ));
        }

        let (height, width) = self.output_shape;
        for (parameter, value) in [("output_height", height), ("output_width", width)] {
            if value < self.pattern_dim {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be at least the pattern dimension {}", self.pattern_dim),
                ));
            }
            if value > MAX_OUTPUT_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_OUTPUT_DIMENSION}"),
                ));
            }
        }

        self.neighborhood.offsets(self.pattern_dim)
    }

    /// Wave grid shape as (rows, cols) for this output shape
    pub const fn wave_shape(&self) -> (usize, usize) {
        (
            self.output_shape.0 + 1 - self.pattern_dim,
            self.output_shape.1 + 1 - self.pattern_dim,
        )
    }
}

/// Why a generation pass stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// No undetermined cell with a possible pattern remains
    Completed,
    /// The iteration limit was reached with candidates left
    IterationLimit,
}

/// Diagnostics accumulated over one generation pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Set once the pass has stopped
    pub termination: Option<Termination>,
    /// Probabilistic collapses performed
    pub collapses: usize,
    /// Cells popped from the propagation worklist
    pub propagation_steps: usize,
    /// Patterns removed by propagation
    pub eliminations: usize,
    /// Cells found empty, in discovery order
    pub contradictions: Vec<Contradiction>,
}

impl GenerationReport {
    /// Whether the pass ended with every cell resolved and no contradiction
    pub fn is_clean(&self) -> bool {
        self.termination == Some(Termination::Completed) && self.contradictions.is_empty()
    }
}

/// Rendered pixels and diagnostics of a finished pass
#[derive(Clone, Debug)]
pub struct Generation {
    /// RGB buffer of the configured output shape
    pub pixels: Array3<u8>,
    /// Diagnostics for the pass
    pub report: GenerationReport,
}

/// Validated configuration with its pattern library and adjacency table
///
/// Built once, then shared read-only by any number of collapse engines.
#[derive(Clone, Debug)]
pub struct Synthesizer {
    config: GenerationConfig,
    library: PatternLibrary,
    table: AdjacencyTable,
}

impl Synthesizer {
    /// Extract patterns from the tiles and precompute their adjacency
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration fails validation
    /// - No tiles were supplied, or a tile is smaller than the pattern size
    pub fn new(tiles: &[Tile], config: GenerationConfig) -> Result<Self> {
        let offsets = config.validate()?;
        let library = PatternLibrary::extract(
            tiles,
            config.pattern_dim,
            config.include_rotations,
            config.include_reflections,
        )?;
        let table = AdjacencyTable::build(&library, &offsets);

        Ok(Self {
            config,
            library,
            table,
        })
    }

    /// The validated configuration
    pub const fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Extracted patterns and their frequencies
    pub const fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Pattern compatibility table
    pub const fn table(&self) -> &AdjacencyTable {
        &self.table
    }

    /// Engine seeded from the configured seed
    pub fn engine(&self) -> CollapseEngine<'_, StdRng> {
        self.engine_with_seed(self.config.seed)
    }

    /// Engine seeded from an explicit seed
    pub fn engine_with_seed(&self, seed: u64) -> CollapseEngine<'_, StdRng> {
        self.engine_with_rng(StdRng::seed_from_u64(seed))
    }

    /// Engine drawing from a caller-supplied random source
    pub fn engine_with_rng<R: Rng>(&self, rng: R) -> CollapseEngine<'_, R> {
        CollapseEngine::new(&self.library, &self.table, &self.config, rng)
    }

    /// Run one pass with the configured seed and render it
    pub fn generate(&self) -> Generation {
        self.generate_with_seed(self.config.seed)
    }

    /// Run one pass with an explicit seed and render it
    pub fn generate_with_seed(&self, seed: u64) -> Generation {
        let mut engine = self.engine_with_seed(seed);
        engine.run();
        Generation {
            pixels: engine.render(),
            report: engine.report().clone(),
        }
    }
}

/// Wave function collapse loop over a single wave grid
///
/// Alternates selection of the least uncertain cell, a frequency-weighted
/// collapse of that cell, and constraint propagation, until no candidate cell
/// remains or the iteration limit is reached. Contradictions are recorded and
/// left in place.
pub struct CollapseEngine<'a, R = StdRng> {
    library: &'a PatternLibrary,
    table: &'a AdjacencyTable,
    heuristic: Heuristic,
    iteration_limit: Option<usize>,
    random_start: bool,
    grid: WaveGrid,
    stack: PropagationStack,
    cache: SupportCache,
    selector: RandomSelector<R>,
    iteration: usize,
    report: GenerationReport,
}

impl<'a, R: Rng> CollapseEngine<'a, R> {
    /// Create an engine with every cell in full superposition
    ///
    /// `config` must be the configuration the library and table were built
    /// from; engines are handed out by [`Synthesizer`] to keep them in step.
    pub(crate) fn new(
        library: &'a PatternLibrary,
        table: &'a AdjacencyTable,
        config: &GenerationConfig,
        rng: R,
    ) -> Self {
        let (rows, cols) = config.wave_shape();
        Self {
            library,
            table,
            heuristic: config.heuristic,
            iteration_limit: config.iteration_limit,
            random_start: config.random_start,
            grid: WaveGrid::new(rows, cols, library.len()),
            stack: PropagationStack::new(),
            cache: SupportCache::new(),
            selector: RandomSelector::from_rng(rng),
            iteration: 0,
            report: GenerationReport::default(),
        }
    }

    /// Access the wave grid
    pub const fn grid(&self) -> &WaveGrid {
        &self.grid
    }

    /// Diagnostics so far
    pub const fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// Support cache statistics and contents
    pub const fn cache(&self) -> &SupportCache {
        &self.cache
    }

    /// Completed outer iterations
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Whether the pass has stopped
    pub const fn is_finished(&self) -> bool {
        self.report.termination.is_some()
    }

    /// Number of cells fixed to a single pattern
    pub fn resolved_cells(&self) -> usize {
        self.grid.observed_count()
    }

    /// Start a fresh pass on the same patterns, keeping the random stream
    pub fn reset(&mut self) {
        self.stack.clear(&mut self.grid);
        self.grid.all_possible();
        self.iteration = 0;
        self.report = GenerationReport::default();
    }

    /// Execute one select, collapse and propagate cycle
    ///
    /// Returns false once the pass has stopped.
    pub fn run_iteration(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let candidate = if self.random_start && self.iteration == 0 {
            self.random_cell()
        } else {
            select_lowest_uncertainty(&self.grid, self.heuristic, self.library.counts())
        };

        let Some([row, col]) = candidate else {
            self.report.termination = Some(Termination::Completed);
            return false;
        };

        if self
            .iteration_limit
            .is_some_and(|limit| self.iteration >= limit)
        {
            self.report.termination = Some(Termination::IterationLimit);
            return false;
        }

        self.observe(row, col);
        self.iteration += 1;
        true
    }

    /// Run until the pass stops
    pub fn run(&mut self) -> Termination {
        while self.run_iteration() {}
        self.report.termination.unwrap_or(Termination::Completed)
    }

    /// Collapse a chosen cell and propagate, outside the selection order
    ///
    /// Counts as one iteration.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is outside the grid, already observed, or
    /// holds no possible pattern
    pub fn collapse_at(&mut self, row: usize, col: usize) -> Result<usize> {
        if !self.grid.contains(row, col) {
            return Err(SynthesisError::InvalidCell {
                row,
                col,
                reason: "outside the wave grid",
            });
        }
        if self.grid.is_observed(row, col) {
            return Err(SynthesisError::InvalidCell {
                row,
                col,
                reason: "already observed",
            });
        }
        if self.grid.is_contradiction(row, col) {
            return Err(SynthesisError::InvalidCell {
                row,
                col,
                reason: "no pattern remains possible",
            });
        }

        let pattern = self.observe(row, col).ok_or(SynthesisError::InvalidCell {
            row,
            col,
            reason: "no pattern could be drawn",
        })?;
        self.iteration += 1;
        Ok(pattern)
    }

    /// Render the current state of the wave
    pub fn render(&self) -> Array3<u8> {
        render(&self.grid, self.library)
    }

    /// Consume the engine, keeping its grid and report
    pub fn into_parts(self) -> (WaveGrid, GenerationReport) {
        (self.grid, self.report)
    }

    fn random_cell(&mut self) -> Option<[usize; 2]> {
        let index = self.selector.index_below(self.grid.cell_count())?;
        let cols = self.grid.cols();
        Some([index / cols, index % cols])
    }

    /// Draw a pattern for the cell weighted by frequency, fix it, propagate
    fn observe(&mut self, row: usize, col: usize) -> Option<usize> {
        let candidates = self.grid.possible_patterns(row, col);
        let weights: Vec<usize> = candidates
            .iter()
            .map(|&pattern| self.library.count(pattern))
            .collect();
        let pattern = self.selector.weighted_choice(&candidates, &weights)?;

        self.grid.fix(row, col, pattern);
        self.stack.enqueue(&mut self.grid, row, col);
        self.report.collapses += 1;

        let summary = propagate(
            &mut self.grid,
            self.table,
            &mut self.stack,
            &mut self.cache,
            self.iteration,
        );
        self.report.propagation_steps += summary.steps;
        self.report.eliminations += summary.eliminations;
        self.report.contradictions.extend(summary.contradictions);

        Some(pattern)
    }
}
