//! Command-line interface for synthesizing textures from example tiles

use crate::algorithm::executor::{GenerationConfig, GenerationReport, Synthesizer, Termination};
use crate::algorithm::selection::Heuristic;
use crate::io::configuration::{
    DEFAULT_OUTPUT_SIZE, DEFAULT_PASS_COUNT, DEFAULT_PATTERN_DIM, DEFAULT_SEED, OUTPUT_DIRECTORY,
    OUTPUT_FILE_STEM,
};
use crate::io::error::{Result, invalid_parameter, io_error};
use crate::io::image::{is_tile_image, load_tile, load_tiles, save_rgb};
use crate::io::progress::ProgressManager;
use crate::spatial::neighborhood::Neighborhood;
use crate::spatial::tiles::Tile;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "wavetile")]
#[command(
    author,
    version,
    about = "Synthesize textures from example tiles with overlapping wave function collapse"
)]
/// Command-line arguments for the texture synthesis tool
// Each transformation and heuristic is an independent opt-in switch
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tile image or directory of tile images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output PNG path (defaults to results/result.png next to the tiles)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_SIZE)]
    pub width: usize,

    /// Output height in pixels (defaults to the width)
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Side length of extracted patterns
    #[arg(short, long, default_value_t = DEFAULT_PATTERN_DIM)]
    pub dim: usize,

    /// Include 90°, 180° and 270° rotations of every pattern
    #[arg(short, long)]
    pub rotate: bool,

    /// Include horizontal mirrors of every pattern
    #[arg(short, long)]
    pub mirror: bool,

    /// Constrain every overlapping neighbor instead of the four adjacent cells
    #[arg(short = 'D', long)]
    pub dense: bool,

    /// Select cells by weighted entropy instead of remaining pattern count
    #[arg(short, long)]
    pub entropy: bool,

    /// Collapse a random cell first
    #[arg(long)]
    pub random_start: bool,

    /// Maximum collapses per pass before stopping
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of outputs to generate, seeded consecutively
    #[arg(short = 'n', long, default_value_t = DEFAULT_PASS_COUNT)]
    pub count: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Generation settings described by the arguments
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            output_shape: (self.height.unwrap_or(self.width), self.width),
            pattern_dim: self.dim,
            include_rotations: self.rotate,
            include_reflections: self.mirror,
            neighborhood: if self.dense {
                Neighborhood::Dense
            } else {
                Neighborhood::Compact
            },
            heuristic: if self.entropy {
                Heuristic::Entropy
            } else {
                Heuristic::RemainingPatterns
            },
            iteration_limit: self.iterations,
            random_start: self.random_start,
            seed: self.seed,
        }
    }

    /// Load the tiles named by the target
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a tile image nor a directory,
    /// or if loading fails
    pub fn load_tiles(&self) -> Result<Vec<Tile>> {
        if self.target.is_dir() {
            load_tiles(&self.target)
        } else if self.target.is_file() && is_tile_image(&self.target) {
            Ok(vec![load_tile(&self.target)?])
        } else {
            Err(io_error(
                "Target must be a PNG or JPEG image or a directory of them",
            ))
        }
    }

    /// Output path for the pass at `index`
    ///
    /// A single pass writes to the base path. Several passes append the pass
    /// index to the file stem.
    pub fn output_path(&self, index: usize) -> PathBuf {
        let base = self.output.clone().unwrap_or_else(|| {
            self.tile_directory()
                .join(OUTPUT_DIRECTORY)
                .join(format!("{OUTPUT_FILE_STEM}.png"))
        });

        if self.count <= 1 {
            return base;
        }

        let stem = base
            .file_stem()
            .map_or_else(|| OUTPUT_FILE_STEM.into(), |s| s.to_string_lossy());
        base.with_file_name(format!("{stem}_{index}.png"))
    }

    fn tile_directory(&self) -> &Path {
        if self.target.is_dir() {
            &self.target
        } else {
            self.target.parent().unwrap_or_else(|| Path::new(""))
        }
    }
}

/// Runs the requested generation passes with progress tracking
pub struct PassRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl PassRunner {
    /// Create a new runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Load tiles, build the synthesizer and write every requested output
    ///
    /// # Errors
    ///
    /// Returns an error if tile loading, configuration, pattern extraction or
    /// image export fails
    pub fn run(&mut self) -> Result<()> {
        self.run_passes().map(|_| ())
    }

    /// Same as [`Self::run`], returning the written paths and pass reports
    ///
    /// # Errors
    ///
    /// Returns an error if tile loading, configuration, pattern extraction or
    /// image export fails
    pub fn run_passes(&mut self) -> Result<Vec<(PathBuf, GenerationReport)>> {
        if self.cli.count == 0 {
            return Err(invalid_parameter(
                "count",
                &self.cli.count,
                &"must generate at least one output",
            ));
        }

        let tiles = self.cli.load_tiles()?;
        let synthesizer = Synthesizer::new(&tiles, self.cli.generation_config())?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.cli.count);
        }

        let mut outputs = Vec::with_capacity(self.cli.count);
        for index in 0..self.cli.count {
            outputs.push(self.run_pass(&synthesizer, index)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(outputs)
    }

    fn run_pass(
        &mut self,
        synthesizer: &Synthesizer,
        index: usize,
    ) -> Result<(PathBuf, GenerationReport)> {
        let output_path = self.cli.output_path(index);
        let seed = self.cli.seed.wrapping_add(index as u64);
        let mut engine = synthesizer.engine_with_seed(seed);

        if let Some(ref mut pm) = self.progress_manager {
            let label = output_path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            pm.start_pass(index, &label, engine.grid().cell_count());
        }

        while engine.run_iteration() {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_pass(index, engine.resolved_cells());
            }
        }

        save_rgb(&engine.render(), &output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_pass(index);
        }

        let (_, report) = engine.into_parts();
        if !self.cli.quiet {
            Self::print_summary(&output_path, &report);
        }

        Ok((output_path, report))
    }

    // Allow print for user feedback on incomplete passes
    #[allow(clippy::print_stderr)]
    fn print_summary(output_path: &Path, report: &GenerationReport) {
        if report.termination == Some(Termination::IterationLimit) {
            eprintln!(
                "{}: stopped at the iteration limit after {} collapses",
                output_path.display(),
                report.collapses
            );
        }
        if !report.contradictions.is_empty() {
            eprintln!(
                "{}: {} contradictions, first at wave cell ({}, {})",
                output_path.display(),
                report.contradictions.len(),
                report.contradictions.first().map_or(0, |c| c.row),
                report.contradictions.first().map_or(0, |c| c.col),
            );
        }
    }
}
