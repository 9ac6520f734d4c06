//! Tests for command-line parsing, output naming and pass orchestration

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgb, RgbImage};
    use std::ffi::OsStr;
    use std::path::{Path, PathBuf};
    use wavetile::SynthesisError;
    use wavetile::algorithm::executor::Termination;
    use wavetile::algorithm::selection::Heuristic;
    use wavetile::io::cli::{Cli, PassRunner};
    use wavetile::io::configuration::{
        DEFAULT_OUTPUT_SIZE, DEFAULT_PASS_COUNT, DEFAULT_PATTERN_DIM, DEFAULT_SEED,
    };
    use wavetile::spatial::neighborhood::Neighborhood;

    fn write_checker_tile(path: &Path) {
        let image = RgbImage::from_fn(4, 4, |x, y| {
            if (x / 2 + y / 2) % 2 == 0 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        image.save(path).expect("Failed to write test tile");
    }

    // Tests CLI parsing with only required target argument
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "tiles"]);

        assert_eq!(cli.target, PathBuf::from("tiles"));
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.width, DEFAULT_OUTPUT_SIZE);
        assert_eq!(cli.height, None);
        assert_eq!(cli.dim, DEFAULT_PATTERN_DIM);
        assert_eq!(cli.count, DEFAULT_PASS_COUNT);
        assert_eq!(cli.iterations, None);
        assert!(!cli.quiet);
        assert!(cli.should_show_progress());
    }

    // Tests CLI parsing with all available arguments
    // Verified by swapping the short flags for width and height
    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program",
            "tiles",
            "--output",
            "out/texture.png",
            "-w",
            "40",
            "-H",
            "30",
            "--dim",
            "2",
            "--rotate",
            "--mirror",
            "--dense",
            "--entropy",
            "--random-start",
            "--iterations",
            "500",
            "--seed",
            "123",
            "--count",
            "3",
            "--quiet",
        ]);

        assert_eq!(cli.output, Some(PathBuf::from("out/texture.png")));
        assert_eq!(cli.width, 40);
        assert_eq!(cli.height, Some(30));
        assert_eq!(cli.dim, 2);
        assert!(cli.rotate && cli.mirror && cli.dense && cli.entropy && cli.random_start);
        assert_eq!(cli.iterations, Some(500));
        assert_eq!(cli.seed, 123);
        assert_eq!(cli.count, 3);
        assert!(!cli.should_show_progress());
    }

    // Tests flags map onto the generation configuration
    // Verified by ignoring the height argument
    #[test]
    fn test_generation_config_mapping() {
        let cli = Cli::parse_from([
            "program", "tiles", "-w", "20", "-H", "10", "--dense", "--entropy", "-i", "7",
        ]);
        let config = cli.generation_config();

        assert_eq!(config.output_shape, (10, 20));
        assert_eq!(config.neighborhood, Neighborhood::Dense);
        assert_eq!(config.heuristic, Heuristic::Entropy);
        assert_eq!(config.iteration_limit, Some(7));

        let square = Cli::parse_from(["program", "tiles", "-w", "12"]).generation_config();
        assert_eq!(square.output_shape, (12, 12));
        assert_eq!(square.neighborhood, Neighborhood::Compact);
    }

    // Tests default outputs land in the results directory next to the tiles
    // Verified by writing results into the tile directory itself
    #[test]
    fn test_output_path_defaults() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let target = dir.path().to_string_lossy().to_string();

        let single = Cli::parse_from(["program", target.as_str()]);
        assert_eq!(
            single.output_path(0),
            dir.path().join("results").join("result.png")
        );

        let several = Cli::parse_from(["program", target.as_str(), "--count", "2"]);
        assert_eq!(
            several.output_path(1),
            dir.path().join("results").join("result_1.png")
        );
    }

    // Tests explicit outputs gain an index suffix only for several passes
    // Verified by always appending the pass index
    #[test]
    fn test_output_path_explicit() {
        let single = Cli::parse_from(["program", "tiles", "-o", "out/texture.png"]);
        assert_eq!(single.output_path(0), PathBuf::from("out/texture.png"));

        let several = Cli::parse_from(["program", "tiles", "-o", "out/texture.png", "-n", "4"]);
        assert_eq!(several.output_path(3), PathBuf::from("out/texture_3.png"));
    }

    // Tests a missing target is rejected before any generation
    // Verified by treating missing targets as empty directories
    #[test]
    fn test_load_tiles_missing_target() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let missing = dir.path().join("nowhere.png");
        let cli = Cli::parse_from([OsStr::new("program"), missing.as_os_str()]);
        assert!(matches!(
            cli.load_tiles(),
            Err(SynthesisError::InvalidParameter { .. })
        ));
    }

    // Tests a full run writes one image per pass
    // Verified by writing every pass to the same path
    #[test]
    fn test_runner_writes_outputs() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        write_checker_tile(&dir.path().join("checker.png"));
        let target = dir.path().to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "program",
            target.as_str(),
            "-w",
            "8",
            "--dim",
            "2",
            "--count",
            "2",
            "--quiet",
        ]);
        let mut runner = PassRunner::new(cli);
        let outputs = runner.run_passes().expect("Run should succeed");

        assert_eq!(outputs.len(), 2);
        for (path, report) in &outputs {
            assert!(path.exists(), "Missing output {}", path.display());
            assert!(report.termination.is_some());
            let image = image::open(path).expect("Output is a valid image").to_rgb8();
            assert_eq!(image.dimensions(), (8, 8));
        }
    }

    // Tests a run from a single tile file writes next to it
    // Verified by resolving the default output against the working directory
    #[test]
    fn test_runner_single_file_target() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let tile = dir.path().join("checker.png");
        write_checker_tile(&tile);

        let cli = Cli::parse_from([
            OsStr::new("program"),
            tile.as_os_str(),
            OsStr::new("-w"),
            OsStr::new("6"),
            OsStr::new("--dim"),
            OsStr::new("2"),
            OsStr::new("--iterations"),
            OsStr::new("0"),
            OsStr::new("--quiet"),
        ]);
        let mut runner = PassRunner::new(cli);
        let outputs = runner.run_passes().expect("Run should succeed");

        let expected = dir.path().join("results").join("result.png");
        assert_eq!(outputs.len(), 1);
        assert!(
            outputs
                .first()
                .is_some_and(|(path, report)| *path == expected
                    && report.termination == Some(Termination::IterationLimit))
        );
        assert!(expected.exists());
    }

    // Tests zero requested outputs is an invalid parameter
    // Verified by returning an empty run instead
    #[test]
    fn test_runner_rejects_zero_count() {
        let cli = Cli::parse_from(["program", "tiles", "--count", "0", "--quiet"]);
        let mut runner = PassRunner::new(cli);
        assert!(matches!(
            runner.run(),
            Err(SynthesisError::InvalidParameter {
                parameter: "count",
                ..
            })
        ));
    }
}
