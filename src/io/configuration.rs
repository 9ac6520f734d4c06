//! Algorithm constants and runtime configuration defaults

/// Side length of extracted square patterns
pub const DEFAULT_PATTERN_DIM: usize = 3;

/// Smallest pattern side that still yields overlapping constraints
pub const MIN_PATTERN_DIM: usize = 2;

/// Default output height and width in pixels
pub const DEFAULT_OUTPUT_SIZE: usize = 64;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed output dimension
pub const MAX_OUTPUT_DIMENSION: usize = 10_000;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Number of generation passes per CLI run
pub const DEFAULT_PASS_COUNT: usize = 1;

/// Color painted over cells left without any possible pattern
pub const CONTRADICTION_COLOR: [u8; 3] = [255, 51, 204];

/// File extensions accepted as tile images
pub const TILE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

// Directories are skipped when loading tiles, so results never feed back in
/// Directory created next to the tiles for generated images
pub const OUTPUT_DIRECTORY: &str = "results";
/// File stem of generated images
pub const OUTPUT_FILE_STEM: &str = "result";

// Bounds memory when many distinct possibility sets appear during propagation
/// Maximum number of memoized support sets before the cache is flushed
pub const SUPPORT_CACHE_CAPACITY: usize = 4096;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
