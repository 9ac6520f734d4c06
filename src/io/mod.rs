//! Input/output, configuration and error handling

/// Command-line interface and pass orchestration
pub mod cli;
/// Constants and runtime configuration defaults
pub mod configuration;
/// Error types
pub mod error;
/// Tile loading and PNG export
pub mod image;
/// Terminal progress display
pub mod progress;
/// Wave grid rendering to pixels
pub mod render;
