//! Spatial data structures and grid manipulation
//!
//! This module contains spatial-related functionality including:
//! - Tile and pattern pixel blocks
//! - Neighbor offsets between overlapping patterns
//! - Wave grid state management

/// Wave grid state management and manipulation functions
pub mod grid;
/// Neighbor offset sets
pub mod neighborhood;
/// Tile and pattern data structures and window extraction
pub mod tiles;

pub use grid::WaveGrid;
