//! Overlapping wave function collapse texture synthesis
//!
//! The system slices example tiles into small overlapping patterns, records which
//! patterns may sit next to each other, and fills an output grid by repeatedly
//! collapsing the least uncertain cell and propagating the consequences to its
//! neighbors. The result is a new image that locally resembles the examples.

/// Core algorithm implementation including adjacency, selection and propagation
pub mod algorithm;
/// Pattern extraction from example tiles
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for probability calculations
pub mod math;
/// Spatial grid management and tile extraction utilities
pub mod spatial;

pub use algorithm::executor::{GenerationConfig, Synthesizer};
pub use io::error::{Result, SynthesisError};
