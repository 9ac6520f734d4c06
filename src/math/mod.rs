//! Mathematical utilities for the algorithm

/// Weighted sampling and entropy calculations
pub mod probability;
