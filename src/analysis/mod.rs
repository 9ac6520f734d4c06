//! Analysis of example tiles into weighted overlapping patterns

/// Pattern extraction, deduplication and frequency counting
pub mod patterns;
