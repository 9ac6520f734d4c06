/// Pattern compatibility table over neighbor offsets
pub mod adjacency;
/// Efficient bitset implementation for pattern possibility tracking
pub mod bitset;
/// Caching system for propagation support sets
pub mod cache;
/// Generation configuration, synthesizer and collapse loop
pub mod executor;
/// Constraint propagation worklist
pub mod propagation;
/// Cell selection heuristics and seeded random choice
pub mod selection;
