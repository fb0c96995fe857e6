/// Fixed-size bitset for viable tile tracking
pub mod bitset;
/// Local neighborhood reset around contradictions
pub mod contradiction;
/// Entropy evaluation and the full-grid sweep
pub mod entropy;
/// Transition matrices and probability vectors
pub mod model;
/// Spawn-marker scan over the finished grid
pub mod placement;
/// Injectable random sources
pub mod random;
/// Collapse loop, lifecycle state and host hooks
pub mod scheduler;
/// Lowest-entropy cell selection and tile sampling
pub mod selection;
