//! Grid generation by wave-function-collapse driven by directional Markov transition matrices
//!
//! Each cell starts uncollapsed. Every iteration scores each cell by the number
//! of tiles its collapsed neighbors still allow, repairs cells that allow none,
//! and collapses the lowest-scoring cell by sampling from the product of its
//! neighbors' transition rows.

#![forbid(unsafe_code)]

/// Core algorithm: probability model, entropy sweep, selection, repair and the collapse loop
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for probability calculations
pub mod math;
/// Spatial grid management and neighbor directions
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
