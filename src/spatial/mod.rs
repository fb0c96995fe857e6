//! Spatial data structures
//!
//! This module contains:
//! - The square cell grid and its per-cell state
//! - Orthogonal neighbor directions

/// Neighbor directions and coordinate offsets
pub mod direction;
/// Grid state management
pub mod grid;

pub use direction::{ALL_DIRECTIONS, Direction};
pub use grid::{Cell, Grid};
