//! Directional transition matrices and per-cell probability vectors

use ndarray::{Array3, ArrayView1, Axis};

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::{ALL_DIRECTIONS, Direction, Grid};

/// Four `tiles × tiles` weight tables, one per neighbor direction
///
/// `weight(d, a, b)` is the relative likelihood that tile `b` fits next to a
/// neighbor holding tile `a` on side `d`. Weights are finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrices {
    /// Indexed `[direction, neighbor_tile, candidate_tile]`
    weights: Array3<f64>,
}

impl TransitionMatrices {
    /// Wrap a `4 × n × n` weight table
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not `4 × n × n` with `n >= 1`, or if
    /// any weight is negative or not finite
    pub fn new(weights: Array3<f64>) -> Result<Self> {
        let (directions, rows, cols) = weights.dim();
        if directions != ALL_DIRECTIONS.len() {
            return Err(crate::io::error::invalid_parameter(
                "transitions",
                &directions,
                &"expected exactly four direction matrices",
            ));
        }

        if rows == 0 || rows != cols {
            return Err(crate::io::error::invalid_parameter(
                "transitions",
                &format!("{rows}x{cols}"),
                &"each direction matrix must be square and non-empty",
            ));
        }

        for direction in ALL_DIRECTIONS {
            let matrix = weights.index_axis(Axis(0), direction.index());
            for ((from, to), &weight) in matrix.indexed_iter() {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(AlgorithmError::InvalidMatrix {
                        direction,
                        reason: format!("weight [{from}][{to}] = {weight} must be finite and >= 0"),
                    });
                }
            }
        }

        Ok(Self { weights })
    }

    /// Build from four nested row lists ordered top, bottom, left, right
    ///
    /// # Errors
    ///
    /// Returns an error if any matrix is not `tiles_count × tiles_count` or
    /// holds an invalid weight
    pub fn from_rows(tiles_count: usize, matrices: [&[Vec<f64>]; 4]) -> Result<Self> {
        let mut flat = Vec::with_capacity(4 * tiles_count * tiles_count);

        for (direction, rows) in ALL_DIRECTIONS.into_iter().zip(matrices) {
            if rows.len() != tiles_count {
                return Err(AlgorithmError::InvalidMatrix {
                    direction,
                    reason: format!("expected {tiles_count} rows, got {}", rows.len()),
                });
            }
            for (index, row) in rows.iter().enumerate() {
                if row.len() != tiles_count {
                    return Err(AlgorithmError::InvalidMatrix {
                        direction,
                        reason: format!(
                            "row {index} has {} entries, expected {tiles_count}",
                            row.len()
                        ),
                    });
                }
                flat.extend_from_slice(row);
            }
        }

        let weights = Array3::from_shape_vec((4, tiles_count, tiles_count), flat).map_err(|e| {
            crate::io::error::invalid_parameter("transitions", &tiles_count, &e)
        })?;
        Self::new(weights)
    }

    /// Matrices where every tile pair has weight one
    pub fn uniform(tiles_count: usize) -> Self {
        Self {
            weights: Array3::ones((4, tiles_count, tiles_count)),
        }
    }

    /// Number of distinct tiles
    pub fn tiles_count(&self) -> usize {
        self.weights.dim().1
    }

    /// Weight for `to` given a neighbor holding `from` on side `direction`
    pub fn weight(&self, direction: Direction, from: usize, to: usize) -> f64 {
        self.weights
            .get([direction.index(), from, to])
            .copied()
            .unwrap_or(0.0)
    }

    /// Row of candidate weights for a neighbor tile
    pub fn row(&self, direction: Direction, from: usize) -> Option<ArrayView1<'_, f64>> {
        (from < self.tiles_count()).then(|| {
            self.weights
                .index_axis(Axis(0), direction.index())
                .index_axis_move(Axis(0), from)
        })
    }

}

/// Pure function of grid state producing per-cell tile weights
#[derive(Debug, Clone)]
pub struct ProbabilityModel {
    matrices: TransitionMatrices,
}

impl ProbabilityModel {
    /// Create a model over the given matrices
    pub const fn new(matrices: TransitionMatrices) -> Self {
        Self { matrices }
    }

    /// Underlying transition matrices
    pub const fn matrices(&self) -> &TransitionMatrices {
        &self.matrices
    }

    /// Number of distinct tiles
    pub fn tiles_count(&self) -> usize {
        self.matrices.tiles_count()
    }

    /// Raw weights for every tile at a cell
    ///
    /// Starts from all ones and multiplies in the matching matrix row for each
    /// collapsed in-bounds neighbor. Missing or uncollapsed neighbors add no
    /// constraint. After each row the vector is divided by its maximum so
    /// repeated large or tiny weights stay representable; ratios and the set of
    /// positive entries are unchanged. Not normalized.
    pub fn probability_vector(&self, grid: &Grid, position: [usize; 2]) -> Vec<f64> {
        let mut weights = vec![1.0; self.tiles_count()];

        for direction in ALL_DIRECTIONS {
            let Some(neighbor_tile) = grid
                .neighbor(position, direction)
                .and_then(|neighbor| grid.tile_at(neighbor))
            else {
                continue;
            };
            let Some(row) = self.matrices.row(direction, neighbor_tile) else {
                continue;
            };
            for (weight, &factor) in weights.iter_mut().zip(row.iter()) {
                *weight *= factor;
            }
            rescale(&mut weights);
        }

        weights
    }

    /// Tiles with strictly positive weight at a cell
    pub fn viable_tiles(&self, grid: &Grid, position: [usize; 2]) -> TileBitset {
        TileBitset::from_weights(&self.probability_vector(grid, position))
    }
}

/// Divide by the largest entry, leaving all-zero vectors alone
fn rescale(weights: &mut [f64]) {
    let max = weights.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 && max.is_finite() {
        for weight in weights.iter_mut() {
            *weight /= max;
        }
    }
}
