//! Viable-tile counting and the full-grid entropy sweep

use crate::algorithm::contradiction::{RepairReport, repair};
use crate::algorithm::model::ProbabilityModel;
use crate::spatial::Grid;

/// Entropy of a single cell
///
/// Collapsed cells report 1 so they never look like contradictions.
/// Uncollapsed cells report how many tiles keep a strictly positive weight;
/// zero means no tile fits the current neighborhood.
pub fn entropy_of(grid: &Grid, model: &ProbabilityModel, position: [usize; 2]) -> usize {
    if grid.is_collapsed(position) {
        return 1;
    }
    model.viable_tiles(grid, position).count()
}

/// Outcome of one evaluation pass over the grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Repairs triggered by zero-entropy cells, in scan order
    pub repairs: Vec<RepairReport>,
}

impl SweepReport {
    /// Positions found with zero entropy
    pub fn contradictions(&self) -> Vec<[usize; 2]> {
        self.repairs.iter().map(|report| report.center).collect()
    }

    /// Number of contradictions found
    pub fn contradiction_count(&self) -> usize {
        self.repairs.len()
    }

    /// Number of tiles removed across all repairs
    pub fn tiles_unlocked(&self) -> usize {
        self.repairs.iter().map(RepairReport::tiles_unlocked).sum()
    }
}

/// Evaluate and store entropy for every cell, repairing contradictions in place
///
/// Cells are visited in scan order. A zero result triggers a repair before the
/// next cell is evaluated, so later cells see the cleared region while earlier
/// ones keep the value they were given. The contradicted cell keeps its stored
/// zero until the following sweep.
pub fn evaluate_grid(grid: &mut Grid, model: &ProbabilityModel) -> SweepReport {
    let mut report = SweepReport::default();

    for position in grid.positions() {
        let entropy = entropy_of(grid, model, position);
        grid.set_entropy(position, entropy);

        if entropy == 0 {
            report.repairs.push(repair(grid, position));
        }
    }

    report
}
