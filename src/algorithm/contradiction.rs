use crate::{io::configuration::REPAIR_RADIUS, spatial::Grid};

/// Summary of cells affected by a contradiction repair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairReport {
    /// Cell whose entropy dropped to zero
    pub center: [usize; 2],
    /// Positions inside the clipped region, in scan order
    pub region: Vec<[usize; 2]>,
    /// Positions that held a tile before the reset
    pub unlocked_positions: Vec<[usize; 2]>,
}

impl RepairReport {
    /// Number of tiles removed by the repair
    pub fn tiles_unlocked(&self) -> usize {
        self.unlocked_positions.len()
    }
}

/// Reset the 3×3 neighborhood around a contradicted cell
///
/// Every cell in the region, clipped to the grid and including the center,
/// reverts to uncollapsed. Stored entropy values are left for the next sweep.
/// This is a local reset, not a rollback: nothing outside the region changes.
pub fn repair(grid: &mut Grid, center: [usize; 2]) -> RepairReport {
    let (x_span, y_span) = grid.region_spans(center, REPAIR_RADIUS);

    let mut region = Vec::with_capacity(x_span.len() * y_span.len());
    let mut unlocked_positions = Vec::new();

    for x in x_span {
        for y in y_span.clone() {
            let position = [x, y];
            region.push(position);
            if grid.clear_tile(position).is_some() {
                unlocked_positions.push(position);
            }
        }
    }

    log::debug!(
        "Contradiction at ({}, {}): cleared {} of {} cells",
        center[0],
        center[1],
        unlocked_positions.len(),
        region.len()
    );

    RepairReport {
        center,
        region,
        unlocked_positions,
    }
}
