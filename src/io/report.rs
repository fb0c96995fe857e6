//! Serializable grid snapshots and run summaries

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::algorithm::placement::PlacementRequest;
use crate::algorithm::scheduler::{
    ChangeKind, GridChange, GridObserver, RunReport, RunStats, SchedulerState,
};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::Grid;

/// Copy of every cell's tile and stored entropy, indexed `[x][y]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Iteration the snapshot was taken in
    pub iteration: usize,
    /// Grid side length
    pub size: usize,
    /// Placed tile per cell, `null` while uncollapsed
    pub tiles: Vec<Vec<Option<usize>>>,
    /// Stored entropy per cell
    pub entropy: Vec<Vec<usize>>,
}

impl GridSnapshot {
    /// Capture the current grid
    pub fn capture(iteration: usize, grid: &Grid) -> Self {
        let size = grid.size();
        let mut tiles = vec![vec![None; size]; size];
        let mut entropy = vec![vec![0; size]; size];

        for ((x, y), cell) in grid.cells().indexed_iter() {
            if let Some(slot) = tiles.get_mut(x).and_then(|column| column.get_mut(y)) {
                *slot = cell.tile;
            }
            if let Some(slot) = entropy.get_mut(x).and_then(|column| column.get_mut(y)) {
                *slot = cell.entropy;
            }
        }

        Self {
            iteration,
            size,
            tiles,
            entropy,
        }
    }
}

/// Shared handle to frames captured by a [`SnapshotRecorder`]
#[derive(Debug, Clone, Default)]
pub struct SnapshotLog {
    frames: Rc<RefCell<Vec<GridSnapshot>>>,
}

impl SnapshotLog {
    /// Number of captured frames
    pub fn len(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Whether nothing was captured
    pub fn is_empty(&self) -> bool {
        self.frames.borrow().is_empty()
    }

    /// Remove and return all captured frames
    pub fn take(&self) -> Vec<GridSnapshot> {
        self.frames.take()
    }
}

/// Observer recording one snapshot per entropy sweep
///
/// Gives the per-iteration entropy values for a whole run.
#[derive(Debug, Default)]
pub struct SnapshotRecorder {
    log: SnapshotLog,
}

impl SnapshotRecorder {
    /// Create a recorder with an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for reading frames after the recorder is handed to a scheduler
    pub fn log(&self) -> SnapshotLog {
        self.log.clone()
    }
}

impl GridObserver for SnapshotRecorder {
    fn on_grid_changed(&mut self, change: &GridChange<'_>) {
        if let ChangeKind::Evaluated { .. } = change.kind {
            self.log
                .frames
                .borrow_mut()
                .push(GridSnapshot::capture(change.iteration, change.grid));
        }
    }
}

/// Document describing a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Seed the random source was built from
    pub seed: u64,
    /// Final lifecycle state
    pub state: SchedulerState,
    /// Accumulated counters
    pub stats: RunStats,
    /// Final grid
    pub grid: GridSnapshot,
    /// Placement requests emitted at convergence
    pub placements: Vec<PlacementRequest>,
}

impl RunSummary {
    /// Build a summary from a run report and the final grid
    pub fn new(seed: u64, report: &RunReport, grid: &Grid) -> Self {
        Self {
            seed,
            state: report.state,
            stats: report.stats,
            grid: GridSnapshot::capture(report.stats.iterations, grid),
            placements: report.placements.clone(),
        }
    }

    /// Write the summary as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn write_json(&self, path: &Path) -> Result<()> {
        write_json(self, path)
    }
}

/// Serialize any value as pretty-printed JSON to a file
///
/// # Errors
///
/// Returns an error if serialization or the write fails
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| {
        AlgorithmError::Serialization {
            path: path.to_path_buf(),
            source,
        }
    })?;
    std::fs::write(path, json).map_err(|source| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "write",
        source,
    })
}
