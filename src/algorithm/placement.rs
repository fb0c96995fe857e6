//! One-shot scan of a finished grid for spawn markers

use serde::{Deserialize, Serialize};

use crate::algorithm::random::RandomSource;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::Grid;

/// Which tile marks a spawn point and how many spawn candidates exist
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Tile that requests a spawn when found off the border
    pub marker_tile: usize,
    /// Number of spawn candidates to choose from
    pub pool_size: usize,
    /// World-space origin of the grid's `[0, 0]` cell
    #[serde(default)]
    pub origin: [f64; 2],
}

impl SpawnConfig {
    /// Check the settings against the tile count
    ///
    /// # Errors
    ///
    /// Returns an error if the marker is not a valid tile or the pool is empty
    pub fn validate(&self, tiles_count: usize) -> Result<()> {
        if self.marker_tile >= tiles_count {
            return Err(AlgorithmError::InvalidTileIndex {
                index: self.marker_tile,
                max_tiles: tiles_count,
            });
        }
        if self.pool_size == 0 {
            return Err(invalid_parameter(
                "pool_size",
                &self.pool_size,
                &"spawn pool must hold at least one candidate",
            ));
        }
        Ok(())
    }
}

/// Request for a collaborator to spawn something at a cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    /// Grid cell that holds the marker tile
    pub cell: [usize; 2],
    /// World-space position derived from the cell
    pub world_position: [f64; 3],
    /// Index into the spawn pool
    pub spawn_choice: usize,
}

/// Receives placement requests once the grid has converged
pub trait Spawner {
    /// Handle one placement request
    fn spawn(&mut self, request: &PlacementRequest);
}

impl Spawner for Vec<PlacementRequest> {
    fn spawn(&mut self, request: &PlacementRequest) {
        self.push(*request);
    }
}

/// World position for a cell
///
/// Rows and columns run toward negative world axes from `origin`; the depth
/// component orders rows so lower `y` draws in front.
pub fn world_position(cell: [usize; 2], grid_size: usize, origin: [f64; 2]) -> [f64; 3] {
    [
        origin[0] - cell[0] as f64,
        origin[1] - cell[1] as f64,
        grid_size as f64 - cell[1] as f64,
    ]
}

/// Emit a placement request for every interior cell holding the marker tile
///
/// Border cells are skipped. The spawn choice is drawn uniformly from the
/// pool for each eligible cell in scan order. The grid is only read.
pub fn place_spawns<R>(grid: &Grid, config: &SpawnConfig, rng: &mut R) -> Vec<PlacementRequest>
where
    R: RandomSource + ?Sized,
{
    let mut requests = Vec::new();

    for cell in grid.positions() {
        if grid.tile_at(cell) != Some(config.marker_tile) || grid.is_border(cell) {
            continue;
        }

        requests.push(PlacementRequest {
            cell,
            world_position: world_position(cell, grid.size(), config.origin),
            spawn_choice: rng.index(config.pool_size),
        });
    }

    log::debug!("Emitted {} placement requests", requests.len());
    requests
}

/// Hand every request to a spawner in order
pub fn dispatch<S>(requests: &[PlacementRequest], spawner: &mut S)
where
    S: Spawner + ?Sized,
{
    for request in requests {
        spawner.spawn(request);
    }
}
