//! JSON scene files describing a collapse run
//!
//! A scene carries everything the collapse consumes from outside: grid size,
//! tile count, the four direction matrices, optional spawn settings, cells to
//! pre-collapse and an optional iteration cap.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::algorithm::model::{ProbabilityModel, TransitionMatrices};
use crate::algorithm::placement::SpawnConfig;
use crate::algorithm::random::RandomSource;
use crate::algorithm::scheduler::{CollapseScheduler, SchedulerConfig};
use crate::io::configuration::{DEFAULT_GRID_SIZE, MAX_GRID_DIMENSION};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};

/// Transition weights per direction as nested rows
///
/// `top[a][b]` weighs tile `b` for a cell whose top neighbor holds `a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalMatrices {
    /// Weights applied for a collapsed neighbor above
    pub top: Vec<Vec<f64>>,
    /// Weights applied for a collapsed neighbor below
    pub bottom: Vec<Vec<f64>>,
    /// Weights applied for a collapsed neighbor to the left
    pub left: Vec<Vec<f64>>,
    /// Weights applied for a collapsed neighbor to the right
    pub right: Vec<Vec<f64>>,
}

impl DirectionalMatrices {
    /// Matrices with every weight set to `weight`
    pub fn filled(tiles_count: usize, weight: f64) -> Self {
        let matrix = vec![vec![weight; tiles_count]; tiles_count];
        Self {
            top: matrix.clone(),
            bottom: matrix.clone(),
            left: matrix.clone(),
            right: matrix,
        }
    }

    /// Same matrix for all four directions
    pub fn symmetric(matrix: &[Vec<f64>]) -> Self {
        Self {
            top: matrix.to_vec(),
            bottom: matrix.to_vec(),
            left: matrix.to_vec(),
            right: matrix.to_vec(),
        }
    }
}

/// Cell collapsed before the first iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Cell position `[x, y]`
    pub position: [usize; 2],
    /// Tile to place
    pub tile: usize,
}

/// Complete description of a collapse run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Side length of the square grid
    #[serde(default = "default_grid_size")]
    pub grid_size: usize,
    /// Number of distinct tiles
    pub tiles_count: usize,
    /// Direction transition matrices
    pub transitions: DirectionalMatrices,
    /// Spawn marker settings for the placer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn: Option<SpawnConfig>,
    /// Cells to collapse before the run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub presets: Vec<Preset>,
    /// Optional safety cap on iterations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
}

const fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

impl Scene {
    /// Scene with the given matrices and no spawn settings
    pub const fn new(grid_size: usize, tiles_count: usize, transitions: DirectionalMatrices) -> Self {
        Self {
            grid_size,
            tiles_count,
            transitions,
            spawn: None,
            presets: Vec::new(),
            max_iterations: None,
        }
    }

    /// Parse a scene from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid scene document
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| AlgorithmError::SceneParse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }

    /// Read and parse a scene file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read scene",
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| AlgorithmError::SceneParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the scene as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails
    pub fn save(&self, path: &Path) -> Result<()> {
        crate::io::report::write_json(self, path)
    }

    /// Check sizes, matrices, spawn settings and presets
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 || self.grid_size > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "grid_size",
                &self.grid_size,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }
        if self.tiles_count == 0 {
            return Err(invalid_parameter(
                "tiles_count",
                &self.tiles_count,
                &"at least one tile is required",
            ));
        }

        self.matrices()?;

        if let Some(spawn) = &self.spawn {
            spawn.validate(self.tiles_count)?;
        }

        for preset in &self.presets {
            if preset.position[0] >= self.grid_size || preset.position[1] >= self.grid_size {
                return Err(invalid_parameter(
                    "presets",
                    &format!("({}, {})", preset.position[0], preset.position[1]),
                    &format!("outside {0}x{0} grid", self.grid_size),
                ));
            }
            if preset.tile >= self.tiles_count {
                return Err(AlgorithmError::InvalidTileIndex {
                    index: preset.tile,
                    max_tiles: self.tiles_count,
                });
            }
        }

        Ok(())
    }

    /// Validated transition matrices
    ///
    /// # Errors
    ///
    /// Returns an error if any matrix has the wrong shape or an invalid weight
    pub fn matrices(&self) -> Result<TransitionMatrices> {
        TransitionMatrices::from_rows(
            self.tiles_count,
            [
                self.transitions.top.as_slice(),
                self.transitions.bottom.as_slice(),
                self.transitions.left.as_slice(),
                self.transitions.right.as_slice(),
            ],
        )
    }

    /// Scheduler settings carried by the scene
    pub const fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            max_iterations: self.max_iterations,
            spawn: self.spawn,
        }
    }

    /// Validate the scene and build a scheduler with presets applied
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails
    pub fn build_scheduler<R: RandomSource>(&self, rng: R) -> Result<CollapseScheduler<R>> {
        self.validate()?;

        let model = ProbabilityModel::new(self.matrices()?);
        let mut scheduler =
            CollapseScheduler::new(self.grid_size, model, rng, self.scheduler_config())?;

        for preset in &self.presets {
            scheduler.preset(preset.position, preset.tile)?;
        }

        Ok(scheduler)
    }
}
