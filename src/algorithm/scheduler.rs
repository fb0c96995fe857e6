//! Iterative collapse loop with contradiction repair and host hooks
//!
//! Each iteration sweeps entropy over the whole grid, repairs any
//! contradictions it finds, notifies observers, then collapses one cell chosen
//! by the randomized lowest-entropy scan. The loop ends when no uncollapsed
//! cell remains, when a stop is requested, or when the optional iteration cap
//! is reached. There is no convergence bound: adversarial matrices can keep
//! the loop repairing forever unless a cap is configured.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::algorithm::contradiction::repair;
use crate::algorithm::entropy::evaluate_grid;
use crate::algorithm::model::ProbabilityModel;
use crate::algorithm::placement::{PlacementRequest, SpawnConfig, Spawner, dispatch, place_spawns};
use crate::algorithm::random::RandomSource;
use crate::algorithm::selection::{sample_tile, select_lowest_entropy};
use crate::io::configuration::{MAX_GRID_DIMENSION, SAMPLING_ATTEMPTS};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::Grid;

/// Lifecycle of a collapse run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    /// Uncollapsed cells remain and iterations continue
    Running,
    /// Every cell holds a tile
    Converged,
    /// Uncollapsed cells remain but none could be selected
    Stuck,
    /// Stopped between iterations by a stop signal or the iteration cap
    Halted,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "running",
            Self::Converged => "converged",
            Self::Stuck => "stuck",
            Self::Halted => "halted",
        };
        f.write_str(name)
    }
}

/// What changed in the grid
#[derive(Debug, Clone, Copy)]
pub enum ChangeKind<'a> {
    /// Entropy sweep finished; listed cells were contradictions and got repaired
    Evaluated {
        /// Zero-entropy cells in scan order
        contradictions: &'a [[usize; 2]],
    },
    /// A cell received a tile
    Collapsed {
        /// Collapsed cell
        position: [usize; 2],
        /// Tile placed there
        tile: usize,
    },
    /// The grid is complete and the placer has run
    Converged {
        /// Requests emitted by the placer
        placements: &'a [PlacementRequest],
    },
}

/// Notification passed to observers after each grid change
#[derive(Debug, Clone, Copy)]
pub struct GridChange<'a> {
    /// Iteration the change belongs to, starting at 1
    pub iteration: usize,
    /// Grid state after the change
    pub grid: &'a Grid,
    /// Kind of change
    pub kind: ChangeKind<'a>,
}

/// Read-only listener for grid changes, such as a view or a recorder
pub trait GridObserver {
    /// Called synchronously after each change
    fn on_grid_changed(&mut self, change: &GridChange<'_>);
}

/// Cooperative pause between iterations
pub trait Pacing {
    /// Yield to the host before the next iteration
    fn pause(&mut self);
}

/// Runs iterations back to back
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

impl Pacing for NoPacing {
    fn pause(&mut self) {}
}

/// Sleeps for a fixed duration between iterations
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Pacing for FixedDelay {
    fn pause(&mut self) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}

/// Shared flag requesting the scheduler stop before its next iteration
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    flag: Arc<AtomicBool>,
}

impl StopSignal {
    /// Create an unset signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether a stop was requested
    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Tunables for a collapse run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SchedulerConfig {
    /// Halt after this many iterations; `None` runs until convergence
    pub max_iterations: Option<usize>,
    /// Spawn marker settings for the placer; `None` skips placement
    pub spawn: Option<SpawnConfig>,
}

/// Counters accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Iterations started
    pub iterations: usize,
    /// Tiles placed by sampling
    pub collapses: usize,
    /// Zero-entropy cells repaired
    pub contradictions: usize,
    /// Tiles removed by repairs
    pub tiles_unlocked: usize,
}

/// Final result of [`CollapseScheduler::run`]
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// State the run ended in
    pub state: SchedulerState,
    /// Accumulated counters
    pub stats: RunStats,
    /// Requests emitted by the placer at convergence
    pub placements: Vec<PlacementRequest>,
}

/// Drives the collapse of one grid from start to finish
pub struct CollapseScheduler<R: RandomSource> {
    grid: Grid,
    model: ProbabilityModel,
    rng: R,
    config: SchedulerConfig,
    state: SchedulerState,
    stats: RunStats,
    placements: Vec<PlacementRequest>,
    observers: Vec<Box<dyn GridObserver>>,
    pacing: Box<dyn Pacing>,
    spawner: Option<Box<dyn Spawner>>,
    stop: StopSignal,
}

impl<R: RandomSource> CollapseScheduler<R> {
    /// Create a scheduler over an empty `grid_size × grid_size` grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `grid_size` is zero or above the supported maximum
    /// - The model has no tiles
    /// - The spawn settings reference an unknown tile or an empty pool
    pub fn new(
        grid_size: usize,
        model: ProbabilityModel,
        rng: R,
        config: SchedulerConfig,
    ) -> Result<Self> {
        if grid_size == 0 || grid_size > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "grid_size",
                &grid_size,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }
        if model.tiles_count() == 0 {
            return Err(invalid_parameter(
                "tiles_count",
                &0,
                &"at least one tile is required",
            ));
        }
        if let Some(spawn) = &config.spawn {
            spawn.validate(model.tiles_count())?;
        }

        Ok(Self {
            grid: Grid::new(grid_size),
            model,
            rng,
            config,
            state: SchedulerState::Running,
            stats: RunStats::default(),
            placements: Vec::new(),
            observers: Vec::new(),
            pacing: Box::new(NoPacing),
            spawner: None,
            stop: StopSignal::new(),
        })
    }

    /// Register an observer notified after every grid change
    pub fn add_observer(&mut self, observer: Box<dyn GridObserver>) {
        self.observers.push(observer);
    }

    /// Replace the pause taken between iterations
    pub fn set_pacing(&mut self, pacing: Box<dyn Pacing>) {
        self.pacing = pacing;
    }

    /// Forward placement requests to a spawner at convergence
    pub fn set_spawner(&mut self, spawner: Box<dyn Spawner>) {
        self.spawner = Some(spawner);
    }

    /// Handle that stops the run before its next iteration
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Collapse a cell before or between iterations
    ///
    /// # Errors
    ///
    /// Returns an error if the position is outside the grid or the tile is
    /// not below the tile count
    pub fn preset(&mut self, position: [usize; 2], tile: usize) -> Result<()> {
        if !self.grid.contains(position) {
            return Err(invalid_parameter(
                "position",
                &format!("({}, {})", position[0], position[1]),
                &format!("outside {0}x{0} grid", self.grid.size()),
            ));
        }
        if tile >= self.model.tiles_count() {
            return Err(AlgorithmError::InvalidTileIndex {
                index: tile,
                max_tiles: self.model.tiles_count(),
            });
        }
        self.grid.set_tile(position, tile);
        Ok(())
    }

    /// Sample and place a tile at a host-chosen cell without a sweep
    ///
    /// Uses the same sampling as [`Self::step`]: a degenerate distribution
    /// repairs the 3x3 around the cell and samples again. Observers see a
    /// `Collapsed` change tagged with the current iteration count.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The position is outside the grid or already collapsed
    /// - The distribution stays degenerate after the repair
    pub fn collapse_at(&mut self, position: [usize; 2]) -> Result<usize> {
        if !self.grid.contains(position) || self.grid.is_collapsed(position) {
            return Err(invalid_parameter(
                "position",
                &format!("({}, {})", position[0], position[1]),
                &format!(
                    "must be an uncollapsed cell of the {0}x{0} grid",
                    self.grid.size()
                ),
            ));
        }
        self.collapse_cell(position, self.stats.iterations)
    }

    /// Current grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consume the scheduler, keeping the grid
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Probability model in use
    pub const fn model(&self) -> &ProbabilityModel {
        &self.model
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SchedulerState {
        self.state
    }

    /// Counters so far
    pub const fn stats(&self) -> RunStats {
        self.stats
    }

    /// Placement requests emitted at convergence
    pub fn placements(&self) -> &[PlacementRequest] {
        &self.placements
    }

    /// Run one iteration
    ///
    /// Does nothing once the state has left `Running`. A pending stop or a
    /// reached iteration cap moves the state to `Halted` without starting
    /// a new iteration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No cell can be selected while uncollapsed cells remain (`Stuck`)
    /// - The selected cell stays degenerate after a local repair
    pub fn step(&mut self) -> Result<SchedulerState> {
        if self.state != SchedulerState::Running {
            return Ok(self.state);
        }
        if self.stop.is_stopped() {
            return Ok(self.halt("stop requested"));
        }
        if self
            .config
            .max_iterations
            .is_some_and(|max| self.stats.iterations >= max)
        {
            return Ok(self.halt("iteration limit reached"));
        }

        self.stats.iterations += 1;
        let iteration = self.stats.iterations;

        // Phase 1: entropy sweep with in-place repair
        let sweep = evaluate_grid(&mut self.grid, &self.model);
        self.stats.contradictions += sweep.contradiction_count();
        self.stats.tiles_unlocked += sweep.tiles_unlocked();

        // Phase 2: refresh observers
        let contradictions = sweep.contradictions();
        notify(
            &mut self.observers,
            &GridChange {
                iteration,
                grid: &self.grid,
                kind: ChangeKind::Evaluated {
                    contradictions: &contradictions,
                },
            },
        );

        // Phase 3: choose a target
        let Some(position) = select_lowest_entropy(&self.grid, &mut self.rng) else {
            let uncollapsed = self.grid.uncollapsed_count();
            if uncollapsed > 0 {
                self.state = SchedulerState::Stuck;
                log::error!("No selectable cell with {uncollapsed} cells uncollapsed");
                return Err(AlgorithmError::Stuck {
                    iteration,
                    uncollapsed,
                });
            }
            self.converge(iteration);
            return Ok(self.state);
        };

        // Phase 4: sample and collapse
        self.collapse_cell(position, iteration)?;

        Ok(self.state)
    }

    /// Iterate until the state leaves `Running`, pausing between iterations
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Self::step`]
    pub fn run(&mut self) -> Result<RunReport> {
        while self.step()? == SchedulerState::Running {
            self.pacing.pause();
        }

        Ok(RunReport {
            state: self.state,
            stats: self.stats,
            placements: self.placements.clone(),
        })
    }

    fn collapse_cell(&mut self, position: [usize; 2], iteration: usize) -> Result<usize> {
        let tile = self.sample_cell(position, iteration)?;
        self.grid.set_tile(position, tile);
        self.stats.collapses += 1;
        log::trace!(
            "Iteration {iteration}: collapsed ({}, {}) to tile {tile}",
            position[0],
            position[1]
        );

        notify(
            &mut self.observers,
            &GridChange {
                iteration,
                grid: &self.grid,
                kind: ChangeKind::Collapsed { position, tile },
            },
        );
        Ok(tile)
    }

    /// Sample a tile for a cell, repairing once if the distribution is degenerate
    fn sample_cell(&mut self, position: [usize; 2], iteration: usize) -> Result<usize> {
        for attempt in 1..=SAMPLING_ATTEMPTS {
            let weights = self.model.probability_vector(&self.grid, position);
            if let Some(tile) = sample_tile(&weights, &mut self.rng) {
                return Ok(tile);
            }

            if attempt < SAMPLING_ATTEMPTS {
                log::warn!(
                    "Degenerate distribution at ({}, {}), repairing before retry",
                    position[0],
                    position[1]
                );
                let report = repair(&mut self.grid, position);
                self.stats.contradictions += 1;
                self.stats.tiles_unlocked += report.tiles_unlocked();
            }
        }

        Err(AlgorithmError::DegenerateDistribution {
            position,
            iteration,
        })
    }

    fn converge(&mut self, iteration: usize) {
        self.state = SchedulerState::Converged;

        if let Some(spawn) = self.config.spawn {
            self.placements = place_spawns(&self.grid, &spawn, &mut self.rng);
            if let Some(spawner) = self.spawner.as_deref_mut() {
                dispatch(&self.placements, spawner);
            }
        }

        log::info!(
            "Converged after {iteration} iterations ({} collapses, {} contradictions)",
            self.stats.collapses,
            self.stats.contradictions
        );

        notify(
            &mut self.observers,
            &GridChange {
                iteration,
                grid: &self.grid,
                kind: ChangeKind::Converged {
                    placements: &self.placements,
                },
            },
        );
    }

    fn halt(&mut self, reason: &str) -> SchedulerState {
        self.state = SchedulerState::Halted;
        log::info!(
            "Halted after {} iterations: {reason} ({} cells uncollapsed)",
            self.stats.iterations,
            self.grid.uncollapsed_count()
        );
        self.state
    }
}

fn notify(observers: &mut [Box<dyn GridObserver>], change: &GridChange<'_>) {
    for observer in observers {
        observer.on_grid_changed(change);
    }
}
