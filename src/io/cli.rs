//! Command-line interface for running a scene to convergence

use crate::algorithm::random::SeededRandom;
use crate::algorithm::scheduler::{FixedDelay, RunReport};
use crate::io::configuration::{
    DEFAULT_PACING_DELAY_MS, DEFAULT_SEED, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::Result;
use crate::io::progress::CollapseProgress;
use crate::io::report::{RunSummary, SnapshotRecorder, write_json};
use crate::io::scene::Scene;
use crate::spatial::Grid;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "markov-wfc")]
#[command(
    author,
    version,
    about = "Collapse a tile grid from directional Markov transition matrices"
)]
/// Command-line arguments for a collapse run
pub struct Cli {
    /// Scene file describing grid size, tiles and transition matrices
    #[arg(value_name = "SCENE")]
    pub scene: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Override the scene's grid side length
    #[arg(short, long)]
    pub grid_size: Option<usize>,

    /// Halt after this many iterations
    #[arg(short, long)]
    pub max_iterations: Option<usize>,

    /// Pause between iterations in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_PACING_DELAY_MS)]
    pub delay_ms: u64,

    /// Summary output path (defaults to `<scene>_result.json`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write per-iteration grid snapshots to this file
    #[arg(short, long)]
    pub trace: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Where the run summary is written
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }

        let stem = self.scene.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            OUTPUT_EXTENSION
        );

        if let Some(parent) = self.scene.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

/// Result of a command-line run
#[derive(Debug)]
pub struct RunOutcome {
    /// Scheduler report
    pub report: RunReport,
    /// Final grid
    pub grid: Grid,
    /// Where the summary was written
    pub summary_path: PathBuf,
}

/// Loads a scene, runs it and writes the output documents
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the scene to completion
    ///
    /// # Errors
    ///
    /// Returns an error if the scene cannot be loaded or validated, the run
    /// gets stuck, or an output file cannot be written
    pub fn run(&self) -> Result<RunOutcome> {
        let mut scene = Scene::load(&self.cli.scene)?;
        if let Some(grid_size) = self.cli.grid_size {
            scene.grid_size = grid_size;
        }
        if let Some(max_iterations) = self.cli.max_iterations {
            scene.max_iterations = Some(max_iterations);
        }

        log::debug!(
            "Loaded scene {} ({size}x{size} grid, {} tiles)",
            self.cli.scene.display(),
            scene.tiles_count,
            size = scene.grid_size
        );

        let mut scheduler = scene.build_scheduler(SeededRandom::new(self.cli.seed))?;

        if self.cli.delay_ms > 0 {
            scheduler.set_pacing(Box::new(FixedDelay(Duration::from_millis(
                self.cli.delay_ms,
            ))));
        }

        if self.cli.should_show_progress() {
            scheduler.add_observer(Box::new(CollapseProgress::new(
                scheduler.grid().cell_count(),
            )));
        }

        let trace = self.cli.trace.as_ref().map(|path| {
            let recorder = SnapshotRecorder::new();
            let log = recorder.log();
            scheduler.add_observer(Box::new(recorder));
            (path, log)
        });

        let report = scheduler.run()?;
        let grid = scheduler.into_grid();

        let summary_path = self.cli.output_path();
        RunSummary::new(self.cli.seed, &report, &grid).write_json(&summary_path)?;

        if let Some((path, log)) = trace {
            write_json(&log.take(), path)?;
        }

        Ok(RunOutcome {
            report,
            grid,
            summary_path,
        })
    }
}
