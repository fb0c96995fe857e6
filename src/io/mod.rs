/// Command-line interface and run orchestration
pub mod cli;
/// Algorithm constants and runtime defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Progress bar observer for terminal runs
pub mod progress;
/// Grid snapshots, run summaries and JSON output
pub mod report;
/// JSON scene files describing a run
pub mod scene;
