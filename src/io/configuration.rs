//! Algorithm constants and runtime configuration defaults

/// Chebyshev radius of the neighborhood cleared around a contradiction
pub const REPAIR_RADIUS: usize = 1;

/// Number of sampling attempts for one cell before giving up
///
/// The second attempt follows a local repair around the cell.
pub const SAMPLING_ATTEMPTS: usize = 2;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid side length
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Grid side length used when a scene does not override it
pub const DEFAULT_GRID_SIZE: usize = 10;

/// Pause between iterations when driven without a host frame loop
pub const DEFAULT_PACING_DELAY_MS: u64 = 0;

// Progress bar display settings
/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to the scene file stem for the summary document
pub const OUTPUT_SUFFIX: &str = "_result";
/// Extension of every JSON document the tool writes
pub const OUTPUT_EXTENSION: &str = "json";
