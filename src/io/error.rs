//! Error types for collapse runs and scene handling

use std::fmt;
use std::path::PathBuf;

use crate::spatial::Direction;

/// Main error type for all algorithm operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile index exceeds the configured tile count
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles available
        max_tiles: usize,
    },

    /// A transition matrix has the wrong shape or an invalid weight
    InvalidMatrix {
        /// Direction of the offending matrix
        direction: Direction,
        /// Description of what is wrong
        reason: String,
    },

    /// Probability vector summed to zero at sampling time
    ///
    /// Sampling repairs the 3x3 around the cell and retries once before
    /// reporting this. The repair clears every orthogonal neighbor, so the
    /// retry samples from all-ones weights and this is not expected in
    /// practice.
    DegenerateDistribution {
        /// Cell that could not be sampled
        position: [usize; 2],
        /// Iteration when this occurred
        iteration: usize,
    },

    /// No cell could be selected although uncollapsed cells remain
    Stuck {
        /// Iteration when this occurred
        iteration: usize,
        /// Number of uncollapsed cells left
        uncollapsed: usize,
    },

    /// Scene file is not valid JSON for the expected layout
    SceneParse {
        /// Path of the scene file
        path: PathBuf,
        /// Underlying parser error
        source: serde_json::Error,
    },

    /// Failed to serialize an output document
    Serialization {
        /// Path where the document was headed
        path: PathBuf,
        /// Underlying serializer error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (tiles: {max_tiles})")
            }
            Self::InvalidMatrix { direction, reason } => {
                write!(f, "Invalid {direction} transition matrix: {reason}")
            }
            Self::DegenerateDistribution {
                position,
                iteration,
            } => {
                write!(
                    f,
                    "Degenerate distribution at cell ({}, {}) in iteration {iteration}",
                    position[0], position[1]
                )
            }
            Self::Stuck {
                iteration,
                uncollapsed,
            } => {
                write!(
                    f,
                    "No selectable cell at iteration {iteration} with {uncollapsed} cells uncollapsed"
                )
            }
            Self::SceneParse { path, source } => {
                write!(f, "Failed to parse scene '{}': {source}", path.display())
            }
            Self::Serialization { path, source } => {
                write!(f, "Failed to serialize '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SceneParse { source, .. } | Self::Serialization { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
