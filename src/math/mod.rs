//! Mathematical utilities for the algorithm

/// Normalization and inverse-CDF sampling of discrete distributions
pub mod probability;
