/// Scale weights so they sum to one
///
/// Returns `None` when the sum is zero, negative, or not finite, which is the
/// degenerate case where no tile can be drawn.
pub fn normalize(weights: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }
    Some(weights.iter().map(|&weight| weight / total).collect())
}

/// Inverse-CDF draw from a normalized distribution
///
/// Scans cumulative probability and returns the first index with positive
/// mass whose running sum reaches `draw`. Rounding can leave the total a hair
/// below `draw`; the last positive index wins then. Zero-mass indices are never
/// returned. `None` only when no index has positive mass.
pub fn inverse_cdf_sample(probabilities: &[f64], draw: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last_positive = None;

    for (index, &probability) in probabilities.iter().enumerate() {
        if probability <= 0.0 {
            continue;
        }
        cumulative += probability;
        last_positive = Some(index);
        if cumulative >= draw {
            return Some(index);
        }
    }

    last_positive
}
