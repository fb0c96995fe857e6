use crate::algorithm::random::RandomSource;
use crate::math::probability::{inverse_cdf_sample, normalize};
use crate::spatial::Grid;

/// Pick the next uncollapsed cell to collapse
///
/// Runs a randomized running-minimum scan over stored entropy. The first
/// uncollapsed cell is always taken. Each later cell with strictly lower
/// entropy takes over only if a coin lands heads. Lower entropy is favored
/// without always taking the leftmost minimum. Collapsed cells are skipped
/// and never consume a coin.
///
/// Returns `None` when every cell is collapsed.
pub fn select_lowest_entropy<R>(grid: &Grid, rng: &mut R) -> Option<[usize; 2]>
where
    R: RandomSource + ?Sized,
{
    let mut best: Option<([usize; 2], usize)> = None;

    for position in grid.positions() {
        let Some(cell) = grid.cell(position) else {
            continue;
        };
        if cell.is_collapsed() {
            continue;
        }

        match best {
            None => best = Some((position, cell.entropy)),
            Some((_, best_entropy)) => {
                if cell.entropy < best_entropy && rng.coin() {
                    best = Some((position, cell.entropy));
                }
            }
        }
    }

    best.map(|(position, _)| position)
}

/// Draw a tile index from raw weights with a single uniform draw
///
/// Returns `None` when the weights form a degenerate distribution.
pub fn sample_tile<R>(weights: &[f64], rng: &mut R) -> Option<usize>
where
    R: RandomSource + ?Sized,
{
    let probabilities = normalize(weights)?;
    inverse_cdf_sample(&probabilities, rng.uniform())
}
