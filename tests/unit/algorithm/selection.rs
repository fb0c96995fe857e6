//! Tests for randomized lowest-entropy selection and tile sampling

#[cfg(test)]
mod tests {
    use markov_wfc::algorithm::random::SequenceRandom;
    use markov_wfc::algorithm::selection::{sample_tile, select_lowest_entropy};
    use markov_wfc::spatial::Grid;

    fn grid_with_entropy(values: &[([usize; 2], usize)]) -> Grid {
        let mut grid = Grid::new(2);
        for &(position, entropy) in values {
            grid.set_entropy(position, entropy);
        }
        grid
    }

    // Tests heads on every coin follows each strictly lower entropy
    // Verified by accepting equal entropy as an improvement
    #[test]
    fn test_select_follows_lower_entropy_on_heads() {
        let grid = grid_with_entropy(&[([0, 0], 3), ([0, 1], 2), ([1, 0], 1), ([1, 1], 1)]);
        let mut rng = SequenceRandom::constant(0.0, true);

        assert_eq!(select_lowest_entropy(&grid, &mut rng), Some([1, 0]));
    }

    // Tests tails on every coin keeps the first uncollapsed cell
    // Verified by replacing the best without consulting the coin
    #[test]
    fn test_select_keeps_first_on_tails() {
        let grid = grid_with_entropy(&[([0, 0], 3), ([0, 1], 2), ([1, 0], 1), ([1, 1], 1)]);
        let mut rng = SequenceRandom::constant(0.0, false);

        assert_eq!(select_lowest_entropy(&grid, &mut rng), Some([0, 0]));
    }

    // Tests coins are only drawn for strictly lower candidates
    // Verified by flipping a coin before the entropy comparison
    #[test]
    fn test_select_draws_coin_only_for_improvements() {
        let grid = grid_with_entropy(&[([0, 0], 3), ([0, 1], 2), ([1, 0], 3), ([1, 1], 1)]);
        let mut rng = SequenceRandom::new(vec![], vec![false, true], vec![]);

        assert_eq!(select_lowest_entropy(&grid, &mut rng), Some([1, 1]));
    }

    // Tests collapsed cells are never selected, even with zero stored entropy
    // Verified by removing the collapsed-cell skip
    #[test]
    fn test_select_skips_collapsed_cells() {
        let mut grid = grid_with_entropy(&[([0, 1], 4), ([1, 0], 2), ([1, 1], 3)]);
        grid.set_tile([0, 0], 1);
        let mut rng = SequenceRandom::constant(0.0, true);

        assert_eq!(select_lowest_entropy(&grid, &mut rng), Some([1, 0]));
    }

    // Tests a complete grid yields no selection
    // Verified by returning the first cell unconditionally
    #[test]
    fn test_select_on_complete_grid() {
        let mut grid = Grid::new(2);
        for position in grid.positions() {
            grid.set_tile(position, 0);
        }
        let mut rng = SequenceRandom::constant(0.0, true);

        assert_eq!(select_lowest_entropy(&grid, &mut rng), None);
    }

    // Tests sampling maps the uniform draw through the normalized weights
    // Verified by sampling from unnormalized weights
    #[test]
    fn test_sample_tile_uses_normalized_cdf() {
        let weights = [0.0, 2.0, 2.0];

        let mut low = SequenceRandom::constant(0.0, false);
        let mut middle = SequenceRandom::constant(0.5, false);
        let mut high = SequenceRandom::constant(0.75, false);

        assert_eq!(sample_tile(&weights, &mut low), Some(1));
        assert_eq!(sample_tile(&weights, &mut middle), Some(1));
        assert_eq!(sample_tile(&weights, &mut high), Some(2));
    }

    // Tests all-zero weights are reported as degenerate
    // Verified by falling back to tile 0
    #[test]
    fn test_sample_tile_degenerate() {
        let mut rng = SequenceRandom::constant(0.3, false);

        assert_eq!(sample_tile(&[0.0, 0.0], &mut rng), None);
        assert_eq!(sample_tile(&[], &mut rng), None);
    }
}
