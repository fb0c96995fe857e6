//! Tests for grid cell state, neighbor lookup and region clipping

#[cfg(test)]
mod tests {
    use markov_wfc::spatial::{Direction, Grid};

    // Tests a fresh grid has every cell uncollapsed with zero entropy
    // Verified by defaulting cells to tile 0
    #[test]
    fn test_new_grid_is_uncollapsed() {
        let grid = Grid::new(4);

        assert_eq!(grid.size(), 4);
        assert_eq!(grid.cell_count(), 16);
        assert_eq!(grid.uncollapsed_count(), 16);
        assert_eq!(grid.collapsed_count(), 0);
        assert!(!grid.is_complete());
        assert!(grid.positions().all(|p| grid.entropy_at(p) == Some(0)));
    }

    // Tests placing and clearing tiles updates counts
    // Verified by making clear_tile leave the tile in place
    #[test]
    fn test_set_and_clear_tile() {
        let mut grid = Grid::new(3);
        grid.set_tile([1, 2], 5);

        assert_eq!(grid.tile_at([1, 2]), Some(5));
        assert!(grid.is_collapsed([1, 2]));
        assert_eq!(grid.collapsed_count(), 1);

        assert_eq!(grid.clear_tile([1, 2]), Some(5));
        assert_eq!(grid.clear_tile([1, 2]), None);
        assert_eq!(grid.tile_at([1, 2]), None);
    }

    // Tests writes outside the grid are ignored and reads return None
    // Verified by indexing the array directly
    #[test]
    fn test_out_of_bounds_access() {
        let mut grid = Grid::new(2);
        grid.set_tile([2, 0], 1);
        grid.set_entropy([0, 5], 3);

        assert!(!grid.contains([2, 0]));
        assert_eq!(grid.cell([2, 0]), None);
        assert_eq!(grid.tile_at([0, 5]), None);
        assert_eq!(grid.entropy_at([0, 5]), None);
        assert_eq!(grid.collapsed_count(), 0);
    }

    // Tests neighbor offsets and border clipping
    // Verified by swapping top and bottom offsets
    #[test]
    fn test_neighbor_lookup() {
        let grid = Grid::new(3);

        assert_eq!(grid.neighbor([1, 1], Direction::Top), Some([1, 2]));
        assert_eq!(grid.neighbor([1, 1], Direction::Bottom), Some([1, 0]));
        assert_eq!(grid.neighbor([1, 1], Direction::Left), Some([0, 1]));
        assert_eq!(grid.neighbor([1, 1], Direction::Right), Some([2, 1]));

        assert_eq!(grid.neighbor([0, 0], Direction::Bottom), None);
        assert_eq!(grid.neighbor([0, 0], Direction::Left), None);
        assert_eq!(grid.neighbor([2, 2], Direction::Top), None);
        assert_eq!(grid.neighbor([2, 2], Direction::Right), None);
    }

    // Tests border detection on all four edges
    // Verified by checking only the low edges
    #[test]
    fn test_is_border() {
        let grid = Grid::new(4);

        assert!(grid.is_border([0, 2]));
        assert!(grid.is_border([3, 1]));
        assert!(grid.is_border([2, 0]));
        assert!(grid.is_border([1, 3]));
        assert!(!grid.is_border([1, 1]));
        assert!(!grid.is_border([2, 2]));
    }

    // Tests region spans are clipped at corners and full in the interior
    // Verified by removing the min against the grid size
    #[test]
    fn test_region_spans_clipping() {
        let grid = Grid::new(5);

        assert_eq!(grid.region_spans([2, 2], 1), (1..4, 1..4));
        assert_eq!(grid.region_spans([0, 0], 1), (0..2, 0..2));
        assert_eq!(grid.region_spans([4, 0], 1), (3..5, 0..2));
    }

    // Tests scan order runs x outer and y inner
    // Verified by swapping the loop nesting
    #[test]
    fn test_positions_scan_order() {
        let grid = Grid::new(2);
        let order: Vec<[usize; 2]> = grid.positions().collect();

        assert_eq!(order, vec![[0, 0], [0, 1], [1, 0], [1, 1]]);
    }

    // Tests display prints the top row first with dots for empty cells
    // Verified by printing rows bottom-up
    #[test]
    fn test_display_rows_top_down() {
        let mut grid = Grid::new(2);
        grid.set_tile([0, 1], 3);
        grid.set_tile([1, 0], 12);

        assert_eq!(grid.to_string(), " 3  .\n . 12\n");
    }

    // Tests a grid is complete once every cell holds a tile
    // Verified by checking any instead of all
    #[test]
    fn test_is_complete() {
        let mut grid = Grid::new(2);
        for position in grid.positions() {
            grid.set_tile(position, 0);
        }

        assert!(grid.is_complete());
        assert_eq!(grid.uncollapsed_count(), 0);
    }
}
