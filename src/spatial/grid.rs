//! Square cell grid holding collapse state
//!
//! Each cell carries an optional tile and the entropy recorded by the most
//! recent evaluation sweep. Cells are addressed `[x, y]`; the grid never grows
//! or shrinks once created.

use ndarray::Array2;
use std::fmt;
use std::ops::Range;

use crate::spatial::direction::Direction;

/// State of a single grid position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Placed tile, `None` while uncollapsed
    pub tile: Option<usize>,
    /// Count of viable tiles as of the last entropy sweep
    pub entropy: usize,
}

impl Cell {
    /// Whether a tile has been placed here
    pub const fn is_collapsed(&self) -> bool {
        self.tile.is_some()
    }
}

/// Fixed-size `size × size` grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
    size: usize,
}

impl Grid {
    /// Create a grid with every cell uncollapsed and zero entropy
    pub fn new(size: usize) -> Self {
        Self {
            cells: Array2::from_elem((size, size), Cell::default()),
            size,
        }
    }

    /// Side length of the grid
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Raw cell storage indexed `[x, y]`
    pub const fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Whether the position lies inside the grid
    pub const fn contains(&self, position: [usize; 2]) -> bool {
        position[0] < self.size && position[1] < self.size
    }

    /// Cell at a position, `None` outside the grid
    pub fn cell(&self, position: [usize; 2]) -> Option<&Cell> {
        self.cells.get(position)
    }

    /// Tile placed at a position, `None` when uncollapsed or outside the grid
    pub fn tile_at(&self, position: [usize; 2]) -> Option<usize> {
        self.cell(position).and_then(|cell| cell.tile)
    }

    /// Whether the cell at a position holds a tile
    pub fn is_collapsed(&self, position: [usize; 2]) -> bool {
        self.tile_at(position).is_some()
    }

    /// Stored entropy at a position
    pub fn entropy_at(&self, position: [usize; 2]) -> Option<usize> {
        self.cell(position).map(|cell| cell.entropy)
    }

    /// Place a tile; ignored outside the grid
    pub fn set_tile(&mut self, position: [usize; 2], tile: usize) {
        if let Some(cell) = self.cells.get_mut(position) {
            cell.tile = Some(tile);
        }
    }

    /// Revert a cell to uncollapsed, returning the tile it held
    pub fn clear_tile(&mut self, position: [usize; 2]) -> Option<usize> {
        self.cells
            .get_mut(position)
            .and_then(|cell| cell.tile.take())
    }

    /// Record the entropy computed for a position
    pub fn set_entropy(&mut self, position: [usize; 2], entropy: usize) {
        if let Some(cell) = self.cells.get_mut(position) {
            cell.entropy = entropy;
        }
    }

    /// Position of the neighbor in a direction, `None` past the border
    pub const fn neighbor(&self, position: [usize; 2], direction: Direction) -> Option<[usize; 2]> {
        let [dx, dy] = direction.offset();
        let Some(x) = position[0].checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = position[1].checked_add_signed(dy) else {
            return None;
        };
        if x < self.size && y < self.size {
            Some([x, y])
        } else {
            None
        }
    }

    /// Whether a position sits on the outermost ring of the grid
    pub const fn is_border(&self, position: [usize; 2]) -> bool {
        let last = self.size.saturating_sub(1);
        position[0] == 0 || position[1] == 0 || position[0] == last || position[1] == last
    }

    /// Ranges covering a square region around a position, clipped to the grid
    pub fn region_spans(&self, position: [usize; 2], radius: usize) -> (Range<usize>, Range<usize>) {
        let x_start = position[0].saturating_sub(radius);
        let y_start = position[1].saturating_sub(radius);
        let x_end = position[0].saturating_add(radius + 1).min(self.size);
        let y_end = position[1].saturating_add(radius + 1).min(self.size);
        (x_start..x_end.max(x_start), y_start..y_end.max(y_start))
    }

    /// All positions in scan order: `x` outer, `y` inner
    pub fn positions(&self) -> impl Iterator<Item = [usize; 2]> + use<> {
        let size = self.size;
        (0..size).flat_map(move |x| (0..size).map(move |y| [x, y]))
    }

    /// Number of cells still waiting for a tile
    pub fn uncollapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_collapsed()).count()
    }

    /// Number of cells holding a tile
    pub fn collapsed_count(&self) -> usize {
        self.cell_count() - self.uncollapsed_count()
    }

    /// Whether every cell holds a tile
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .cells
            .iter()
            .filter_map(|cell| cell.tile)
            .max()
            .map_or(1, |tile| tile.to_string().len());

        for y in (0..self.size).rev() {
            for x in 0..self.size {
                if x > 0 {
                    f.write_str(" ")?;
                }
                match self.tile_at([x, y]) {
                    Some(tile) => write!(f, "{tile:>width$}")?,
                    None => write!(f, "{:>width$}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
