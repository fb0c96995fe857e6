use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of tile indices
///
/// Used to hold the tiles still viable at a cell. Indices are 0-based and
/// anything at or beyond `max_tiles` is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
    max_tiles: usize,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Build the set of indices whose weight is strictly positive
    pub fn from_weights(weights: &[f64]) -> Self {
        let mut set = Self::new(weights.len());
        for (tile, &weight) in weights.iter().enumerate() {
            if weight > 0.0 {
                set.insert(tile);
            }
        }
        set
    }

    /// Number of tiles the set can hold
    pub const fn capacity(&self) -> usize {
        self.max_tiles
    }

    /// Insert a tile index
    pub fn insert(&mut self, tile: usize) {
        if tile < self.max_tiles {
            self.bits.set(tile, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Extract all tile indices in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
