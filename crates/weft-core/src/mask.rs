//! Tile masks exchanged between consecutive lanes.
//!
//! Two boolean masks with inverted senses flow through generation:
//! [`OccupancyMask`] marks tiles *blocked* by a spawned obstacle
//! (lane-local, intermediate), [`PassMask`] marks tiles the player can
//! *stand on* (produced by a lane, consumed read-only by the next
//! lane's generation, never mutated afterwards). Keeping them as
//! distinct types stops the two senses from mixing at the seam.

use smallvec::SmallVec;

/// Per-lane boolean mask marking tiles blocked by a static obstacle.
///
/// Freshly created all-clear; generators call
/// [`occupy`](OccupancyMask::occupy) as they place obstacles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyMask {
    tiles: Vec<bool>,
}

impl OccupancyMask {
    /// An all-clear mask over `len` tiles.
    pub fn clear(len: usize) -> Self {
        Self {
            tiles: vec![false; len],
        }
    }

    /// A fully blocked mask over `len` tiles.
    pub fn full(len: usize) -> Self {
        Self {
            tiles: vec![true; len],
        }
    }

    /// Number of tiles covered by the mask.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the mask covers zero tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Mark `tile` as blocked.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is out of bounds.
    pub fn occupy(&mut self, tile: usize) {
        self.tiles[tile] = true;
    }

    /// Whether `tile` is blocked.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is out of bounds.
    pub fn is_blocked(&self, tile: usize) -> bool {
        self.tiles[tile]
    }

    /// Indices of unblocked tiles, in ascending order.
    pub fn open_tiles(&self) -> SmallVec<[usize; 16]> {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| (!b).then_some(i))
            .collect()
    }

    /// Number of unblocked tiles.
    pub fn open_count(&self) -> usize {
        self.tiles.iter().filter(|&&b| !b).count()
    }
}

/// Per-lane boolean mask marking tiles the player can occupy without
/// dying.
///
/// The liveness contract of generation: every passable tile of a
/// non-degraded mask is connected, through contiguous passable tiles,
/// to the seed tile, which itself connects back to a passable column
/// of the previous row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassMask {
    tiles: Vec<bool>,
}

impl PassMask {
    /// A fully passable mask over `len` tiles.
    pub fn open(len: usize) -> Self {
        Self {
            tiles: vec![true; len],
        }
    }

    /// A fully impassable mask over `len` tiles.
    pub fn closed(len: usize) -> Self {
        Self {
            tiles: vec![false; len],
        }
    }

    /// Derive passability directly from occupancy: a tile is passable
    /// iff it is unblocked.
    ///
    /// This is the degraded derivation used when no guaranteed-safe
    /// column exists.
    pub fn from_open(occupancy: &OccupancyMask) -> Self {
        Self {
            tiles: occupancy.tiles.iter().map(|&b| !b).collect(),
        }
    }

    /// Number of tiles covered by the mask.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the mask covers zero tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether `tile` is passable.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is out of bounds.
    pub fn is_passable(&self, tile: usize) -> bool {
        self.tiles[tile]
    }

    /// Mark `tile` passable.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is out of bounds.
    pub fn set_passable(&mut self, tile: usize) {
        self.tiles[tile] = true;
    }

    /// Indices of passable tiles, in ascending order.
    pub fn passable_tiles(&self) -> SmallVec<[usize; 16]> {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect()
    }

    /// Whether any tile is passable.
    pub fn any(&self) -> bool {
        self.tiles.iter().any(|&b| b)
    }

    /// Number of passable tiles.
    pub fn count(&self) -> usize {
        self.tiles.iter().filter(|&&b| b).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clear_mask_has_all_tiles_open() {
        let m = OccupancyMask::clear(9);
        assert_eq!(m.len(), 9);
        assert_eq!(m.open_count(), 9);
        assert_eq!(m.open_tiles().len(), 9);
    }

    #[test]
    fn occupy_removes_from_open_set() {
        let mut m = OccupancyMask::clear(5);
        m.occupy(2);
        m.occupy(4);
        assert!(m.is_blocked(2));
        assert!(!m.is_blocked(3));
        assert_eq!(m.open_tiles().as_slice(), &[0, 1, 3]);
    }

    #[test]
    fn from_open_inverts_occupancy() {
        let mut occ = OccupancyMask::clear(4);
        occ.occupy(1);
        let pass = PassMask::from_open(&occ);
        assert!(pass.is_passable(0));
        assert!(!pass.is_passable(1));
        assert_eq!(pass.count(), 3);
    }

    #[test]
    fn closed_mask_has_nothing_passable() {
        let m = PassMask::closed(7);
        assert!(!m.any());
        assert!(m.passable_tiles().is_empty());
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_read_panics() {
        let m = PassMask::open(3);
        let _ = m.is_passable(3);
    }

    proptest! {
        #[test]
        fn from_open_is_tilewise_negation(blocked in proptest::collection::vec(any::<bool>(), 1..64)) {
            let mut occ = OccupancyMask::clear(blocked.len());
            for (i, &b) in blocked.iter().enumerate() {
                if b {
                    occ.occupy(i);
                }
            }
            let pass = PassMask::from_open(&occ);
            for i in 0..blocked.len() {
                prop_assert_eq!(pass.is_passable(i), !occ.is_blocked(i));
            }
            prop_assert_eq!(pass.count() + occ.len() - occ.open_count(), occ.len());
        }
    }
}
