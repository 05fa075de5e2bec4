//! The passability propagation kernel.
//!
//! A lane's passable tiles are derived in one pass from its occupancy
//! and the previous row's passability: a tile is reachable if it is
//! clear and connects either to an already-resolved neighbour on the
//! walk, or straight back to a column the previous row already
//! validated. The OR with the previous row lets a path merge back into
//! a known-safe column instead of dead-ending.

use weft_core::{Flow, OccupancyMask, PassMask};

/// Derive a lane's passability from its occupancy, the previous row's
/// passability, and the guaranteed-safe seed tile.
///
/// With `main_tile` present, the seed is passable unconditionally and
/// the mask is resolved by two linear walks away from it: walking left
/// from `main_tile - 1`, tile `i` is passable iff it is unoccupied and
/// (tile `i + 1` is passable or `prev` was passable at `i`); the right
/// walk is symmetric. This is a one-pass DP equivalent to a flood fill
/// along the line.
///
/// With `main_tile` absent (the path taken when hazard density is 100%
/// and no safe column is guaranteed), passability degrades to the
/// occupancy alone: a tile is passable iff it is unoccupied.
///
/// # Panics
///
/// Panics if the masks disagree on length, or if `main_tile` is
/// `Some(i)` with `i` outside the mask. Both are caller bugs; lane
/// generators validate their inputs before calling in.
pub fn propagate(
    occupancy: &OccupancyMask,
    prev: &PassMask,
    main_tile: Option<usize>,
) -> PassMask {
    let n = occupancy.len();
    assert_eq!(
        n,
        prev.len(),
        "occupancy covers {n} tiles, previous row covers {}",
        prev.len()
    );

    let Some(main) = main_tile else {
        return PassMask::from_open(occupancy);
    };
    assert!(main < n, "main tile {main} out of bounds for {n} tiles");

    let mut pass = PassMask::closed(n);
    pass.set_passable(main);

    for i in (0..main).rev() {
        if !occupancy.is_blocked(i) && (pass.is_passable(i + 1) || prev.is_passable(i)) {
            pass.set_passable(i);
        }
    }
    for i in main + 1..n {
        if !occupancy.is_blocked(i) && (pass.is_passable(i - 1) || prev.is_passable(i)) {
            pass.set_passable(i);
        }
    }
    pass
}

/// Direction-aware passability for log lanes.
///
/// The edge tile on the side logs exit from is impassable: no log stays
/// there long enough to stand on. Walking inward from the drained edge,
/// each tile inherits reachability from its edge-side neighbour or from
/// the previous row's column. A `Still` flow drains no edge and keeps
/// the previous reachability untouched.
pub fn drain_edge(prev: &PassMask, flow: Flow) -> PassMask {
    let n = prev.len();
    match flow {
        Flow::Still => prev.clone(),
        Flow::Left => {
            let mut pass = PassMask::closed(n);
            for i in 1..n {
                if pass.is_passable(i - 1) || prev.is_passable(i) {
                    pass.set_passable(i);
                }
            }
            pass
        }
        Flow::Right => {
            let mut pass = PassMask::closed(n);
            for i in (0..n.saturating_sub(1)).rev() {
                if pass.is_passable(i + 1) || prev.is_passable(i) {
                    pass.set_passable(i);
                }
            }
            pass
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn occ(blocked: &[usize], len: usize) -> OccupancyMask {
        let mut m = OccupancyMask::clear(len);
        for &i in blocked {
            m.occupy(i);
        }
        m
    }

    // ── Seeded propagation ──────────────────────────────────────

    #[test]
    fn clear_lane_is_fully_passable() {
        let pass = propagate(&occ(&[], 9), &PassMask::open(9), Some(4));
        assert_eq!(pass.count(), 9);
    }

    #[test]
    fn seed_is_passable_even_when_occupied() {
        // The seed is unconditional: the generator never occupies it,
        // but the propagation itself does not re-check.
        let pass = propagate(&occ(&[4], 9), &PassMask::closed(9), Some(4));
        assert!(pass.is_passable(4));
        assert_eq!(pass.count(), 1);
    }

    #[test]
    fn obstacle_cuts_the_chain_when_prev_is_closed() {
        // prev all closed: reachability can only chain from the seed.
        let pass = propagate(&occ(&[2], 5), &PassMask::closed(5), Some(4));
        assert!(pass.is_passable(4));
        assert!(pass.is_passable(3));
        assert!(!pass.is_passable(2));
        assert!(!pass.is_passable(1));
        assert!(!pass.is_passable(0));
    }

    #[test]
    fn prev_row_bridges_past_an_obstacle() {
        // Tile 1 is cut off from the seed by the obstacle at 2, but the
        // previous row was passable there, so the path merges back.
        let mut prev = PassMask::closed(5);
        prev.set_passable(1);
        let pass = propagate(&occ(&[2], 5), &prev, Some(4));
        assert!(pass.is_passable(1));
        assert!(!pass.is_passable(2));
        assert!(!pass.is_passable(0));
    }

    #[test]
    fn seed_at_left_edge_walks_right_only() {
        let pass = propagate(&occ(&[], 4), &PassMask::closed(4), Some(0));
        assert_eq!(pass.count(), 4);
    }

    // ── Degraded path ───────────────────────────────────────────

    #[test]
    fn no_seed_degrades_to_occupancy() {
        let occupancy = occ(&[0, 2, 4], 5);
        let pass = propagate(&occupancy, &PassMask::open(5), None);
        compliance::assert_matches_open(&pass, &occupancy);
    }

    #[test]
    fn no_seed_on_full_occupancy_is_fully_closed() {
        let pass = propagate(&OccupancyMask::full(6), &PassMask::open(6), None);
        assert!(!pass.any());
    }

    #[test]
    #[should_panic]
    fn mismatched_masks_panic() {
        let _ = propagate(&occ(&[], 5), &PassMask::open(6), Some(2));
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_seed_panics() {
        let _ = propagate(&occ(&[], 5), &PassMask::open(5), Some(5));
    }

    // ── Drained-edge propagation ────────────────────────────────

    #[test]
    fn left_flow_drains_the_left_edge() {
        let pass = drain_edge(&PassMask::open(5), Flow::Left);
        assert!(!pass.is_passable(0));
        for i in 1..5 {
            assert!(pass.is_passable(i), "tile {i} should be passable");
        }
    }

    #[test]
    fn right_flow_drains_the_right_edge() {
        let pass = drain_edge(&PassMask::open(5), Flow::Right);
        assert!(!pass.is_passable(4));
        for i in 0..4 {
            assert!(pass.is_passable(i), "tile {i} should be passable");
        }
    }

    #[test]
    fn drained_edge_chains_inward_from_first_reachable_column() {
        // Only column 3 was passable; everything inward of it (away
        // from the drained left edge) chains off it.
        let mut prev = PassMask::closed(6);
        prev.set_passable(3);
        let pass = drain_edge(&prev, Flow::Left);
        assert!(!pass.is_passable(0));
        assert!(!pass.is_passable(1));
        assert!(!pass.is_passable(2));
        assert!(pass.is_passable(3));
        assert!(pass.is_passable(4));
        assert!(pass.is_passable(5));
    }

    #[test]
    fn still_flow_inherits_prev_unchanged() {
        let mut prev = PassMask::closed(5);
        prev.set_passable(2);
        assert_eq!(drain_edge(&prev, Flow::Still), prev);
    }

    #[test]
    fn single_tile_lane_with_moving_flow_is_impassable() {
        let pass = drain_edge(&PassMask::open(1), Flow::Right);
        assert!(!pass.any());
    }

    // ── Properties ──────────────────────────────────────────────

    proptest! {
        /// Liveness: every passable run either contains the seed or
        /// touches a column the previous row validated.
        #[test]
        fn every_passable_run_is_anchored(
            blocked in proptest::collection::vec(any::<bool>(), 2..32),
            prev_open in proptest::collection::vec(any::<bool>(), 2..32),
            seed in 0usize..32,
        ) {
            let n = blocked.len().min(prev_open.len());
            let seed = seed % n;
            let mut occupancy = OccupancyMask::clear(n);
            for (i, &b) in blocked.iter().take(n).enumerate() {
                if b && i != seed {
                    occupancy.occupy(i);
                }
            }
            let mut prev = PassMask::closed(n);
            for (i, &b) in prev_open.iter().take(n).enumerate() {
                if b {
                    prev.set_passable(i);
                }
            }
            let pass = propagate(&occupancy, &prev, Some(seed));
            prop_assert!(pass.is_passable(seed));
            compliance::assert_anchored(&pass, Some(seed), &prev);
        }

        #[test]
        fn degraded_path_equals_negated_occupancy(
            blocked in proptest::collection::vec(any::<bool>(), 1..32),
        ) {
            let n = blocked.len();
            let mut occupancy = OccupancyMask::clear(n);
            for (i, &b) in blocked.iter().enumerate() {
                if b {
                    occupancy.occupy(i);
                }
            }
            let pass = propagate(&occupancy, &PassMask::open(n), None);
            compliance::assert_matches_open(&pass, &occupancy);
        }
    }
}
