//! Invariant assertions shared by generator test suites.
//!
//! These checks encode the liveness contract every generated lane must
//! honor. They are plain assertion functions rather than `#[test]`s so
//! each generator's tests (and downstream integration suites) can run
//! them against their own outputs.

use weft_core::{OccupancyMask, PassMask, Strip};

use crate::lane::{GeneratedLane, LaneDetail};

/// Assert that every passable run of `pass` is anchored: it contains
/// the seed tile, or at least one column the previous row validated.
///
/// This is the invariant the propagation DP guarantees: a passable
/// tile is either walkable to the seed within this row, or steppable
/// straight up from a passable column of the previous row.
///
/// # Panics
///
/// Panics (test-style, with a descriptive message) when a run is
/// unanchored or the seed itself is impassable.
pub fn assert_anchored(pass: &PassMask, seed: Option<usize>, prev: &PassMask) {
    assert_eq!(pass.len(), prev.len(), "mask lengths disagree");
    if let Some(s) = seed {
        assert!(pass.is_passable(s), "seed tile {s} is not passable");
    }

    let n = pass.len();
    let mut i = 0;
    while i < n {
        if !pass.is_passable(i) {
            i += 1;
            continue;
        }
        let start = i;
        while i < n && pass.is_passable(i) {
            i += 1;
        }
        let run = start..i;
        let anchored = seed.map_or(false, |s| run.contains(&s))
            || run.clone().any(|t| prev.is_passable(t));
        assert!(
            anchored,
            "passable run {start}..{i} reaches neither the seed nor a \
             previously passable column"
        );
    }
}

/// Assert the degraded-path equivalence: `pass[i] == !occupancy[i]`
/// for every tile.
pub fn assert_matches_open(pass: &PassMask, occupancy: &OccupancyMask) {
    assert_eq!(pass.len(), occupancy.len(), "mask lengths disagree");
    for i in 0..pass.len() {
        assert_eq!(
            pass.is_passable(i),
            !occupancy.is_blocked(i),
            "tile {i} disagrees with occupancy on the degraded path"
        );
    }
}

/// Run every applicable invariant against a generated lane.
///
/// Checks mask length against the strip, then dispatches on the lane
/// detail: grass lanes get the anchoring or degraded check, lily lanes
/// get anchoring plus pad consistency, log lanes get the drained-edge
/// check, and road/rail lanes must be statically fully passable.
pub fn check_lane(lane: &GeneratedLane, strip: &Strip, prev: &PassMask) {
    let n = strip.active_tiles();
    assert_eq!(lane.passable.len(), n, "passable mask does not cover the strip");

    match &lane.detail {
        LaneDetail::Grass(plan) => {
            assert_eq!(plan.occupancy.len(), n);
            match plan.main_tile {
                Some(main) => {
                    assert!(!plan.occupancy.is_blocked(main), "main tile is occupied");
                    assert_anchored(&lane.passable, Some(main), prev);
                }
                None => assert_matches_open(&lane.passable, &plan.occupancy),
            }
            if let Some(coin) = plan.coin {
                assert!(!plan.occupancy.is_blocked(coin), "coin on an occupied tile");
            }
        }
        LaneDetail::Lily(plan) => {
            assert!(
                plan.pad_tiles.contains(&plan.main_tile),
                "main tile has no pad"
            );
            for &tile in &plan.pad_tiles {
                assert!(tile < n, "pad tile {tile} out of bounds");
            }
            assert_anchored(&lane.passable, Some(plan.main_tile), prev);
            // Passability never exceeds the pads themselves.
            for tile in lane.passable.passable_tiles() {
                assert!(
                    plan.pad_tiles.contains(&tile),
                    "tile {tile} passable without a pad"
                );
            }
        }
        LaneDetail::Logs(schedule) => {
            let drained = match schedule.flow {
                weft_core::Flow::Left => Some(0),
                weft_core::Flow::Right => Some(n - 1),
                weft_core::Flow::Still => None,
            };
            if let Some(edge) = drained {
                assert!(
                    !lane.passable.is_passable(edge),
                    "drained edge {edge} should be impassable"
                );
            }
        }
        LaneDetail::Road(_) | LaneDetail::Railroad(_) => {
            assert_eq!(
                lane.passable.count(),
                n,
                "road and railroad lanes are statically fully passable"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchored_accepts_seed_only_mask() {
        let mut pass = PassMask::closed(5);
        pass.set_passable(2);
        assert_anchored(&pass, Some(2), &PassMask::closed(5));
    }

    #[test]
    #[should_panic(expected = "reaches neither")]
    fn anchored_rejects_floating_run() {
        let mut pass = PassMask::closed(5);
        pass.set_passable(2);
        pass.set_passable(0); // disconnected from the seed, prev all closed
        assert_anchored(&pass, Some(2), &PassMask::closed(5));
    }

    #[test]
    fn anchored_accepts_run_touching_prev() {
        let mut pass = PassMask::closed(5);
        pass.set_passable(2);
        pass.set_passable(0);
        let mut prev = PassMask::closed(5);
        prev.set_passable(0);
        assert_anchored(&pass, Some(2), &prev);
    }

    #[test]
    #[should_panic(expected = "degraded")]
    fn matches_open_rejects_disagreement() {
        let occupancy = OccupancyMask::full(3);
        assert_matches_open(&PassMask::open(3), &occupancy);
    }
}
