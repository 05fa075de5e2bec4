//! Lane kind dispatch and per-row RNG derivation.
//!
//! The four generators share one entry point: [`generate`] matches on
//! [`LaneKind`] and returns a uniform [`GeneratedLane`] whose passable
//! mask seeds the next row. A closed sum type keeps dispatch explicit:
//! every lane character and its data are visible at the call site.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use weft_core::{Flow, GenError, PassMask, Row, Strip};

use crate::grass::{GrassLane, GrassPlan};
use crate::railroad::{RailPlan, RailroadLane};
use crate::river::{LilyPlan, LogSchedule, RiverDetail, RiverLane};
use crate::road::{RoadLane, VehiclePlan};

/// A tuned generator for one lane character.
#[derive(Clone, Debug)]
pub enum LaneKind {
    /// Static obstacles.
    Grass(GrassLane),
    /// Phase-offset vehicle traffic.
    Road(RoadLane),
    /// Lily pads or drifting logs.
    River(RiverLane),
    /// A warned train crossing.
    Railroad(RailroadLane),
}

impl LaneKind {
    /// Human-readable kind name for events and telemetry.
    pub fn name(&self) -> &'static str {
        match self {
            LaneKind::Grass(_) => "grass",
            LaneKind::Road(_) => "road",
            LaneKind::River(_) => "river",
            LaneKind::Railroad(_) => "railroad",
        }
    }
}

/// Kind-specific data produced by one generation.
#[derive(Clone, Debug)]
pub enum LaneDetail {
    /// Grass placement decisions.
    Grass(GrassPlan),
    /// Road traffic recipe.
    Road(VehiclePlan),
    /// Lily-pad placement decisions.
    Lily(LilyPlan),
    /// Log spawn schedule.
    Logs(LogSchedule),
    /// Railroad crossing timing.
    Railroad(RailPlan),
}

/// One generated lane: the chain link between consecutive rows.
///
/// `passable` is produced here, consumed read-only by the next row's
/// generation, and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct GeneratedLane {
    /// The row this lane occupies.
    pub row: Row,
    /// Drift direction of the lane's dynamic hazards; `Still` for
    /// grass, lily rivers, and railroads (trains pick a side per
    /// crossing cycle, not per lane).
    pub flow: Flow,
    /// Columns the player can stand on.
    pub passable: PassMask,
    /// Kind-specific placement data.
    pub detail: LaneDetail,
}

/// Derive the RNG for one row from the world seed.
///
/// Seeded from `seed XOR row`, so any row regenerates identically for a
/// given world without replaying the rows before it.
pub fn row_rng(seed: u64, row: Row) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed ^ (row.0 as i64 as u64))
}

/// Generate one lane of the given kind.
///
/// `prev` is the previous row's passable mask and `prev_flow` the
/// previous *moving* lane's flow (used by the opposite-direction bias
/// of road and log-river lanes).
pub fn generate(
    kind: &LaneKind,
    strip: &Strip,
    row: Row,
    prev: &PassMask,
    prev_flow: Flow,
    rng: &mut impl Rng,
) -> Result<GeneratedLane, GenError> {
    let lane = match kind {
        LaneKind::Grass(grass) => {
            let (passable, plan) = grass.generate(strip, row, prev, rng)?;
            GeneratedLane {
                row,
                flow: Flow::Still,
                passable,
                detail: LaneDetail::Grass(plan),
            }
        }
        LaneKind::Road(road) => {
            let plan = road.generate(strip, prev_flow, rng);
            GeneratedLane {
                row,
                flow: plan.flow,
                passable: PassMask::open(strip.active_tiles()),
                detail: LaneDetail::Road(plan),
            }
        }
        LaneKind::River(river) => {
            let (passable, detail) = river.generate(strip, prev, prev_flow, rng)?;
            let (flow, detail) = match detail {
                RiverDetail::Lily(plan) => (Flow::Still, LaneDetail::Lily(plan)),
                RiverDetail::Logs(schedule) => (schedule.flow, LaneDetail::Logs(schedule)),
            };
            GeneratedLane {
                row,
                flow,
                passable,
                detail,
            }
        }
        LaneKind::Railroad(rail) => {
            let (passable, plan) = rail.generate(strip);
            GeneratedLane {
                row,
                flow: Flow::Still,
                passable,
                detail: LaneDetail::Railroad(plan),
            }
        }
    };
    Ok(lane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngExt;

    fn strip() -> Strip {
        Strip::new(9, 3, 1.0).unwrap()
    }

    #[test]
    fn kind_names() {
        let grass = LaneKind::Grass(GrassLane::builder().build().unwrap());
        let rail = LaneKind::Railroad(RailroadLane::builder().build().unwrap());
        assert_eq!(grass.name(), "grass");
        assert_eq!(rail.name(), "railroad");
    }

    #[test]
    fn row_rng_is_stable_per_row() {
        let mut a = row_rng(42, Row(7));
        let mut b = row_rng(42, Row(7));
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn row_rng_differs_across_rows_and_seeds() {
        let mut base = row_rng(42, Row(7));
        let mut other_row = row_rng(42, Row(8));
        let mut other_seed = row_rng(43, Row(7));
        let reference = base.random::<u64>();
        assert_ne!(reference, other_row.random::<u64>());
        assert_ne!(reference, other_seed.random::<u64>());
    }

    #[test]
    fn negative_rows_derive_distinct_rngs() {
        let mut neg = row_rng(42, Row(-3));
        let mut pos = row_rng(42, Row(3));
        assert_ne!(neg.random::<u64>(), pos.random::<u64>());
    }

    #[test]
    fn grass_dispatch_is_still() {
        let kind = LaneKind::Grass(GrassLane::builder().build().unwrap());
        let lane = generate(
            &kind,
            &strip(),
            Row(2),
            &PassMask::open(9),
            Flow::Still,
            &mut row_rng(1, Row(2)),
        )
        .unwrap();
        assert_eq!(lane.flow, Flow::Still);
        assert!(matches!(lane.detail, LaneDetail::Grass(_)));
    }

    #[test]
    fn road_dispatch_carries_its_flow() {
        let kind = LaneKind::Road(RoadLane::builder().build().unwrap());
        let lane = generate(
            &kind,
            &strip(),
            Row(3),
            &PassMask::open(9),
            Flow::Left,
            &mut row_rng(1, Row(3)),
        )
        .unwrap();
        let LaneDetail::Road(plan) = &lane.detail else {
            panic!("expected road detail");
        };
        assert_eq!(lane.flow, plan.flow);
        assert_eq!(lane.passable.count(), 9);
    }

    #[test]
    fn railroad_dispatch_is_fully_passable() {
        let kind = LaneKind::Railroad(RailroadLane::builder().build().unwrap());
        let lane = generate(
            &kind,
            &strip(),
            Row(4),
            &PassMask::open(9),
            Flow::Still,
            &mut row_rng(1, Row(4)),
        )
        .unwrap();
        assert_eq!(lane.passable.count(), 9);
        assert_eq!(lane.flow, Flow::Still);
    }
}
