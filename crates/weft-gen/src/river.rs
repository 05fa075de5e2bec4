//! River lane generator.
//!
//! A river lane commits to one of two mutually exclusive characters at
//! generation time: a symmetric lily-pad field the player hops across,
//! or a stream of drifting logs spawned continuously while the lane is
//! live. Pads fix passability statically; logs make it direction-aware
//! (the column logs exit from is never standable for long enough).

use rand::{Rng, RngExt};
use smallvec::SmallVec;
use weft_core::{Flow, GenError, OccupancyMask, PassMask, Strip};

use crate::passability;
use crate::road::next_flow;

/// Widest edge margin tried when seating the main lily pad.
const PAD_SEARCH_MARGIN: usize = 6;

/// A log archetype, distinguished by footprint.
#[derive(Clone, Debug, PartialEq)]
pub struct LogClass {
    /// Log length in world units.
    pub length: f64,
}

/// Placement decisions for a lily-pad lane.
#[derive(Clone, Debug)]
pub struct LilyPlan {
    /// Tiles holding a pad, ascending.
    pub pad_tiles: SmallVec<[usize; 16]>,
    /// The guaranteed pad the propagation seeds from.
    pub main_tile: usize,
    /// Pad tiles that also carry a coin.
    pub coins: SmallVec<[usize; 8]>,
}

/// The continuous-spawn recipe for a log lane.
///
/// Actual spawning is time-driven: the board runtime draws a fresh gap
/// from `gap` after each log and a class from the cumulative table.
#[derive(Clone, Debug)]
pub struct LogSchedule {
    /// Drift direction of the logs.
    pub flow: Flow,
    /// Inclusive range, in seconds, between consecutive log spawns.
    pub gap: (f64, f64),
    /// Inclusive drift speed range, world units per second. One speed
    /// is drawn per lane so logs never overtake each other.
    pub speed: (f64, f64),
    /// Log archetypes, parallel to `class_cum`.
    pub classes: Vec<LogClass>,
    /// Cumulative selection probabilities, ending at 1.0.
    pub class_cum: Vec<f64>,
    /// Per-log coin probability.
    pub coin_prob: f64,
}

/// Which character a generated river lane took.
#[derive(Clone, Debug)]
pub enum RiverDetail {
    /// Static lily-pad field.
    Lily(LilyPlan),
    /// Continuous log stream.
    Logs(LogSchedule),
}

/// Placement policy for river lanes.
#[derive(Clone, Debug)]
pub struct RiverLane {
    lily_lane_prob: f64,
    pad_prob_open: f64,
    pad_prob_closed: f64,
    max_pads: usize,
    coin_prob: f64,
    opposite_flow_prob: f64,
    log_gap: (f64, f64),
    log_speed: (f64, f64),
    log_classes: Vec<LogClass>,
    log_class_cum: Vec<f64>,
}

/// Builder for [`RiverLane`].
pub struct RiverLaneBuilder {
    lily_lane_prob: f64,
    pad_prob_open: f64,
    pad_prob_closed: f64,
    max_pads: usize,
    coin_prob: f64,
    opposite_flow_prob: f64,
    log_gap: (f64, f64),
    log_speed: (f64, f64),
    log_classes: Vec<LogClass>,
    log_class_cum: Vec<f64>,
}

impl RiverLane {
    /// Create a new builder with the stock tuning.
    pub fn builder() -> RiverLaneBuilder {
        RiverLaneBuilder {
            lily_lane_prob: 0.35,
            pad_prob_open: 0.5,
            pad_prob_closed: 0.25,
            max_pads: 5,
            coin_prob: 0.2,
            opposite_flow_prob: 0.8,
            log_gap: (1.5, 3.5),
            log_speed: (1.0, 2.5),
            log_classes: vec![
                LogClass { length: 1.0 },
                LogClass { length: 2.0 },
                LogClass { length: 3.0 },
            ],
            log_class_cum: vec![0.5, 0.8, 1.0],
        }
    }

    /// Generate one river lane.
    ///
    /// Branches into lily-pad mode with probability `lily_lane_prob`,
    /// else log mode. See the module docs for the two policies.
    pub fn generate(
        &self,
        strip: &Strip,
        prev: &PassMask,
        prev_flow: Flow,
        rng: &mut impl Rng,
    ) -> Result<(PassMask, RiverDetail), GenError> {
        let n = strip.active_tiles();
        if prev.len() != n {
            return Err(GenError::MaskLengthMismatch {
                expected: n,
                got: prev.len(),
            });
        }

        if rng.random::<f64>() < self.lily_lane_prob {
            Ok(self.generate_lily(strip, prev, rng))
        } else {
            Ok(self.generate_logs(prev, prev_flow, rng))
        }
    }

    /// Seat the main pad, preferring a previously passable column away
    /// from the edges: the required margin shrinks from 6 toward 0
    /// until candidates exist, and the center is the last resort (only
    /// reachable when the previous row had no passable tile at all).
    fn pick_main_pad(&self, strip: &Strip, prev: &PassMask, rng: &mut impl Rng) -> usize {
        let candidates = prev.passable_tiles();
        for margin in (0..=PAD_SEARCH_MARGIN).rev() {
            let eligible: SmallVec<[usize; 16]> = candidates
                .iter()
                .copied()
                .filter(|&i| strip.has_margin(i, margin))
                .collect();
            if !eligible.is_empty() {
                return eligible[rng.random_range(0..eligible.len())];
            }
        }
        strip.center()
    }

    fn generate_lily(
        &self,
        strip: &Strip,
        prev: &PassMask,
        rng: &mut impl Rng,
    ) -> (PassMask, RiverDetail) {
        let n = strip.active_tiles();
        let main = self.pick_main_pad(strip, prev, rng);

        let mut pads = vec![false; n];
        pads[main] = true;
        let mut budget = self.max_pads - 1;
        for i in 0..n {
            if i == main || budget == 0 {
                continue;
            }
            // A column that was standable last row gets the richer
            // probability, keeping hop chains alive.
            let p = if prev.is_passable(i) {
                self.pad_prob_open
            } else {
                self.pad_prob_closed
            };
            if rng.random::<f64>() < p {
                pads[i] = true;
                budget -= 1;
            }
        }

        // Propagation with pads in the inverted sense: no pad = blocked.
        let mut water = OccupancyMask::clear(n);
        for (i, &pad) in pads.iter().enumerate() {
            if !pad {
                water.occupy(i);
            }
        }
        let passable = passability::propagate(&water, prev, Some(main));

        let pad_tiles: SmallVec<[usize; 16]> = pads
            .iter()
            .enumerate()
            .filter_map(|(i, &pad)| pad.then_some(i))
            .collect();
        let coins = pad_tiles
            .iter()
            .copied()
            .filter(|_| rng.random::<f64>() < self.coin_prob)
            .collect();

        (
            passable,
            RiverDetail::Lily(LilyPlan {
                pad_tiles,
                main_tile: main,
                coins,
            }),
        )
    }

    fn generate_logs(
        &self,
        prev: &PassMask,
        prev_flow: Flow,
        rng: &mut impl Rng,
    ) -> (PassMask, RiverDetail) {
        let flow = next_flow(prev_flow, self.opposite_flow_prob, rng);
        let passable = passability::drain_edge(prev, flow);
        (
            passable,
            RiverDetail::Logs(LogSchedule {
                flow,
                gap: self.log_gap,
                speed: self.log_speed,
                classes: self.log_classes.clone(),
                class_cum: self.log_class_cum.clone(),
                coin_prob: self.coin_prob,
            }),
        )
    }
}

impl RiverLaneBuilder {
    /// Set the probability a river lane is a lily-pad field
    /// (default: 0.35).
    pub fn lily_lane_prob(mut self, prob: f64) -> Self {
        self.lily_lane_prob = prob;
        self
    }

    /// Set the pad probability for previously passable columns
    /// (default: 0.5).
    pub fn pad_prob_open(mut self, prob: f64) -> Self {
        self.pad_prob_open = prob;
        self
    }

    /// Set the pad probability for previously blocked columns
    /// (default: 0.25).
    pub fn pad_prob_closed(mut self, prob: f64) -> Self {
        self.pad_prob_closed = prob;
        self
    }

    /// Set the pad cap per lane, main pad included (default: 5).
    pub fn max_pads(mut self, max: usize) -> Self {
        self.max_pads = max;
        self
    }

    /// Set the per-platform coin probability (default: 0.2).
    pub fn coin_prob(mut self, prob: f64) -> Self {
        self.coin_prob = prob;
        self
    }

    /// Set the probability of flipping the previous lane's flow in log
    /// mode (default: 0.8).
    pub fn opposite_flow_prob(mut self, prob: f64) -> Self {
        self.opposite_flow_prob = prob;
        self
    }

    /// Set the inclusive gap range between log spawns, in seconds
    /// (default: 1.5 to 3.5).
    pub fn log_gap(mut self, gap: (f64, f64)) -> Self {
        self.log_gap = gap;
        self
    }

    /// Set the inclusive log drift speed range (default: 1.0 to 2.5).
    pub fn log_speed(mut self, speed: (f64, f64)) -> Self {
        self.log_speed = speed;
        self
    }

    /// Replace the log class table and its cumulative probabilities.
    pub fn log_classes(mut self, classes: Vec<LogClass>, cum: Vec<f64>) -> Self {
        self.log_classes = classes;
        self.log_class_cum = cum;
        self
    }

    /// Build the generator, validating all tuning.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any probability leaves `[0, 1]`, `max_pads` is
    /// zero, the gap range is inverted or non-positive, the class table
    /// is empty or disagrees in length with its cumulative table, or
    /// the cumulative table is not ascending to 1.0.
    pub fn build(self) -> Result<RiverLane, String> {
        for (name, p) in [
            ("lily_lane_prob", self.lily_lane_prob),
            ("pad_prob_open", self.pad_prob_open),
            ("pad_prob_closed", self.pad_prob_closed),
            ("coin_prob", self.coin_prob),
            ("opposite_flow_prob", self.opposite_flow_prob),
        ] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} must be in [0, 1], got {p}"));
            }
        }
        if self.max_pads == 0 {
            return Err("max_pads must be at least 1".to_string());
        }
        for (name, (lo, hi)) in [("log gap", self.log_gap), ("log speed", self.log_speed)] {
            if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || lo > hi {
                return Err(format!(
                    "{name} range must be positive with min <= max, got ({lo}, {hi})"
                ));
            }
        }
        if self.log_classes.is_empty() {
            return Err("log class table must not be empty".to_string());
        }
        if self.log_classes.len() != self.log_class_cum.len() {
            return Err(format!(
                "log class table has {} entries but cumulative table has {}",
                self.log_classes.len(),
                self.log_class_cum.len()
            ));
        }
        for (i, class) in self.log_classes.iter().enumerate() {
            if !class.length.is_finite() || class.length <= 0.0 {
                return Err(format!(
                    "log class [{i}] length must be finite and positive, got {}",
                    class.length
                ));
            }
        }
        let mut last = 0.0;
        for (i, &c) in self.log_class_cum.iter().enumerate() {
            if !c.is_finite() || c <= last || c > 1.0 {
                return Err(format!(
                    "cumulative probability [{i}] must ascend within (0, 1], got {c}"
                ));
            }
            last = c;
        }
        if (last - 1.0).abs() > 1e-9 {
            return Err(format!(
                "cumulative probabilities must end at 1.0, got {last}"
            ));
        }
        Ok(RiverLane {
            lily_lane_prob: self.lily_lane_prob,
            pad_prob_open: self.pad_prob_open,
            pad_prob_closed: self.pad_prob_closed,
            max_pads: self.max_pads,
            coin_prob: self.coin_prob,
            opposite_flow_prob: self.opposite_flow_prob,
            log_gap: self.log_gap,
            log_speed: self.log_speed,
            log_classes: self.log_classes,
            log_class_cum: self.log_class_cum,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn strip() -> Strip {
        Strip::new(9, 3, 1.0).unwrap()
    }

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    fn lily_only() -> RiverLane {
        RiverLane::builder().lily_lane_prob(1.0).build().unwrap()
    }

    fn logs_only() -> RiverLane {
        RiverLane::builder().lily_lane_prob(0.0).build().unwrap()
    }

    // ── Builder tests ───────────────────────────────────────────

    #[test]
    fn builder_defaults_are_valid() {
        assert!(RiverLane::builder().build().is_ok());
    }

    #[test]
    fn builder_rejects_zero_pad_cap() {
        let result = RiverLane::builder().max_pads(0).build();
        assert!(result.unwrap_err().contains("max_pads"));
    }

    #[test]
    fn builder_rejects_cumulative_not_reaching_one() {
        let result = RiverLane::builder()
            .log_classes(
                vec![LogClass { length: 1.0 }, LogClass { length: 2.0 }],
                vec![0.4, 0.9],
            )
            .build();
        assert!(result.unwrap_err().contains("end at 1.0"));
    }

    #[test]
    fn builder_rejects_non_ascending_cumulative() {
        let result = RiverLane::builder()
            .log_classes(
                vec![LogClass { length: 1.0 }, LogClass { length: 2.0 }],
                vec![0.6, 0.6],
            )
            .build();
        assert!(result.unwrap_err().contains("ascend"));
    }

    #[test]
    fn builder_rejects_mismatched_tables() {
        let result = RiverLane::builder()
            .log_classes(vec![LogClass { length: 1.0 }], vec![0.5, 1.0])
            .build();
        assert!(result.unwrap_err().contains("entries"));
    }

    #[test]
    fn builder_rejects_inverted_gap() {
        let result = RiverLane::builder().log_gap((3.0, 1.0)).build();
        assert!(result.unwrap_err().contains("gap"));
    }

    // ── Lily-pad mode ───────────────────────────────────────────

    #[test]
    fn lily_lane_is_still() {
        let river = lily_only();
        let (_, detail) = river
            .generate(&strip(), &PassMask::open(9), Flow::Left, &mut rng(1))
            .unwrap();
        assert!(matches!(detail, RiverDetail::Lily(_)));
    }

    #[test]
    fn pad_count_never_exceeds_the_cap() {
        let river = RiverLane::builder()
            .lily_lane_prob(1.0)
            .pad_prob_open(1.0)
            .pad_prob_closed(1.0)
            .max_pads(4)
            .build()
            .unwrap();
        for seed in 0..100 {
            let (_, detail) = river
                .generate(&strip(), &PassMask::open(9), Flow::Still, &mut rng(seed))
                .unwrap();
            let RiverDetail::Lily(plan) = detail else {
                panic!("expected lily mode");
            };
            assert!(plan.pad_tiles.len() <= 4, "seed {seed}");
        }
    }

    #[test]
    fn main_pad_always_present() {
        let river = lily_only();
        for seed in 0..50 {
            let (pass, detail) = river
                .generate(&strip(), &PassMask::open(9), Flow::Still, &mut rng(seed))
                .unwrap();
            let RiverDetail::Lily(plan) = detail else {
                panic!("expected lily mode");
            };
            assert!(plan.pad_tiles.contains(&plan.main_tile), "seed {seed}");
            assert!(pass.is_passable(plan.main_tile), "seed {seed}");
        }
    }

    #[test]
    fn main_pad_prefers_margined_columns() {
        let river = lily_only();
        // Only columns 0 and 4 were passable; 4 carries a 4-tile margin
        // on a 9-tile strip, 0 carries none, so 4 must win.
        let mut prev = PassMask::closed(9);
        prev.set_passable(0);
        prev.set_passable(4);
        for seed in 0..30 {
            let (_, detail) = river
                .generate(&strip(), &prev, Flow::Still, &mut rng(seed))
                .unwrap();
            let RiverDetail::Lily(plan) = detail else {
                panic!("expected lily mode");
            };
            assert_eq!(plan.main_tile, 4, "seed {seed}");
        }
    }

    #[test]
    fn dead_previous_row_seats_the_center_pad() {
        let river = lily_only();
        let (_, detail) = river
            .generate(&strip(), &PassMask::closed(9), Flow::Still, &mut rng(3))
            .unwrap();
        let RiverDetail::Lily(plan) = detail else {
            panic!("expected lily mode");
        };
        assert_eq!(plan.main_tile, 4);
    }

    #[test]
    fn coins_only_appear_on_pads() {
        let river = RiverLane::builder()
            .lily_lane_prob(1.0)
            .coin_prob(1.0)
            .build()
            .unwrap();
        let (_, detail) = river
            .generate(&strip(), &PassMask::open(9), Flow::Still, &mut rng(4))
            .unwrap();
        let RiverDetail::Lily(plan) = detail else {
            panic!("expected lily mode");
        };
        assert_eq!(plan.coins.as_slice(), plan.pad_tiles.as_slice());
    }

    #[test]
    fn passability_never_exceeds_pads() {
        let river = lily_only();
        for seed in 0..50 {
            let (pass, detail) = river
                .generate(&strip(), &PassMask::open(9), Flow::Still, &mut rng(seed))
                .unwrap();
            let RiverDetail::Lily(plan) = detail else {
                panic!("expected lily mode");
            };
            for tile in pass.passable_tiles() {
                assert!(plan.pad_tiles.contains(&tile), "seed {seed} tile {tile}");
            }
        }
    }

    // ── Log mode ────────────────────────────────────────────────

    #[test]
    fn log_lane_flow_is_moving() {
        let river = logs_only();
        for seed in 0..30 {
            let (_, detail) = river
                .generate(&strip(), &PassMask::open(9), Flow::Still, &mut rng(seed))
                .unwrap();
            let RiverDetail::Logs(schedule) = detail else {
                panic!("expected log mode");
            };
            assert!(schedule.flow.is_moving(), "seed {seed}");
        }
    }

    #[test]
    fn log_lane_drains_the_exit_edge() {
        let river = logs_only();
        for seed in 0..30 {
            let (pass, detail) = river
                .generate(&strip(), &PassMask::open(9), Flow::Left, &mut rng(seed))
                .unwrap();
            let RiverDetail::Logs(schedule) = detail else {
                panic!("expected log mode");
            };
            let edge = match schedule.flow {
                Flow::Left => 0,
                Flow::Right => 8,
                Flow::Still => unreachable!(),
            };
            assert!(!pass.is_passable(edge), "seed {seed}");
        }
    }

    #[test]
    fn schedule_carries_the_tuned_tables() {
        let river = logs_only();
        let (_, detail) = river
            .generate(&strip(), &PassMask::open(9), Flow::Left, &mut rng(5))
            .unwrap();
        let RiverDetail::Logs(schedule) = detail else {
            panic!("expected log mode");
        };
        assert_eq!(schedule.classes.len(), 3);
        assert_eq!(schedule.class_cum, vec![0.5, 0.8, 1.0]);
        assert_eq!(schedule.gap, (1.5, 3.5));
        assert_eq!(schedule.speed, (1.0, 2.5));
    }

    #[test]
    fn mismatched_prev_mask_is_rejected() {
        let river = logs_only();
        let err = river
            .generate(&strip(), &PassMask::open(4), Flow::Still, &mut rng(6))
            .unwrap_err();
        assert!(matches!(err, GenError::MaskLengthMismatch { .. }));
    }
}
