//! Vehicle lane generator.
//!
//! Road lanes carry no static occupancy: every tile is standable, and
//! danger is purely transient as vehicles sweep through. One vehicle
//! class and speed are drawn per lane and reused for the whole loop, so
//! a lane reads as a single stream of traffic.

use rand::{Rng, RngExt};
use weft_core::{Flow, Strip};

/// Choose a lane's flow from the previous moving lane's flow.
///
/// A `Still` previous flow picks left or right uniformly. Otherwise the
/// flow flips to the opposite side with probability `opposite_prob`,
/// else keeps the previous side. Shared by road and log-river lanes.
pub fn next_flow(prev: Flow, opposite_prob: f64, rng: &mut impl Rng) -> Flow {
    match prev {
        Flow::Still => {
            if rng.random::<bool>() {
                Flow::Left
            } else {
                Flow::Right
            }
        }
        moving => {
            if rng.random::<f64>() < opposite_prob {
                moving.opposite()
            } else {
                moving
            }
        }
    }
}

/// A vehicle archetype: its footprint and the speed range it drives at.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleClass {
    /// Vehicle length in world units.
    pub length: f64,
    /// Inclusive speed range in world units per second.
    pub speed: (f64, f64),
}

/// The traffic recipe for one road lane.
///
/// `count` vehicles of one class share one speed, evenly phase-offset
/// across the loop span so spacing stays constant as they wrap.
#[derive(Clone, Debug, PartialEq)]
pub struct VehiclePlan {
    /// Drift direction of the traffic.
    pub flow: Flow,
    /// Index into the generator's class table.
    pub class: usize,
    /// Footprint of every vehicle in the lane.
    pub length: f64,
    /// Shared speed, world units per second.
    pub speed: f64,
    /// Number of vehicles in the loop.
    pub count: usize,
    /// Loop span the vehicles wrap across.
    pub span: f64,
}

impl VehiclePlan {
    /// Starting positions along the loop, evenly phase-offset.
    pub fn spawn_positions(&self) -> Vec<f64> {
        (0..self.count)
            .map(|k| k as f64 * self.span / self.count as f64)
            .collect()
    }
}

/// Traffic policy for road lanes.
#[derive(Clone, Debug)]
pub struct RoadLane {
    opposite_flow_prob: f64,
    spacing: f64,
    classes: Vec<VehicleClass>,
}

/// Builder for [`RoadLane`].
pub struct RoadLaneBuilder {
    opposite_flow_prob: f64,
    spacing: f64,
    classes: Vec<VehicleClass>,
}

impl RoadLane {
    /// Create a new builder with the stock tuning.
    pub fn builder() -> RoadLaneBuilder {
        RoadLaneBuilder {
            opposite_flow_prob: 0.8,
            spacing: 2.0,
            classes: vec![
                VehicleClass {
                    length: 1.0,
                    speed: (2.0, 4.0),
                },
                VehicleClass {
                    length: 2.0,
                    speed: (1.5, 3.0),
                },
            ],
        }
    }

    /// Generate one road lane's traffic plan.
    ///
    /// Draws the flow, one class, and one speed, then packs as many
    /// vehicles as fit the loop at the configured spacing:
    /// `count = floor(span / (spacing + length))`. A strip too short
    /// for a single vehicle yields an empty (but valid) plan.
    pub fn generate(&self, strip: &Strip, prev_flow: Flow, rng: &mut impl Rng) -> VehiclePlan {
        let flow = next_flow(prev_flow, self.opposite_flow_prob, rng);
        let class = rng.random_range(0..self.classes.len());
        let VehicleClass { length, speed } = self.classes[class].clone();
        let speed = rng.random_range(speed.0..=speed.1);
        let span = strip.total_span();
        let count = (span / (self.spacing + length)).floor() as usize;
        VehiclePlan {
            flow,
            class,
            length,
            speed,
            count,
            span,
        }
    }
}

impl RoadLaneBuilder {
    /// Set the probability of flipping the previous lane's flow
    /// (default: 0.8).
    pub fn opposite_flow_prob(mut self, prob: f64) -> Self {
        self.opposite_flow_prob = prob;
        self
    }

    /// Set the gap between consecutive vehicles in world units
    /// (default: 2.0).
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Replace the vehicle class table.
    pub fn classes(mut self, classes: Vec<VehicleClass>) -> Self {
        self.classes = classes;
        self
    }

    /// Build the generator, validating all tuning.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the class table is empty, the flip probability
    /// is outside `[0, 1]`, spacing is not positive and finite, or any
    /// class has a non-positive length or an inverted/non-positive
    /// speed range.
    pub fn build(self) -> Result<RoadLane, String> {
        if !self.opposite_flow_prob.is_finite() || !(0.0..=1.0).contains(&self.opposite_flow_prob)
        {
            return Err(format!(
                "opposite_flow_prob must be in [0, 1], got {}",
                self.opposite_flow_prob
            ));
        }
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(format!(
                "spacing must be finite and positive, got {}",
                self.spacing
            ));
        }
        if self.classes.is_empty() {
            return Err("vehicle class table must not be empty".to_string());
        }
        for (i, class) in self.classes.iter().enumerate() {
            if !class.length.is_finite() || class.length <= 0.0 {
                return Err(format!(
                    "class [{i}] length must be finite and positive, got {}",
                    class.length
                ));
            }
            let (lo, hi) = class.speed;
            if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || lo > hi {
                return Err(format!(
                    "class [{i}] speed range must be positive with min <= max, got ({lo}, {hi})"
                ));
            }
        }
        Ok(RoadLane {
            opposite_flow_prob: self.opposite_flow_prob,
            spacing: self.spacing,
            classes: self.classes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    // ── Builder tests ───────────────────────────────────────────

    #[test]
    fn builder_defaults_are_valid() {
        assert!(RoadLane::builder().build().is_ok());
    }

    #[test]
    fn builder_rejects_empty_classes() {
        let result = RoadLane::builder().classes(vec![]).build();
        assert!(result.unwrap_err().contains("empty"));
    }

    #[test]
    fn builder_rejects_inverted_speed_range() {
        let result = RoadLane::builder()
            .classes(vec![VehicleClass {
                length: 1.0,
                speed: (3.0, 2.0),
            }])
            .build();
        assert!(result.unwrap_err().contains("speed"));
    }

    #[test]
    fn builder_rejects_bad_spacing() {
        assert!(RoadLane::builder().spacing(0.0).build().is_err());
        assert!(RoadLane::builder().spacing(f64::NAN).build().is_err());
    }

    // ── Flow rule ───────────────────────────────────────────────

    #[test]
    fn still_prev_flow_yields_a_moving_flow() {
        for seed in 0..20 {
            let flow = next_flow(Flow::Still, 0.8, &mut rng(seed));
            assert!(flow.is_moving(), "seed {seed}");
        }
    }

    #[test]
    fn certain_flip_always_flips() {
        for seed in 0..20 {
            assert_eq!(next_flow(Flow::Left, 1.0, &mut rng(seed)), Flow::Right);
            assert_eq!(next_flow(Flow::Right, 1.0, &mut rng(seed)), Flow::Left);
        }
    }

    #[test]
    fn zero_flip_always_keeps() {
        for seed in 0..20 {
            assert_eq!(next_flow(Flow::Left, 0.0, &mut rng(seed)), Flow::Left);
        }
    }

    // ── Plan geometry ───────────────────────────────────────────

    #[test]
    fn vehicle_count_packs_the_loop() {
        let road = RoadLane::builder()
            .spacing(2.0)
            .classes(vec![VehicleClass {
                length: 1.0,
                speed: (2.0, 2.0),
            }])
            .build()
            .unwrap();
        // Span 15 / (2 + 1) = 5 vehicles.
        let strip = Strip::new(9, 3, 1.0).unwrap();
        let plan = road.generate(&strip, Flow::Still, &mut rng(1));
        assert_eq!(plan.count, 5);
        assert_eq!(plan.length, 1.0);
        assert_eq!(plan.speed, 2.0);
    }

    #[test]
    fn short_strip_yields_an_empty_loop() {
        let road = RoadLane::builder()
            .classes(vec![VehicleClass {
                length: 4.0,
                speed: (1.0, 1.0),
            }])
            .spacing(4.0)
            .build()
            .unwrap();
        let strip = Strip::new(3, 0, 1.0).unwrap();
        let plan = road.generate(&strip, Flow::Still, &mut rng(2));
        assert_eq!(plan.count, 0);
        assert!(plan.spawn_positions().is_empty());
    }

    #[test]
    fn spawn_positions_are_evenly_offset() {
        let plan = VehiclePlan {
            flow: Flow::Left,
            class: 0,
            length: 1.0,
            speed: 2.0,
            count: 3,
            span: 12.0,
        };
        assert_eq!(plan.spawn_positions(), vec![0.0, 4.0, 8.0]);
    }

    #[test]
    fn one_speed_shared_by_the_whole_lane() {
        let road = RoadLane::builder().build().unwrap();
        let strip = Strip::new(9, 3, 1.0).unwrap();
        let plan = road.generate(&strip, Flow::Left, &mut rng(3));
        let class = plan.class;
        assert!(class < 2);
        // Speed must come from the drawn class's range.
        let (lo, hi) = [(2.0, 4.0), (1.5, 3.0)][class];
        assert!(plan.speed >= lo && plan.speed <= hi);
    }
}
