//! Railroad lane generator.
//!
//! Railroad lanes are statically fully passable; the danger is a train
//! that sweeps the whole lane after a warning period. Generation only
//! validates and hands over the timing constants; the crossing state
//! machine itself lives in the board runtime, which re-randomizes the
//! wait and speed each cycle.

use weft_core::{PassMask, Strip};

/// Timing constants for one railroad crossing.
#[derive(Clone, Debug, PartialEq)]
pub struct RailTiming {
    /// Inclusive range, in seconds, between a train leaving and the
    /// next warning.
    pub interval: (f64, f64),
    /// Seconds the warning lights flash before the train enters.
    pub warning_secs: f64,
    /// Inclusive train speed range, world units per second.
    pub speed: (f64, f64),
    /// Train length in world units.
    pub train_length: f64,
}

/// The recipe for one railroad lane.
#[derive(Clone, Debug, PartialEq)]
pub struct RailPlan {
    /// Timing the crossing state machine runs on.
    pub timing: RailTiming,
}

/// Timing policy for railroad lanes.
#[derive(Clone, Debug)]
pub struct RailroadLane {
    timing: RailTiming,
}

/// Builder for [`RailroadLane`].
pub struct RailroadLaneBuilder {
    timing: RailTiming,
}

impl RailroadLane {
    /// Create a new builder with the stock tuning.
    pub fn builder() -> RailroadLaneBuilder {
        RailroadLaneBuilder {
            timing: RailTiming {
                interval: (3.0, 8.0),
                warning_secs: 1.2,
                speed: (12.0, 20.0),
                train_length: 6.0,
            },
        }
    }

    /// Generate one railroad lane: a fully passable mask plus the
    /// timing for its crossing.
    pub fn generate(&self, strip: &Strip) -> (PassMask, RailPlan) {
        (
            PassMask::open(strip.active_tiles()),
            RailPlan {
                timing: self.timing.clone(),
            },
        )
    }
}

impl RailroadLaneBuilder {
    /// Set the inclusive quiet interval between trains, in seconds
    /// (default: 3.0 to 8.0).
    pub fn interval(mut self, interval: (f64, f64)) -> Self {
        self.timing.interval = interval;
        self
    }

    /// Set the warning duration before each train, in seconds
    /// (default: 1.2).
    pub fn warning_secs(mut self, secs: f64) -> Self {
        self.timing.warning_secs = secs;
        self
    }

    /// Set the inclusive train speed range (default: 12.0 to 20.0).
    pub fn speed(mut self, speed: (f64, f64)) -> Self {
        self.timing.speed = speed;
        self
    }

    /// Set the train length in world units (default: 6.0).
    pub fn train_length(mut self, length: f64) -> Self {
        self.timing.train_length = length;
        self
    }

    /// Build the generator, validating all timing.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any range is inverted or non-positive, the
    /// warning duration is not positive, or the train length is not
    /// positive.
    pub fn build(self) -> Result<RailroadLane, String> {
        for (name, (lo, hi)) in [
            ("interval", self.timing.interval),
            ("speed", self.timing.speed),
        ] {
            if !lo.is_finite() || !hi.is_finite() || lo <= 0.0 || lo > hi {
                return Err(format!(
                    "{name} range must be positive with min <= max, got ({lo}, {hi})"
                ));
            }
        }
        if !self.timing.warning_secs.is_finite() || self.timing.warning_secs <= 0.0 {
            return Err(format!(
                "warning_secs must be finite and positive, got {}",
                self.timing.warning_secs
            ));
        }
        if !self.timing.train_length.is_finite() || self.timing.train_length <= 0.0 {
            return Err(format!(
                "train_length must be finite and positive, got {}",
                self.timing.train_length
            ));
        }
        Ok(RailroadLane {
            timing: self.timing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_are_valid() {
        assert!(RailroadLane::builder().build().is_ok());
    }

    #[test]
    fn builder_rejects_inverted_interval() {
        let result = RailroadLane::builder().interval((8.0, 3.0)).build();
        assert!(result.unwrap_err().contains("interval"));
    }

    #[test]
    fn builder_rejects_zero_warning() {
        let result = RailroadLane::builder().warning_secs(0.0).build();
        assert!(result.unwrap_err().contains("warning_secs"));
    }

    #[test]
    fn builder_rejects_negative_train_length() {
        let result = RailroadLane::builder().train_length(-1.0).build();
        assert!(result.unwrap_err().contains("train_length"));
    }

    #[test]
    fn generated_lane_is_fully_passable() {
        let rail = RailroadLane::builder().build().unwrap();
        let strip = Strip::new(9, 3, 1.0).unwrap();
        let (pass, plan) = rail.generate(&strip);
        assert_eq!(pass.count(), 9);
        assert_eq!(plan.timing.interval, (3.0, 8.0));
    }
}
