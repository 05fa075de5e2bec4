//! Board configuration, validation, and error types.
//!
//! [`BoardConfig`] is the input for constructing a [`Board`](crate::Board).
//! [`validate()`](BoardConfig::validate) checks the structural
//! invariants the runtime relies on; the per-generator tuning is
//! already validated by the generator builders.

use std::error::Error;
use std::fmt;

use weft_core::Strip;
use weft_gen::{GrassLane, RailroadLane, RiverLane, RoadLane};

// ── KindWeights ────────────────────────────────────────────────────

/// Relative weights for picking the next lane's kind.
///
/// Weights need not sum to one; only their ratios matter. A zero
/// weight disables that kind entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KindWeights {
    /// Weight for grass lanes.
    pub grass: f64,
    /// Weight for road lanes.
    pub road: f64,
    /// Weight for river lanes.
    pub river: f64,
    /// Weight for railroad lanes.
    pub railroad: f64,
}

impl KindWeights {
    /// Sum of all four weights.
    pub fn total(&self) -> f64 {
        self.grass + self.road + self.river + self.railroad
    }

    /// Named view of the weights, in draw order.
    pub(crate) fn entries(&self) -> [(&'static str, f64); 4] {
        [
            ("grass", self.grass),
            ("road", self.road),
            ("river", self.river),
            ("railroad", self.railroad),
        ]
    }
}

impl Default for KindWeights {
    fn default() -> Self {
        Self {
            grass: 0.4,
            road: 0.25,
            river: 0.2,
            railroad: 0.15,
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`BoardConfig::validate()`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The lane window is below the minimum of 2.
    WindowTooSmall {
        /// The configured size that was too small.
        configured: usize,
    },
    /// A kind weight is negative or non-finite.
    InvalidWeight {
        /// Which weight was invalid.
        kind: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// All kind weights are zero; no lane could ever be drawn.
    NoKindEnabled,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowTooSmall { configured } => {
                write!(f, "window {configured} is below minimum of 2")
            }
            Self::InvalidWeight { kind, value } => {
                write!(f, "{kind} weight must be finite and >= 0, got {value}")
            }
            Self::NoKindEnabled => write!(f, "all kind weights are zero"),
        }
    }
}

impl Error for ConfigError {}

// ── BoardConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a board.
#[derive(Clone, Debug)]
pub struct BoardConfig {
    /// Lane geometry shared by every row.
    pub strip: Strip,
    /// World seed; every row derives its own RNG from it.
    pub seed: u64,
    /// Tuned grass generator.
    pub grass: GrassLane,
    /// Tuned road generator.
    pub road: RoadLane,
    /// Tuned river generator.
    pub river: RiverLane,
    /// Tuned railroad generator.
    pub railroad: RailroadLane,
    /// Relative kind weights for rows past the spawn zone.
    pub weights: KindWeights,
    /// Rows kept live; older rows retire as the board extends.
    pub window: usize,
    /// Rows at or below this are forced grass, keeping the spawn zone
    /// free of traffic.
    pub safe_rows: i32,
    /// Row the board starts generating from.
    pub first_row: i32,
}

impl BoardConfig {
    /// A config with stock tuning for every generator.
    pub fn stock(strip: Strip, seed: u64) -> Self {
        Self {
            strip,
            seed,
            grass: GrassLane::builder().build().expect("stock tuning is valid"),
            road: RoadLane::builder().build().expect("stock tuning is valid"),
            river: RiverLane::builder().build().expect("stock tuning is valid"),
            railroad: RailroadLane::builder()
                .build()
                .expect("stock tuning is valid"),
            weights: KindWeights::default(),
            window: 16,
            safe_rows: 0,
            first_row: -4,
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. The window must hold the producing and consuming row.
        if self.window < 2 {
            return Err(ConfigError::WindowTooSmall {
                configured: self.window,
            });
        }
        // 2. Each weight must be finite and non-negative.
        for (kind, value) in self.weights.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { kind, value });
            }
        }
        // 3. At least one kind must be drawable.
        if self.weights.total() <= 0.0 {
            return Err(ConfigError::NoKindEnabled);
        }
        Ok(())
    }
}
