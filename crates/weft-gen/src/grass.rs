//! Static-obstacle lane generator.
//!
//! Grass lanes block tiles permanently. Obstacle density climbs with
//! distance from the spawn row through an ascending probability table;
//! the spawn row itself never blocks, and rows deep behind the spawn
//! point wall off completely except for the threaded path.
//!
//! Constructed via the builder pattern: [`GrassLane::builder`].

use rand::{Rng, RngExt};
use smallvec::SmallVec;
use weft_core::{GenError, OccupancyMask, PassMask, Row, Strip};

use crate::passability;

/// Rows at or below this are fully blocked apart from the path.
const DEEP_ROW: i32 = -3;

/// Which side of the playable area a cosmetic edge prop sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// The margin left of tile 0.
    Left,
    /// The margin right of the last active tile.
    Right,
}

/// A cosmetic prop placed on an edge tile, outside the playable area.
///
/// Slots count outward from the playable area; slot 0 is adjacent to it
/// and always spawns, so the world never visibly ends at the strip
/// boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeProp {
    /// Which margin the prop sits on.
    pub side: Side,
    /// Slot within the margin, counting outward from the playable area.
    pub slot: usize,
}

/// Placement decisions produced by one grass-lane generation.
#[derive(Clone, Debug)]
pub struct GrassPlan {
    /// Tiles blocked by spawned obstacles.
    pub occupancy: OccupancyMask,
    /// The guaranteed-safe tile, absent on deep rows where density is
    /// 100% and passability degrades to the occupancy alone.
    pub main_tile: Option<usize>,
    /// Tile holding a coin pickup, if one was placed.
    pub coin: Option<usize>,
    /// Cosmetic props for the edge margins.
    pub edge_props: SmallVec<[EdgeProp; 8]>,
}

/// Obstacle-placement policy for grass lanes.
///
/// # Determinism
///
/// `generate()` draws only from the RNG handed in, so a given
/// (tuning, strip, row, previous mask, RNG state) produces identical
/// plans.
#[derive(Clone, Debug)]
pub struct GrassLane {
    obstacle_probs: Vec<f64>,
    band_rows: u32,
    coin_prob: f64,
    edge_skip_prob: f64,
}

/// Builder for [`GrassLane`].
pub struct GrassLaneBuilder {
    obstacle_probs: Vec<f64>,
    band_rows: u32,
    coin_prob: f64,
    edge_skip_prob: f64,
}

impl GrassLane {
    /// Create a new builder with the stock tuning.
    pub fn builder() -> GrassLaneBuilder {
        GrassLaneBuilder {
            obstacle_probs: vec![0.15, 0.25, 0.35, 0.45, 0.55],
            band_rows: 10,
            coin_prob: 0.2,
            edge_skip_prob: 0.3,
        }
    }

    /// Obstacle probability for a row, before the special cases.
    ///
    /// Rows are banded `band_rows` at a time into the ascending table;
    /// rows past the last band stay clamped at the table's final entry,
    /// and rows behind the spawn clamp to the first.
    fn band_prob(&self, row: Row) -> f64 {
        let band = (row.0 / self.band_rows as i32)
            .clamp(0, self.obstacle_probs.len() as i32 - 1);
        self.obstacle_probs[band as usize]
    }

    /// Generate one grass lane.
    ///
    /// Chooses the guaranteed-safe tile (uniformly among the previous
    /// row's passable columns once past row 1, the center otherwise),
    /// rolls each remaining tile against the row's band probability,
    /// propagates passability, and places the optional coin and the
    /// edge props.
    ///
    /// Special cases: row 0 never spawns obstacles; rows at or below
    /// -3 spawn at 100% density with no safe tile, walling off the
    /// space behind the spawn area.
    pub fn generate(
        &self,
        strip: &Strip,
        row: Row,
        prev: &PassMask,
        rng: &mut impl Rng,
    ) -> Result<(PassMask, GrassPlan), GenError> {
        let n = strip.active_tiles();
        if prev.len() != n {
            return Err(GenError::MaskLengthMismatch {
                expected: n,
                got: prev.len(),
            });
        }

        let deep = row.0 <= DEEP_ROW;
        let prob = if deep {
            1.0
        } else if row == Row::SPAWN {
            0.0
        } else {
            self.band_prob(row)
        };

        let main_tile = if deep {
            None
        } else if row.0 > 1 && prev.any() {
            let candidates = prev.passable_tiles();
            Some(candidates[rng.random_range(0..candidates.len())])
        } else {
            Some(strip.center())
        };

        let mut occupancy = OccupancyMask::clear(n);
        for i in 0..n {
            if Some(i) == main_tile {
                continue;
            }
            if rng.random::<f64>() < prob {
                occupancy.occupy(i);
            }
        }

        let passable = passability::propagate(&occupancy, prev, main_tile);

        let coin = if row.0 > 1 && rng.random::<f64>() < self.coin_prob {
            let open = occupancy.open_tiles();
            if open.len() >= 2 {
                Some(open[rng.random_range(0..open.len())])
            } else {
                None
            }
        } else {
            None
        };

        let mut edge_props = SmallVec::new();
        for side in [Side::Left, Side::Right] {
            for slot in 0..strip.edge_tiles() {
                // First slot always spawns; later ones skip independently.
                if slot == 0 || rng.random::<f64>() >= self.edge_skip_prob {
                    edge_props.push(EdgeProp { side, slot });
                }
            }
        }

        Ok((
            passable,
            GrassPlan {
                occupancy,
                main_tile,
                coin,
                edge_props,
            },
        ))
    }
}

impl GrassLaneBuilder {
    /// Set the ascending obstacle probability table (default:
    /// `[0.15, 0.25, 0.35, 0.45, 0.55]`). Each entry must be in
    /// `[0, 1]`.
    pub fn obstacle_probs(mut self, probs: Vec<f64>) -> Self {
        self.obstacle_probs = probs;
        self
    }

    /// Set how many rows share one probability band (default: 10).
    pub fn band_rows(mut self, rows: u32) -> Self {
        self.band_rows = rows;
        self
    }

    /// Set the per-lane coin probability (default: 0.2).
    pub fn coin_prob(mut self, prob: f64) -> Self {
        self.coin_prob = prob;
        self
    }

    /// Set the skip probability for edge props past the first slot
    /// (default: 0.3).
    pub fn edge_skip_prob(mut self, prob: f64) -> Self {
        self.edge_skip_prob = prob;
        self
    }

    /// Build the generator, validating all tuning.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the probability table is empty, any probability
    /// is outside `[0, 1]` or non-finite, or `band_rows` is zero.
    pub fn build(self) -> Result<GrassLane, String> {
        if self.obstacle_probs.is_empty() {
            return Err("obstacle probability table must not be empty".to_string());
        }
        for (i, &p) in self.obstacle_probs.iter().enumerate() {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(format!(
                    "obstacle probability [{i}] must be in [0, 1], got {p}"
                ));
            }
        }
        if self.band_rows == 0 {
            return Err("band_rows must be at least 1".to_string());
        }
        for (name, p) in [("coin_prob", self.coin_prob), ("edge_skip_prob", self.edge_skip_prob)] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} must be in [0, 1], got {p}"));
            }
        }
        Ok(GrassLane {
            obstacle_probs: self.obstacle_probs,
            band_rows: self.band_rows,
            coin_prob: self.coin_prob,
            edge_skip_prob: self.edge_skip_prob,
        })
    }
}
