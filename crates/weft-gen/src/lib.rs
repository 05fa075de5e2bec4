//! Lane generators and passability propagation for Weft.
//!
//! Each lane character owns a distinct stochastic placement policy:
//!
//! 1. [`GrassLane`]: static obstacles on a row-banded probability curve
//! 2. [`RoadLane`]: phase-offset vehicle loops, statically passable
//! 3. [`RiverLane`]: lily-pad fields or drifting log schedules
//! 4. [`RailroadLane`]: statically passable, timing for the crossing FSM
//!
//! Generation chains row to row: a lane's [`PassMask`](weft_core::PassMask)
//! seeds the next lane's [`passability`] propagation, which is what keeps
//! every generated board winnable. All randomness flows through an
//! injected RNG; [`row_rng`] derives one per row from the world seed so
//! any row regenerates identically.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compliance;
pub mod grass;
pub mod lane;
pub mod passability;
pub mod railroad;
pub mod river;
pub mod road;

pub use grass::{EdgeProp, GrassLane, GrassPlan, Side};
pub use lane::{generate, row_rng, GeneratedLane, LaneDetail, LaneKind};
pub use railroad::{RailPlan, RailTiming, RailroadLane};
pub use river::{LilyPlan, LogClass, LogSchedule, RiverLane};
pub use road::{next_flow, RoadLane, VehicleClass, VehiclePlan};
