//! Weft: a deterministic lane generation engine for endless
//! road-crossing games.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Weft sub-crates. For most users, adding `weft` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use weft::prelude::*;
//!
//! // A 9-tile playable strip with a 3-tile cosmetic margin per side.
//! let strip = Strip::new(9, 3, 1.0).unwrap();
//! let mut board = Board::new(BoardConfig::stock(strip, 42)).unwrap();
//!
//! // Generate the opening rows, then run a frame.
//! for _ in 0..20 {
//!     board.extend().unwrap();
//! }
//! let result = board.step_sync(1.0 / 60.0);
//!
//! assert_eq!(board.rows_generated(), 20);
//! assert_eq!(board.lanes().count(), 16); // the window retains the newest rows
//! assert_eq!(result.metrics.events_emitted as usize, result.events.len());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `weft-core` | Rows, flows, masks, strip geometry, errors |
//! | [`gen`] | `weft-gen` | Lane generators, passability propagation, compliance |
//! | [`engine`] | `weft-engine` | Board runtime, dynamics, events, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and identifiers (`weft-core`).
///
/// Contains [`types::Row`], [`types::Flow`], the occupancy and
/// passability masks, and the validated [`types::Strip`] geometry.
pub use weft_core as types;

/// Lane generators and passability propagation (`weft-gen`).
///
/// The four tuned generators, the [`gen::passability`] kernel, the
/// [`gen::LaneKind`] dispatch, and the [`gen::compliance`] assertion
/// suite for downstream tests.
pub use weft_gen as gen;

/// Board runtime and dynamics (`weft-engine`).
///
/// [`engine::Board`] for row generation and cooperative ticking, plus
/// the vehicle/log/crossing dynamics and their events.
pub use weft_engine as engine;

/// Common imports for typical Weft usage.
///
/// ```rust
/// use weft::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use weft_core::{Flow, GenError, OccupancyMask, PassMask, Row, Strip, StripError, TickId};

    // Generators and dispatch
    pub use weft_gen::{
        generate, row_rng, GeneratedLane, GrassLane, LaneDetail, LaneKind, RailroadLane,
        RiverLane, RoadLane,
    };

    // Engine
    pub use weft_engine::{
        Board, BoardConfig, ConfigError, Event, KindWeights, StepMetrics, StepResult,
    };
}
