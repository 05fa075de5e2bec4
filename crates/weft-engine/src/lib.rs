//! Board runtime driving Weft lanes tick by tick.
//!
//! The [`Board`] owns a rolling window of generated lanes and advances
//! their dynamic hazards one cooperative tick at a time: vehicle loops
//! wrap, log lanes spawn and retire drifting logs, railroad crossings
//! run their warned-train state machine. Everything is single-threaded
//! and frame-driven: each [`step_sync`](Board::step_sync) call polls
//! every lane's timers once and performs at most one state transition
//! per lane.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod board;
mod config;
mod crossing;
mod events;
mod metrics;
mod traffic;

pub use board::{Board, Dynamics, LaneState, StepResult};
pub use config::{BoardConfig, ConfigError, KindWeights};
pub use crossing::{CrossingEvent, CrossingState, TrainCrossing};
pub use events::Event;
pub use metrics::StepMetrics;
pub use traffic::{Log, LogFlow, LogTickReport, VehicleTrack};
